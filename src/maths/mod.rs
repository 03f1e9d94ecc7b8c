//! Scalar maths over floats and fixed-point.
//!
//! [`Scalar`] is the seam that lets the vector types and the `glsh` facade
//! work uniformly across `f32`, `f64` and [`Fix`](crate::fix::Fix): it names
//! the element-wise operations every supported scalar provides. The float
//! impls delegate to `std`; the fixed impl delegates to [`fixed`], where the
//! deterministic integer algorithms live.
//!
//! Free functions in this module come in two flavours: generic helpers over
//! any [`Scalar`] (`lerp`, `clamp`, `smooth_step`, ...) and kinematics over
//! floats only (`smooth_damp`, `delta_angle`, ...). The fixed-point forms of
//! the kinematics are in [`fixed`] with their own raw-literal constants.

use num_traits::{Float, One, Zero};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

pub mod fixed;

/// Element type of the vector and facade APIs.
///
/// Everything here is a total function on the scalar (modulo the documented
/// panics of fixed-point arithmetic); no method allocates.
pub trait Scalar:
    Copy
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
    + Neg<Output = Self>
{
    fn abs(self) -> Self;
    /// -1, 0 or 1 with the sign of `self`; zero maps to zero.
    fn sign(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    /// Round half away from zero.
    fn round(self) -> Self;
    fn sqrt(self) -> Self;
    fn inv_sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn atan2(self, x: Self) -> Self;
    /// Degrees to radians.
    fn radians(self) -> Self;
    /// Radians to degrees.
    fn degrees(self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    /// `self * b + c`.
    fn fma(self, b: Self, c: Self) -> Self;
}

macro_rules! impl_scalar_for_float {
    ($t:ty) => {
        impl Scalar for $t {
            fn abs(self) -> $t {
                <$t>::abs(self)
            }
            fn sign(self) -> $t {
                // signum() maps 0.0 to 1.0, which is not what anyone wants
                // from a sign function.
                if self == 0.0 {
                    0.0
                } else {
                    self.signum()
                }
            }
            fn floor(self) -> $t {
                <$t>::floor(self)
            }
            fn ceil(self) -> $t {
                <$t>::ceil(self)
            }
            fn round(self) -> $t {
                <$t>::round(self)
            }
            fn sqrt(self) -> $t {
                <$t>::sqrt(self)
            }
            fn inv_sqrt(self) -> $t {
                1.0 / <$t>::sqrt(self)
            }
            fn sin(self) -> $t {
                <$t>::sin(self)
            }
            fn cos(self) -> $t {
                <$t>::cos(self)
            }
            fn tan(self) -> $t {
                <$t>::tan(self)
            }
            fn asin(self) -> $t {
                <$t>::asin(self)
            }
            fn acos(self) -> $t {
                <$t>::acos(self)
            }
            fn atan(self) -> $t {
                <$t>::atan(self)
            }
            fn atan2(self, x: $t) -> $t {
                <$t>::atan2(self, x)
            }
            fn radians(self) -> $t {
                self.to_radians()
            }
            fn degrees(self) -> $t {
                self.to_degrees()
            }
            fn min(self, other: $t) -> $t {
                <$t>::min(self, other)
            }
            fn max(self, other: $t) -> $t {
                <$t>::max(self, other)
            }
            fn fma(self, b: $t, c: $t) -> $t {
                self * b + c
            }
        }
    };
}

impl_scalar_for_float!(f32);
impl_scalar_for_float!(f64);

// ==================== Generic helpers ====================

/// Clamps `x` to `[lo, hi]`. `lo > hi` gives `hi`, matching min-of-max order.
pub fn clamp<T: Scalar>(x: T, lo: T, hi: T) -> T {
    x.max(lo).min(hi)
}

/// Linear interpolation `a + (b - a) * t`, unclamped.
pub fn lerp<T: Scalar>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Inverse of [`lerp`]: the `t` at which `lerp(a, b, t) == v`, unclamped.
pub fn inv_lerp<T: Scalar>(a: T, b: T, v: T) -> T {
    (v - a) / (b - a)
}

/// Maps `v` from the range `[in_a, in_b]` to `[out_a, out_b]`.
pub fn remap<T: Scalar>(in_a: T, in_b: T, out_a: T, out_b: T, v: T) -> T {
    lerp(out_a, out_b, inv_lerp(in_a, in_b, v))
}

/// Fractional part `x - floor(x)`; always in `[0, 1)`.
pub fn fract<T: Scalar>(x: T) -> T {
    x - x.floor()
}

/// 0 below `edge`, 1 at or above it.
pub fn step<T: Scalar>(edge: T, x: T) -> T {
    if x < edge {
        T::zero()
    } else {
        T::one()
    }
}

/// Hermite interpolation between `edge0` and `edge1`, clamped.
pub fn smooth_step<T: Scalar>(edge0: T, edge1: T, v: T) -> T {
    let t = clamp((v - edge0) / (edge1 - edge0), T::zero(), T::one());
    let two = T::one() + T::one();
    let three = two + T::one();
    t * t * (three - two * t)
}

/// GLSL-style modulo `x - y * floor(x / y)`; result has the sign of `y`.
pub fn modulo<T: Scalar>(x: T, y: T) -> T {
    x - y * (x / y).floor()
}

// ==================== Float kinematics ====================

/// `1 / sqrt(v)`.
pub fn inverse_sqrt<T: Float>(v: T) -> T {
    T::one() / v.sqrt()
}

/// Moves `current` toward `target` by at most `max_delta`, without
/// overshooting.
pub fn move_towards<T: Float>(current: T, target: T, max_delta: T) -> T {
    current + num_traits::clamp(target - current, -max_delta, max_delta)
}

/// Wraps `t` into `[0, length]`.
pub fn repeat<T: Float>(t: T, length: T) -> T {
    num_traits::clamp(t - (t / length).floor() * length, T::zero(), length)
}

/// Shortest signed angular distance from `current` to `target`, in degrees,
/// in `(-180, 180]`.
pub fn delta_angle<T: Float>(current: T, target: T) -> T {
    let full = T::from(360.0).unwrap();
    let half = T::from(180.0).unwrap();
    let num = repeat(target - current, full);
    if num > half {
        num - full
    } else {
        num
    }
}

/// Like [`move_towards`] for angles in degrees, taking the shortest path
/// around the circle.
pub fn rotate_towards<T: Float>(current: T, target: T, max_delta: T) -> T {
    let delta = delta_angle(current, target);
    if -max_delta < delta && delta < max_delta {
        target
    } else {
        move_towards(current, current + delta, max_delta)
    }
}

/// Critically damped spring toward `target`.
///
/// `velocity` carries state between frames and must start at zero. The
/// exponential is a rational approximation tuned for `x = delta_time * omega`
/// up to about 1, so `delta_time` should stay well under `smooth_time`.
/// Never overshoots: when the proposed movement crosses the target, it snaps
/// to the target and zeroes the velocity.
pub fn smooth_damp<T: Float>(
    current: T,
    target: T,
    velocity: &mut T,
    smooth_time: T,
    delta_time: T,
) -> T {
    let two = T::from(2.0).unwrap();
    let omega = two / smooth_time;
    let x = delta_time * omega;
    let exp = T::one()
        / (T::one()
            + x
            + x * x * (x * T::from(0.235).unwrap() + T::from(0.48).unwrap()));
    let delta = current - target;
    let temp = (*velocity * delta_time) + (x * delta);
    let vel = (*velocity - omega * temp) * exp;
    let movement = (delta + temp) * exp;
    if delta.signum() == movement.signum() || delta == T::zero() {
        *velocity = vel;
        target + movement
    } else {
        *velocity = T::zero();
        target
    }
}

/// [`smooth_damp`] for angles in degrees, taking the shortest path.
pub fn smooth_damp_angle<T: Float>(
    current: T,
    target: T,
    velocity: &mut T,
    smooth_time: T,
    delta_time: T,
) -> T {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, delta_time)
}
