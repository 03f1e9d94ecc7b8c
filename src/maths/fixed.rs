//! Deterministic trigonometry and interpolation over [`Fix`].
//!
//! Every function here is integer arithmetic only, with every constant a raw
//! Q16.16 literal, so results are bit-identical on every platform. The trig
//! functions are polynomial or rational approximations traded for speed and
//! determinism rather than precision: `sin`/`cos` are accurate to a few
//! thousandths near the edges of their range and `atan2` to roughly 0.01
//! radians, which is plenty for gameplay simulation and nowhere near enough
//! for scientific use.

use crate::fix::Fix;
use crate::maths::Scalar;
use tracing::warn;

const TAU: Fix = Fix::from_raw(411_774); // 2 * pi
const HALF_PI_RAW: i32 = Fix::PI.raw() >> 1;
const PI_DIV_4: Fix = Fix::from_raw(0x0000_C90F);
const THREE_PI_DIV_4: Fix = Fix::from_raw(0x0002_5B2F);
const ATAN_COEFF1: Fix = Fix::from_raw(0x0000_3240); // 0.1963
const ATAN_COEFF2: Fix = Fix::from_raw(0x0000_FB50); // 0.9817
const TWO: Fix = Fix::from_raw(2 << 16);
const THREE: Fix = Fix::from_raw(3 << 16);
const DEG_180: Fix = Fix::from_raw(180 << 16);
const DEG_360: Fix = Fix::from_raw(360 << 16);

/// -1, 0 or 1 with the sign of `x`.
#[must_use]
pub fn sign(x: Fix) -> Fix {
    Fix::from_raw(x.raw().signum() << 16)
}

/// Branchless absolute value. `abs(Fix::MIN)` wraps back to `Fix::MIN`, the
/// one degenerate case of two's complement.
#[must_use]
pub fn abs(x: Fix) -> Fix {
    let mask = x.raw() >> 31;
    Fix::from_raw(x.raw().wrapping_add(mask) ^ mask)
}

/// Largest representable value not greater than `x`: masks off the
/// fractional bits, which truncates toward negative infinity.
#[must_use]
pub fn floor(x: Fix) -> Fix {
    Fix::from_raw((x.raw() as u32 & 0xFFFF_0000) as i32)
}

/// Smallest representable value not less than `x`. `ceil(Fix::MAX)` wraps.
#[must_use]
pub fn ceil(x: Fix) -> Fix {
    let whole = x.raw() as u32 & 0xFFFF_0000;
    let frac = x.raw() as u32 & 0x0000_FFFF;
    let raw = if frac != 0 {
        whole.wrapping_add(0x0001_0000)
    } else {
        whole
    };
    Fix::from_raw(raw as i32)
}

/// Round half away from zero: bias-and-mask on the magnitude, sign restored
/// afterwards. Biasing the signed raw directly would floor negative values
/// one unit low, the same asymmetry the multiply avoids with its truncating
/// rescale.
#[must_use]
pub fn round(x: Fix) -> Fix {
    let magnitude = x.raw().unsigned_abs();
    let rounded = (magnitude.wrapping_add(0x8000) & 0xFFFF_0000) as i32;
    Fix::from_raw(if x.raw() < 0 {
        rounded.wrapping_neg()
    } else {
        rounded
    })
}

#[must_use]
pub fn min(a: Fix, b: Fix) -> Fix {
    if a < b {
        a
    } else {
        b
    }
}

#[must_use]
pub fn max(a: Fix, b: Fix) -> Fix {
    if a > b {
        a
    } else {
        b
    }
}

/// Clamps to `[lo, hi]`; `lo` wins when the bounds are inverted.
#[must_use]
pub fn clamp(x: Fix, lo: Fix, hi: Fix) -> Fix {
    min(max(x, lo), hi)
}

/// Digit-by-digit binary square root on the raw representation.
///
/// Two rounds of the classic shift-and-subtract loop: the first extracts the
/// integer square root of the raw value, the second refines 16 more bits so
/// the result lands back on the Q16.16 scale, followed by a final rounding
/// increment. Exact for perfect squares and correctly rounded elsewhere.
///
/// A negative input has no real root; the convention here is to return the
/// negated root of the magnitude, with a warning, rather than panic
/// mid-simulation.
#[must_use]
pub fn sqrt(x: Fix) -> Fix {
    let negative = x.raw() < 0;
    if negative {
        warn!("sqrt() of negative value {x}: returning negated root of magnitude");
    }
    let mut num = x.raw().unsigned_abs();
    let mut result = 0_u32;
    let mut bit = if num & 0xFFF0_0000 != 0 {
        1_u32 << 30
    } else {
        1_u32 << 18
    };
    while bit > num {
        bit >>= 2;
    }
    for pass in 0..2 {
        while bit != 0 {
            let trial = result.wrapping_add(bit);
            if num >= trial {
                num = num.wrapping_sub(trial);
                result = (result >> 1).wrapping_add(bit);
            } else {
                result >>= 1;
            }
            bit >>= 2;
        }
        if pass == 0 {
            // Re-scale for the fractional pass. When the remainder would
            // overflow the shift, pre-divide both sides by the next result
            // bit instead (the +-0x8000 completes the square).
            if num > 0xFFFF {
                num = num.wrapping_sub(result);
                num = (num << 16).wrapping_sub(0x8000);
                result = (result << 16).wrapping_add(0x8000);
            } else {
                num <<= 16;
                result <<= 16;
            }
            bit = 1 << 14;
        }
    }
    if num > result {
        result = result.wrapping_add(1);
    }
    let root = result as i32;
    Fix::from_raw(if negative { root.wrapping_neg() } else { root })
}

/// `1 / sqrt(x)`.
#[must_use]
pub fn inverse_sqrt(x: Fix) -> Fix {
    Fix::ONE / sqrt(x)
}

/// Sine of an angle in radians.
///
/// The angle is reduced modulo 2pi into `(-pi, pi]`, then fed through a
/// degree-5 odd polynomial with fixed coefficients. Exactly zero at zero,
/// exactly odd (`sin(-x) == -sin(x)`), and bounded by one everywhere; the
/// worst error is a few thousandths near the reduction seam at pi.
#[must_use]
pub fn sin(angle: Fix) -> Fix {
    let mut a = angle % TAU;
    if a < Fix::ZERO {
        a = a + TAU;
    }
    if a > Fix::PI {
        a = a - TAU;
    }
    let sq = a * a;
    let mut out = Fix::from_raw(-13) * sq + Fix::from_raw(546);
    out = out * sq - Fix::from_raw(10923);
    out = out * sq + Fix::ONE;
    out * a
}

/// Cosine via the phase identity `cos(x) = sin(x + pi/2)`, with a wrapping
/// raw add so angles near `Fix::MAX` reduce instead of panicking.
#[must_use]
pub fn cos(angle: Fix) -> Fix {
    sin(Fix::from_raw(angle.raw().wrapping_add(HALF_PI_RAW)))
}

/// `sin / cos` with saturating division, so the poles return
/// `Fix::MAX`/`Fix::MIN` instead of panicking.
#[must_use]
pub fn tan(angle: Fix) -> Fix {
    sin(angle).saturating_div(cos(angle))
}

/// Arc sine via the identity `asin(x) = atan(x / sqrt(1 - x^2))`.
///
/// Inputs outside `[-1, 1]` have no real arc sine; they return zero with a
/// warning. The endpoints are handled directly since the identity divides by
/// zero there.
#[must_use]
pub fn asin(x: Fix) -> Fix {
    if x > Fix::ONE || x < -Fix::ONE {
        warn!("asin() of out-of-domain value {x}: returning zero");
        return Fix::ZERO;
    }
    if x == Fix::ONE {
        return Fix::from_raw(HALF_PI_RAW);
    }
    if x == -Fix::ONE {
        return Fix::from_raw(-HALF_PI_RAW);
    }
    let rv = Fix::ONE - x * x;
    atan(x / sqrt(rv))
}

/// `acos(x) = pi/2 - asin(x)`.
#[must_use]
pub fn acos(x: Fix) -> Fix {
    Fix::from_raw(HALF_PI_RAW - asin(x).raw())
}

/// `atan(x) = atan2(x, 1)`.
#[must_use]
pub fn atan(x: Fix) -> Fix {
    atan2(x, Fix::ONE)
}

/// Four-quadrant arc tangent of `y / x`, in `(-pi, pi]`.
///
/// Per-octant rational approximation (Msiddalingaiah's fast arc tangent):
/// fold into a half-plane by the sign of `x`, evaluate a cubic in the folded
/// ratio, then restore the sign from `y`. Worst error is about 0.01 rad.
/// `atan2(0, 0)` is defined as zero; both operands at extreme magnitude can
/// overflow the internal `x + |y|`.
#[must_use]
pub fn atan2(y: Fix, x: Fix) -> Fix {
    if y == Fix::ZERO && x == Fix::ZERO {
        return Fix::ZERO;
    }
    let abs_y = abs(y);
    let (r, pi_add) = if x.raw() >= 0 {
        ((x - abs_y) / (x + abs_y), PI_DIV_4)
    } else {
        ((x + abs_y) / (abs_y - x), THREE_PI_DIV_4)
    };
    let r3 = r * r * r;
    let angle = (ATAN_COEFF1 * r3) - (ATAN_COEFF2 * r) + pi_add;
    if y.raw() < 0 {
        -angle
    } else {
        angle
    }
}

/// Degrees to radians. Multiplies by pi first, so inputs beyond about 10430
/// degrees overflow the intermediate.
#[must_use]
pub fn radians(degrees: Fix) -> Fix {
    degrees * Fix::PI / DEG_180
}

/// Radians to degrees. Overflows for inputs beyond about 182 radians.
#[must_use]
pub fn degrees(radians: Fix) -> Fix {
    radians * DEG_180 / Fix::PI
}

#[must_use]
pub fn lerp(edge0: Fix, edge1: Fix, value: Fix) -> Fix {
    edge0 + ((edge1 - edge0) * value)
}

#[must_use]
pub fn inv_lerp(edge0: Fix, edge1: Fix, value: Fix) -> Fix {
    (value - edge0) / (edge1 - edge0)
}

/// Maps `value` from `[in0, in1]` onto `[out0, out1]`.
#[must_use]
pub fn remap(in0: Fix, in1: Fix, out0: Fix, out1: Fix, value: Fix) -> Fix {
    lerp(out0, out1, inv_lerp(in0, in1, value))
}

/// Hermite interpolation between the edges, clamped to `[0, 1]`.
#[must_use]
pub fn smooth_step(edge0: Fix, edge1: Fix, v: Fix) -> Fix {
    let x = clamp((v - edge0) / (edge1 - edge0), Fix::ZERO, Fix::ONE);
    x * x * (THREE - TWO * x)
}

/// `a * b + c` in one expression; rounding still happens per operation.
#[must_use]
pub fn fma(a: Fix, b: Fix, c: Fix) -> Fix {
    a * b + c
}

/// Moves `current` toward `target` by at most `max_delta`, never
/// overshooting.
#[must_use]
pub fn move_towards(current: Fix, target: Fix, max_delta: Fix) -> Fix {
    current + clamp(target - current, -max_delta, max_delta)
}

/// Wraps `t` into `[0, length]`.
#[must_use]
pub fn repeat(t: Fix, length: Fix) -> Fix {
    clamp(t - floor(t / length) * length, Fix::ZERO, length)
}

/// Shortest signed angular distance from `current` to `target` in degrees,
/// in `(-180, 180]`.
#[must_use]
pub fn delta_angle(current: Fix, target: Fix) -> Fix {
    let num = repeat(target - current, DEG_360);
    if num > DEG_180 {
        num - DEG_360
    } else {
        num
    }
}

/// [`move_towards`] for angles in degrees, along the shortest arc.
#[must_use]
pub fn rotate_towards(current: Fix, target: Fix, max_step: Fix) -> Fix {
    let delta = delta_angle(current, target);
    move_towards(current, current + delta, max_step)
}

/// Critically damped spring toward `target`, fully deterministic.
///
/// `velocity` carries state between steps and must start at zero. The
/// exponential decay is a rational approximation with fixed raw coefficients
/// (0.235 and 0.48 on the Q16.16 scale), valid while
/// `delta_time * 2 / smooth_time` stays around one or below. When the
/// proposed movement's sign disagrees with the remaining delta the spring has
/// crossed the target, so the result snaps to `target` and the velocity
/// zeroes.
pub fn smooth_damp(
    current: Fix,
    target: Fix,
    velocity: &mut Fix,
    smooth_time: Fix,
    delta_time: Fix,
) -> Fix {
    let omega = TWO / smooth_time;
    let delta = current - target;
    let x = delta_time * omega;
    let exp = Fix::ONE
        / (Fix::ONE + x + (x * x * ((x * Fix::from_raw(15401)) + Fix::from_raw(31457))));
    let temp = (*velocity * delta_time) + (x * delta);
    let vel = (*velocity - (omega * temp)) * exp;
    let movement = (delta + temp) * exp;
    if sign(delta) == sign(movement) {
        *velocity = vel;
        target + movement
    } else {
        *velocity = Fix::ZERO;
        target
    }
}

/// [`smooth_damp`] for angles in degrees, along the shortest arc.
pub fn smooth_damp_angle(
    current: Fix,
    target: Fix,
    velocity: &mut Fix,
    smooth_time: Fix,
    delta_time: Fix,
) -> Fix {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, delta_time)
}

impl Scalar for Fix {
    fn abs(self) -> Fix {
        abs(self)
    }
    fn sign(self) -> Fix {
        sign(self)
    }
    fn floor(self) -> Fix {
        floor(self)
    }
    fn ceil(self) -> Fix {
        ceil(self)
    }
    fn round(self) -> Fix {
        round(self)
    }
    fn sqrt(self) -> Fix {
        sqrt(self)
    }
    fn inv_sqrt(self) -> Fix {
        inverse_sqrt(self)
    }
    fn sin(self) -> Fix {
        sin(self)
    }
    fn cos(self) -> Fix {
        cos(self)
    }
    fn tan(self) -> Fix {
        tan(self)
    }
    fn asin(self) -> Fix {
        asin(self)
    }
    fn acos(self) -> Fix {
        acos(self)
    }
    fn atan(self) -> Fix {
        atan(self)
    }
    fn atan2(self, x: Fix) -> Fix {
        atan2(self, x)
    }
    fn radians(self) -> Fix {
        radians(self)
    }
    fn degrees(self) -> Fix {
        degrees(self)
    }
    fn min(self, other: Fix) -> Fix {
        min(self, other)
    }
    fn max(self, other: Fix) -> Fix {
        max(self, other)
    }
    fn fma(self, b: Fix, c: Fix) -> Fix {
        fma(self, b, c)
    }
}
