//! GLSL-style vector types, generic over their element.
//!
//! [`Vec2`], [`Vec3`] and [`Vec4`] are plain `#[repr(C)]` structs with public
//! fields; the aliases at the bottom ([`Float2`], [`Fix3`], [`Bool4`], ...)
//! name the instantiations that mirror shader types. Component-wise operators
//! come in vector-vector and vector-scalar forms, with scalar-on-the-left
//! multiplication provided for the concrete element types. The numeric
//! methods (`abs` through `refract`) require a [`Scalar`] element and so work
//! identically for `f32`, `f64` and [`Fix`] -- for [`Fix`] they inherit its
//! overflow panics, so `length` of a vector with huge components will panic
//! rather than wrap.

use crate::fix::Fix;
use crate::maths::{self, Scalar};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Rem, RemAssign, Sub,
    SubAssign,
};

#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct Vec4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

// In type position inside the macros below, to repeat `T` once per field.
macro_rules! per_field_ty {
    ($f:ident, $t:ty) => {
        $t
    };
}

macro_rules! impl_vector_binop {
    ($Vec:ident { $($f:ident),+ }: $Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident) => {
        impl<T: $Op<Output = T> + Copy> $Op for $Vec<T> {
            type Output = $Vec<T>;
            fn $op(self, rhs: $Vec<T>) -> $Vec<T> {
                $Vec { $($f: $Op::$op(self.$f, rhs.$f)),+ }
            }
        }
        impl<T: $Op<Output = T> + Copy> $Op<T> for $Vec<T> {
            type Output = $Vec<T>;
            fn $op(self, rhs: T) -> $Vec<T> {
                $Vec { $($f: $Op::$op(self.$f, rhs)),+ }
            }
        }
        impl<T: $Op<Output = T> + Copy> $OpAssign for $Vec<T> {
            fn $op_assign(&mut self, rhs: $Vec<T>) {
                *self = $Op::$op(*self, rhs);
            }
        }
        impl<T: $Op<Output = T> + Copy> $OpAssign<T> for $Vec<T> {
            fn $op_assign(&mut self, rhs: T) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

macro_rules! impl_vector {
    ($Vec:ident, $count:literal, $fmt:literal, $($idx:tt => $f:ident),+) => {
        impl<T: Copy> $Vec<T> {
            pub const COUNT: usize = $count;

            pub fn new($($f: T),+) -> Self {
                Self { $($f),+ }
            }

            /// All components set to `v`.
            pub fn splat(v: T) -> Self {
                Self { $($f: v),+ }
            }

            pub fn map<U>(self, f: impl Fn(T) -> U) -> $Vec<U> {
                $Vec { $($f: f(self.$f)),+ }
            }

            pub fn zip<U: Copy, V>(self, rhs: $Vec<U>, f: impl Fn(T, U) -> V) -> $Vec<V> {
                $Vec { $($f: f(self.$f, rhs.$f)),+ }
            }

            pub fn zip3<V>(self, b: Self, c: Self, f: impl Fn(T, T, T) -> V) -> $Vec<V> {
                $Vec { $($f: f(self.$f, b.$f, c.$f)),+ }
            }

            pub fn to_array(self) -> [T; $count] {
                [$(self.$f),+]
            }
        }

        impl<T: Zero + Copy> $Vec<T> {
            pub fn zero() -> Self {
                Self::splat(T::zero())
            }
        }

        impl<T: One + Copy> $Vec<T> {
            pub fn one() -> Self {
                Self::splat(T::one())
            }
        }

        impl<T> From<[T; $count]> for $Vec<T> {
            fn from([$($f),+]: [T; $count]) -> Self {
                Self { $($f),+ }
            }
        }

        impl<T> From<$Vec<T>> for [T; $count] {
            fn from(v: $Vec<T>) -> [T; $count] {
                [$(v.$f),+]
            }
        }

        impl<T> From<($(per_field_ty!($f, T)),+)> for $Vec<T> {
            fn from(($($f),+): ($(per_field_ty!($f, T)),+)) -> Self {
                Self { $($f),+ }
            }
        }

        impl<T> Index<usize> for $Vec<T> {
            type Output = T;
            fn index(&self, index: usize) -> &T {
                match index {
                    $($idx => &self.$f,)+
                    _ => panic!("{} index out of range: {index}", stringify!($Vec)),
                }
            }
        }

        impl<T> IndexMut<usize> for $Vec<T> {
            fn index_mut(&mut self, index: usize) -> &mut T {
                match index {
                    $($idx => &mut self.$f,)+
                    _ => panic!("{} index out of range: {index}", stringify!($Vec)),
                }
            }
        }

        impl<T: fmt::Display> fmt::Display for $Vec<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, $fmt, $(self.$f),+)
            }
        }

        impl<T: Neg<Output = T> + Copy> Neg for $Vec<T> {
            type Output = $Vec<T>;
            fn neg(self) -> $Vec<T> {
                self.map(T::neg)
            }
        }

        impl_vector_binop!($Vec { $($f),+ }: Add::add, AddAssign::add_assign);
        impl_vector_binop!($Vec { $($f),+ }: Sub::sub, SubAssign::sub_assign);
        impl_vector_binop!($Vec { $($f),+ }: Mul::mul, MulAssign::mul_assign);
        impl_vector_binop!($Vec { $($f),+ }: Div::div, DivAssign::div_assign);
        impl_vector_binop!($Vec { $($f),+ }: Rem::rem, RemAssign::rem_assign);

        // Ordering and sign-flipping alone cover these, so integer vectors
        // get them without a full Scalar impl for their element.
        impl<T: Neg<Output = T> + Zero + One + PartialOrd + Copy> $Vec<T> {
            pub fn abs(self) -> Self {
                self.map(|a| if a < T::zero() { -a } else { a })
            }
            pub fn sign(self) -> Self {
                self.map(|a| {
                    if a < T::zero() {
                        -T::one()
                    } else if a > T::zero() {
                        T::one()
                    } else {
                        T::zero()
                    }
                })
            }
        }

        impl<T: Scalar> $Vec<T> {
            pub fn floor(self) -> Self {
                self.map(Scalar::floor)
            }
            pub fn ceil(self) -> Self {
                self.map(Scalar::ceil)
            }
            pub fn round(self) -> Self {
                self.map(Scalar::round)
            }
            pub fn fract(self) -> Self {
                self.map(maths::fract)
            }
            pub fn sqrt(self) -> Self {
                self.map(Scalar::sqrt)
            }
            pub fn inverse_sqrt(self) -> Self {
                self.map(Scalar::inv_sqrt)
            }
            pub fn sin(self) -> Self {
                self.map(Scalar::sin)
            }
            pub fn cos(self) -> Self {
                self.map(Scalar::cos)
            }
            pub fn tan(self) -> Self {
                self.map(Scalar::tan)
            }
            pub fn asin(self) -> Self {
                self.map(Scalar::asin)
            }
            pub fn acos(self) -> Self {
                self.map(Scalar::acos)
            }
            pub fn atan(self) -> Self {
                self.map(Scalar::atan)
            }
            pub fn atan2(self, x: Self) -> Self {
                self.zip(x, Scalar::atan2)
            }
            pub fn radians(self) -> Self {
                self.map(Scalar::radians)
            }
            pub fn degrees(self) -> Self {
                self.map(Scalar::degrees)
            }
            /// Component-wise linear interpolation with a scalar parameter.
            pub fn lerp(self, rhs: Self, t: T) -> Self {
                self.zip(rhs, |a, b| maths::lerp(a, b, t))
            }
            /// Component-wise linear interpolation with per-component
            /// parameters.
            pub fn mix(self, rhs: Self, t: Self) -> Self {
                self.zip3(rhs, t, maths::lerp)
            }
            /// 0 where the component is below the corresponding edge, else 1.
            /// `self` is the edge, matching the builtin argument order.
            pub fn step(self, v: Self) -> Self {
                self.zip(v, maths::step)
            }
            pub fn smooth_step(self, edge1: Self, v: Self) -> Self {
                self.zip3(edge1, v, maths::smooth_step)
            }
            pub fn fma(self, b: Self, c: Self) -> Self {
                self.zip3(b, c, Scalar::fma)
            }
            /// GLSL-style component-wise modulo; the result follows the sign
            /// of the divisor.
            pub fn modulo(self, rhs: Self) -> Self {
                self.zip(rhs, maths::modulo)
            }

            pub fn dot(self, rhs: Self) -> T {
                let mut acc = T::zero();
                $(acc = acc + self.$f * rhs.$f;)+
                acc
            }

            pub fn sqr_length(self) -> T {
                self.dot(self)
            }

            pub fn length(self) -> T {
                self.dot(self).sqrt()
            }

            pub fn sqr_distance(self, rhs: Self) -> T {
                (rhs - self).sqr_length()
            }

            pub fn distance(self, rhs: Self) -> T {
                (rhs - self).length()
            }

            /// Unit vector in the direction of `self`. A zero-length input
            /// divides by zero: NaN components for floats, a panic for fixed.
            pub fn normalize(self) -> Self {
                self / self.length()
            }

            /// Flips `self` so it points against `incident`, judged by
            /// `reference`'s dot product with `incident`.
            pub fn face_forward(self, incident: Self, reference: Self) -> Self {
                if reference.dot(incident) < T::zero() {
                    self
                } else {
                    -self
                }
            }

            /// Mirror reflection of the incident direction `self` about the
            /// unit normal `normal`.
            pub fn reflect(self, normal: Self) -> Self {
                let two = T::one() + T::one();
                self - normal * (two * self.dot(normal))
            }

            /// Refraction of the incident direction `self` at a surface with
            /// unit normal `normal` and index ratio `eta`; zero on total
            /// internal reflection.
            pub fn refract(self, normal: Self, eta: T) -> Self {
                let d = normal.dot(self);
                let k = T::one() - eta * eta * (T::one() - d * d);
                if k < T::zero() {
                    Self::zero()
                } else {
                    self * eta - normal * (eta * d + k.sqrt())
                }
            }
        }

        impl<T: PartialOrd + Copy> $Vec<T> {
            /// Component-wise minimum by ordering, which is what lets integer
            /// elements use it too.
            pub fn min(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| if a < b { a } else { b })
            }
            pub fn max(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| if a > b { a } else { b })
            }
            /// Clamps each component to `[lo, hi]`; `lo` wins when the bounds
            /// are inverted, matching min-of-max order.
            pub fn clamp(self, lo: Self, hi: Self) -> Self {
                self.max(lo).min(hi)
            }
            pub fn lesser_than(self, rhs: Self) -> $Vec<bool> {
                self.zip(rhs, |a, b| a < b)
            }
            pub fn lesser_than_equal(self, rhs: Self) -> $Vec<bool> {
                self.zip(rhs, |a, b| a <= b)
            }
            pub fn greater_than(self, rhs: Self) -> $Vec<bool> {
                self.zip(rhs, |a, b| a > b)
            }
            pub fn greater_than_equal(self, rhs: Self) -> $Vec<bool> {
                self.zip(rhs, |a, b| a >= b)
            }
        }

        impl<T: PartialEq + Copy> $Vec<T> {
            pub fn equal(self, rhs: Self) -> $Vec<bool> {
                self.zip(rhs, |a, b| a == b)
            }
            pub fn not_equal(self, rhs: Self) -> $Vec<bool> {
                self.zip(rhs, |a, b| a != b)
            }
        }

        impl $Vec<bool> {
            pub fn any(self) -> bool {
                let mut acc = false;
                $(acc = acc || self.$f;)+
                acc
            }
            pub fn all(self) -> bool {
                let mut acc = true;
                $(acc = acc && self.$f;)+
                acc
            }
            pub fn not(self) -> Self {
                self.map(|v| !v)
            }
            /// Per-component choice: where the mask is true take the
            /// component of `if_true`, otherwise of `if_false`.
            pub fn select<T: Copy>(self, if_false: $Vec<T>, if_true: $Vec<T>) -> $Vec<T> {
                $Vec { $($f: if self.$f { if_true.$f } else { if_false.$f }),+ }
            }
        }
    };
}

impl_vector!(Vec2, 2, "vec2({}, {})", 0 => x, 1 => y);
impl_vector!(Vec3, 3, "vec3({}, {}, {})", 0 => x, 1 => y, 2 => z);
impl_vector!(Vec4, 4, "vec4({}, {}, {}, {})", 0 => x, 1 => y, 2 => z, 3 => w);

// Scalar-on-the-left multiplication for the concrete element types.
macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),+) => {
        $(
            impl Mul<Vec2<$t>> for $t {
                type Output = Vec2<$t>;
                fn mul(self, rhs: Vec2<$t>) -> Vec2<$t> {
                    rhs * self
                }
            }
            impl Mul<Vec3<$t>> for $t {
                type Output = Vec3<$t>;
                fn mul(self, rhs: Vec3<$t>) -> Vec3<$t> {
                    rhs * self
                }
            }
            impl Mul<Vec4<$t>> for $t {
                type Output = Vec4<$t>;
                fn mul(self, rhs: Vec4<$t>) -> Vec4<$t> {
                    rhs * self
                }
            }
        )+
    };
}

impl_scalar_lhs_mul!(f32, f64, i32, u32, Fix);

impl<T: Copy> Vec2<T> {
    pub fn extend(self, z: T) -> Vec3<T> {
        Vec3 { x: self.x, y: self.y, z }
    }
}

impl<T: Copy> Vec3<T> {
    pub fn truncate(self) -> Vec2<T> {
        Vec2 { x: self.x, y: self.y }
    }
    pub fn extend(self, w: T) -> Vec4<T> {
        Vec4 { x: self.x, y: self.y, z: self.z, w }
    }
}

impl<T: Copy> Vec4<T> {
    pub fn truncate(self) -> Vec3<T> {
        Vec3 { x: self.x, y: self.y, z: self.z }
    }
}

impl<T: Scalar> Vec3<T> {
    /// Right-handed cross product.
    pub fn cross(self, rhs: Self) -> Self {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }
}

pub type Float2 = Vec2<f32>;
pub type Float3 = Vec3<f32>;
pub type Float4 = Vec4<f32>;
pub type Double2 = Vec2<f64>;
pub type Double3 = Vec3<f64>;
pub type Double4 = Vec4<f64>;
pub type Int2 = Vec2<i32>;
pub type Int3 = Vec3<i32>;
pub type Int4 = Vec4<i32>;
pub type UInt2 = Vec2<u32>;
pub type UInt3 = Vec3<u32>;
pub type UInt4 = Vec4<u32>;
pub type Fix2 = Vec2<Fix>;
pub type Fix3 = Vec3<Fix>;
pub type Fix4 = Vec4<Fix>;
pub type Bool2 = Vec2<bool>;
pub type Bool3 = Vec3<bool>;
pub type Bool4 = Vec4<bool>;
