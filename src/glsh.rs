//! Shader-style free-function facade.
//!
//! GLSL spells its builtins as free functions that accept scalars and vectors
//! alike; this module reproduces that surface on top of [`Scalar`] and the
//! vector types. Three small traits carve up the builtin families:
//! [`ComponentWise`] for the map-like functions (`abs(v)`, `clamp(v, lo, hi)`,
//! ...), [`Geometric`] for the ones that reduce or rescale whole vectors
//! (`length`, `reflect`, ...), and [`Mask`]/[`Compare`] for boolean-vector
//! logic. Code that wants `length(cross(a, b))` to read like a shader imports
//! this module; code that prefers methods calls the same impls directly on
//! the vector types.

use crate::maths::{self, Scalar};
use crate::vector::{Vec2, Vec3, Vec4};

/// Types whose builtin functions apply per component. Scalars count as
/// single-component vectors, which is what lets one `abs` serve both.
pub trait ComponentWise: Copy {
    type Elem: Scalar;

    fn cw_map<F: Fn(Self::Elem) -> Self::Elem>(self, f: F) -> Self;
    fn cw_zip<F: Fn(Self::Elem, Self::Elem) -> Self::Elem>(self, rhs: Self, f: F) -> Self;
    fn cw_zip3<F: Fn(Self::Elem, Self::Elem, Self::Elem) -> Self::Elem>(
        self,
        b: Self,
        c: Self,
        f: F,
    ) -> Self;
}

macro_rules! impl_component_wise_scalar {
    ($($t:ty),+) => {
        $(
            impl ComponentWise for $t {
                type Elem = $t;
                fn cw_map<F: Fn($t) -> $t>(self, f: F) -> $t {
                    f(self)
                }
                fn cw_zip<F: Fn($t, $t) -> $t>(self, rhs: $t, f: F) -> $t {
                    f(self, rhs)
                }
                fn cw_zip3<F: Fn($t, $t, $t) -> $t>(self, b: $t, c: $t, f: F) -> $t {
                    f(self, b, c)
                }
            }
        )+
    };
}

impl_component_wise_scalar!(f32, f64, crate::fix::Fix);

macro_rules! impl_component_wise_vector {
    ($($Vec:ident),+) => {
        $(
            impl<T: Scalar> ComponentWise for $Vec<T> {
                type Elem = T;
                fn cw_map<F: Fn(T) -> T>(self, f: F) -> Self {
                    self.map(f)
                }
                fn cw_zip<F: Fn(T, T) -> T>(self, rhs: Self, f: F) -> Self {
                    self.zip(rhs, f)
                }
                fn cw_zip3<F: Fn(T, T, T) -> T>(self, b: Self, c: Self, f: F) -> Self {
                    self.zip3(b, c, f)
                }
            }
        )+
    };
}

impl_component_wise_vector!(Vec2, Vec3, Vec4);

/// The builtins that treat a vector as one geometric quantity.
pub trait Geometric: Copy {
    type Elem: Scalar;

    fn dot(self, rhs: Self) -> Self::Elem;
    fn sqr_length(self) -> Self::Elem;
    fn length(self) -> Self::Elem;
    fn sqr_distance(self, rhs: Self) -> Self::Elem;
    fn distance(self, rhs: Self) -> Self::Elem;
    fn normalize(self) -> Self;
    fn face_forward(self, incident: Self, reference: Self) -> Self;
    fn reflect(self, normal: Self) -> Self;
    fn refract(self, normal: Self, eta: Self::Elem) -> Self;
}

macro_rules! impl_geometric {
    ($($Vec:ident),+) => {
        $(
            impl<T: Scalar> Geometric for $Vec<T> {
                type Elem = T;
                fn dot(self, rhs: Self) -> T {
                    $Vec::dot(self, rhs)
                }
                fn sqr_length(self) -> T {
                    $Vec::sqr_length(self)
                }
                fn length(self) -> T {
                    $Vec::length(self)
                }
                fn sqr_distance(self, rhs: Self) -> T {
                    $Vec::sqr_distance(self, rhs)
                }
                fn distance(self, rhs: Self) -> T {
                    $Vec::distance(self, rhs)
                }
                fn normalize(self) -> Self {
                    $Vec::normalize(self)
                }
                fn face_forward(self, incident: Self, reference: Self) -> Self {
                    $Vec::face_forward(self, incident, reference)
                }
                fn reflect(self, normal: Self) -> Self {
                    $Vec::reflect(self, normal)
                }
                fn refract(self, normal: Self, eta: T) -> Self {
                    $Vec::refract(self, normal, eta)
                }
            }
        )+
    };
}

impl_geometric!(Vec2, Vec3, Vec4);

/// Boolean vectors.
pub trait Mask: Copy {
    fn any(self) -> bool;
    fn all(self) -> bool;
    fn not(self) -> Self;
}

macro_rules! impl_mask {
    ($($Vec:ident),+) => {
        $(
            impl Mask for $Vec<bool> {
                fn any(self) -> bool {
                    $Vec::any(self)
                }
                fn all(self) -> bool {
                    $Vec::all(self)
                }
                fn not(self) -> Self {
                    $Vec::not(self)
                }
            }
        )+
    };
}

impl_mask!(Vec2, Vec3, Vec4);

/// Component-wise comparisons producing a [`Mask`], plus the selection that
/// consumes one.
pub trait Compare: Copy {
    type Mask: Mask;

    fn lesser_than(self, rhs: Self) -> Self::Mask;
    fn lesser_than_equal(self, rhs: Self) -> Self::Mask;
    fn greater_than(self, rhs: Self) -> Self::Mask;
    fn greater_than_equal(self, rhs: Self) -> Self::Mask;
    fn equal(self, rhs: Self) -> Self::Mask;
    fn not_equal(self, rhs: Self) -> Self::Mask;
    fn select(mask: Self::Mask, if_false: Self, if_true: Self) -> Self;
}

macro_rules! impl_compare {
    ($($Vec:ident),+) => {
        $(
            impl<T: PartialOrd + Copy> Compare for $Vec<T> {
                type Mask = $Vec<bool>;
                fn lesser_than(self, rhs: Self) -> $Vec<bool> {
                    $Vec::lesser_than(self, rhs)
                }
                fn lesser_than_equal(self, rhs: Self) -> $Vec<bool> {
                    $Vec::lesser_than_equal(self, rhs)
                }
                fn greater_than(self, rhs: Self) -> $Vec<bool> {
                    $Vec::greater_than(self, rhs)
                }
                fn greater_than_equal(self, rhs: Self) -> $Vec<bool> {
                    $Vec::greater_than_equal(self, rhs)
                }
                fn equal(self, rhs: Self) -> $Vec<bool> {
                    $Vec::equal(self, rhs)
                }
                fn not_equal(self, rhs: Self) -> $Vec<bool> {
                    $Vec::not_equal(self, rhs)
                }
                fn select(mask: $Vec<bool>, if_false: Self, if_true: Self) -> Self {
                    mask.select(if_false, if_true)
                }
            }
        )+
    };
}

impl_compare!(Vec2, Vec3, Vec4);

// ==================== Component-wise builtins ====================

pub fn abs<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::abs)
}

pub fn sign<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::sign)
}

pub fn floor<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::floor)
}

pub fn ceil<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::ceil)
}

pub fn round<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::round)
}

pub fn fract<V: ComponentWise>(v: V) -> V {
    v.cw_map(maths::fract)
}

pub fn sqrt<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::sqrt)
}

pub fn inverse_sqrt<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::inv_sqrt)
}

pub fn sin<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::sin)
}

pub fn cos<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::cos)
}

pub fn tan<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::tan)
}

pub fn asin<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::asin)
}

pub fn acos<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::acos)
}

pub fn atan<V: ComponentWise>(v: V) -> V {
    v.cw_map(Scalar::atan)
}

pub fn atan2<V: ComponentWise>(y: V, x: V) -> V {
    y.cw_zip(x, Scalar::atan2)
}

pub fn radians<V: ComponentWise>(degrees: V) -> V {
    degrees.cw_map(Scalar::radians)
}

pub fn degrees<V: ComponentWise>(radians: V) -> V {
    radians.cw_map(Scalar::degrees)
}

pub fn min<V: ComponentWise>(a: V, b: V) -> V {
    a.cw_zip(b, Scalar::min)
}

pub fn max<V: ComponentWise>(a: V, b: V) -> V {
    a.cw_zip(b, Scalar::max)
}

pub fn clamp<V: ComponentWise>(v: V, lo: V, hi: V) -> V {
    v.cw_zip3(lo, hi, maths::clamp)
}

/// Linear blend `x + (y - x) * t`, per component; GLSL calls this `mix`.
pub fn mix<V: ComponentWise>(x: V, y: V, t: V) -> V {
    x.cw_zip3(y, t, maths::lerp)
}

pub fn step<V: ComponentWise>(edge: V, v: V) -> V {
    edge.cw_zip(v, maths::step)
}

pub fn smooth_step<V: ComponentWise>(edge0: V, edge1: V, v: V) -> V {
    edge0.cw_zip3(edge1, v, maths::smooth_step)
}

pub fn fma<V: ComponentWise>(a: V, b: V, c: V) -> V {
    a.cw_zip3(b, c, Scalar::fma)
}

/// GLSL `mod`: `x - y * floor(x / y)`, per component.
pub fn modulo<V: ComponentWise>(x: V, y: V) -> V {
    x.cw_zip(y, maths::modulo)
}

// ==================== Geometric builtins ====================

pub fn dot<V: Geometric>(a: V, b: V) -> V::Elem {
    a.dot(b)
}

pub fn length<V: Geometric>(v: V) -> V::Elem {
    v.length()
}

pub fn sqr_length<V: Geometric>(v: V) -> V::Elem {
    v.sqr_length()
}

pub fn distance<V: Geometric>(a: V, b: V) -> V::Elem {
    a.distance(b)
}

pub fn sqr_distance<V: Geometric>(a: V, b: V) -> V::Elem {
    a.sqr_distance(b)
}

pub fn normalize<V: Geometric>(v: V) -> V {
    v.normalize()
}

pub fn face_forward<V: Geometric>(n: V, incident: V, reference: V) -> V {
    n.face_forward(incident, reference)
}

pub fn reflect<V: Geometric>(incident: V, normal: V) -> V {
    incident.reflect(normal)
}

pub fn refract<V: Geometric>(incident: V, normal: V, eta: V::Elem) -> V {
    incident.refract(normal, eta)
}

pub fn cross<T: Scalar>(a: Vec3<T>, b: Vec3<T>) -> Vec3<T> {
    a.cross(b)
}

// ==================== Masks & comparisons ====================

pub fn any<M: Mask>(mask: M) -> bool {
    mask.any()
}

pub fn all<M: Mask>(mask: M) -> bool {
    mask.all()
}

pub fn not<M: Mask>(mask: M) -> M {
    mask.not()
}

pub fn lesser_than<V: Compare>(a: V, b: V) -> V::Mask {
    a.lesser_than(b)
}

pub fn lesser_than_equal<V: Compare>(a: V, b: V) -> V::Mask {
    a.lesser_than_equal(b)
}

pub fn greater_than<V: Compare>(a: V, b: V) -> V::Mask {
    a.greater_than(b)
}

pub fn greater_than_equal<V: Compare>(a: V, b: V) -> V::Mask {
    a.greater_than_equal(b)
}

pub fn equal<V: Compare>(a: V, b: V) -> V::Mask {
    a.equal(b)
}

pub fn not_equal<V: Compare>(a: V, b: V) -> V::Mask {
    a.not_equal(b)
}

/// Per-component choice: where `mask` is true take `if_true`'s component,
/// otherwise `if_false`'s.
pub fn select<V: Compare>(mask: V::Mask, if_false: V, if_true: V) -> V {
    V::select(mask, if_false, if_true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix::Fix;
    use crate::vector::{Bool3, Fix2, Float2, Float3};

    const EPSILON: f32 = 1e-5;

    #[test]
    fn builtins_accept_scalars_and_vectors_alike() {
        assert_eq!(abs(-2.5f32), 2.5);
        assert_eq!(abs(Float2::new(-2.5, 1.0)), Float2::new(2.5, 1.0));
        assert_eq!(abs(Fix::from_int(-3)), Fix::from_int(3));
        assert_eq!(
            abs(Fix2::new(Fix::from_int(-3), Fix::ONE)),
            Fix2::new(Fix::from_int(3), Fix::ONE)
        );
    }

    #[test]
    fn clamp_mix_and_step() {
        assert_eq!(clamp(5.0f32, 0.0, 1.0), 1.0);
        assert_eq!(
            clamp(
                Float2::new(-1.0, 5.0),
                Float2::splat(0.0),
                Float2::splat(1.0)
            ),
            Float2::new(0.0, 1.0)
        );
        assert_eq!(mix(0.0f32, 10.0, 0.25), 2.5);
        assert_eq!(step(1.0f32, 0.5), 0.0);
        assert!((smooth_step(0.0f32, 1.0, 0.5) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn trig_dispatches_per_element_type() {
        assert!((sin(std::f32::consts::FRAC_PI_2) - 1.0).abs() < EPSILON);
        // The deterministic kernel, not a float fallback.
        assert_eq!(
            sin(Fix::ZERO),
            crate::maths::fixed::sin(Fix::ZERO)
        );
        assert_eq!(
            atan2(Fix::ONE, Fix::ZERO),
            crate::maths::fixed::atan2(Fix::ONE, Fix::ZERO)
        );
    }

    #[test]
    fn geometric_builtins_read_like_shaders() {
        let a = Float3::new(1.0, 0.0, 0.0);
        let b = Float3::new(0.0, 1.0, 0.0);
        assert_eq!(dot(a, b), 0.0);
        assert_eq!(length(cross(a, b)), 1.0);
        assert_eq!(distance(a, b), 2.0f32.sqrt());
        assert!((length(normalize(Float3::new(3.0, 4.0, 0.0))) - 1.0).abs() < EPSILON);

        let fixed = Fix2::new(Fix::from_int(3), Fix::from_int(4));
        assert_eq!(length(fixed), Fix::from_int(5));
    }

    #[test]
    fn masks_compose() {
        let a = Float3::new(1.0, 5.0, 3.0);
        let b = Float3::new(2.0, 4.0, 3.0);
        let mask = lesser_than(a, b);
        assert_eq!(mask, Bool3::new(true, false, false));
        assert!(any(mask));
        assert!(!all(mask));
        assert!(all(not(greater_than(a, a))));
        assert_eq!(
            select(mask, Float3::splat(0.0), Float3::splat(1.0)),
            Float3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn modulo_and_fract() {
        assert!((modulo(-5.5f32, 2.0) - 0.5).abs() < EPSILON);
        assert_eq!(
            modulo(Fix::from_int(-7), Fix::from_int(3)),
            Fix::from_int(2)
        );
        assert!((fract(2.75f32) - 0.75).abs() < EPSILON);
    }
}
