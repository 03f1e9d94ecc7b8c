//! Deterministic numeric primitives for lockstep simulation.
//!
//! The core is [`fix::Fix`], a Q16.16 fixed-point scalar whose arithmetic is
//! integer-only and therefore bit-identical across platforms, with the
//! transcendental functions in [`maths::fixed`] built the same way. Around it
//! sit GLSL-style generic vector types ([`vector`]) and a shader-flavoured
//! free-function facade ([`glsh`]) that work uniformly over `f32`, `f64` and
//! fixed-point elements.

pub mod fix;
pub mod glsh;
pub mod maths;
pub mod vector;

pub mod prelude {
    #[allow(unused_imports)]
    pub use num_traits;
    #[allow(unused_imports)]
    pub use tracing::{error, info, warn};

    #[allow(unused_imports)]
    pub use crate::{
        fix::{ArithmeticError, Fix},
        glsh,
        maths::{self, Scalar},
        vector::{
            Bool2, Bool3, Bool4, Double2, Double3, Double4, Fix2, Fix3, Fix4, Float2, Float3,
            Float4, Int2, Int3, Int4, UInt2, UInt3, UInt4, Vec2, Vec3, Vec4,
        },
    };
}
