//! Vector and matrix types.

pub mod matrix;
pub mod vec2;
pub mod vec3;

pub use matrix::{DomainError, Matrix};
pub use vec2::{Vec2, Vec2i};
pub use vec3::Vec3;
