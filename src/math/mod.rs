//! Math utilities module
//!
//! Re-exports the glam types used across the crate together with the matrix
//! helpers the camera and unprojection paths are built on.

mod ground;
mod matrix;
mod transform;

pub use ground::GroundPoint;
pub use matrix::{look_at, normal_matrix, perspective, transform_homogeneous, try_invert};
pub use transform::Transform;

// Re-export commonly used glam types
pub use glam::{Mat4, Vec2, Vec3, Vec4};
