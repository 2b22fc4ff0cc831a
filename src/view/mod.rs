//! Camera, lens and pointer unprojection.

pub mod camera;
pub mod projection;
pub mod unproject;

pub use camera::{Direction, OrbitCamera};
pub use projection::Projection;
pub use unproject::{pointer_ray, unproject_to_ground, Ray, UnprojectError};
