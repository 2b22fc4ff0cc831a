//! # snake-follow
//!
//! A chain of cubes that chases the point on the ground under the mouse
//! cursor, viewed through a keyboard-driven orbit camera and rendered with
//! WebGPU.
//!
//! ## Features
//! - Single-pass follow solver: the head moves toward the target at a fixed
//!   speed, every other segment stays within spacing of its leader
//! - Orbit camera with clamped pitch and optional per-axis position clamp
//! - Pointer unprojection onto the ground plane
//! - Flat or Phong shading behind a small [`RenderBackend`] trait
//! - Cross-platform: Native + WASM support
//!
//! ## Example
//! ```rust,ignore
//! use snake_follow::{Chain, FollowSolver, GroundPoint};
//!
//! let mut chain = Chain::builder().segment_count(10).spacing(1.0).speed(0.1).build()?;
//! let report = FollowSolver::step(&mut chain, GroundPoint::new(5.0, 0.0));
//! println!("head moved: {}, corrected: {}", report.head_moved, report.corrected);
//! ```

pub mod config;
pub mod frame;
pub mod ik;
pub mod input;
pub mod math;
pub mod render;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, SceneConfig};
pub use frame::Scene;
pub use ik::{Chain, ChainBuilder, FollowSolver, Segment, StepReport};
pub use math::{GroundPoint, Transform};
pub use render::{FrameScheduler, GeometryHandle, LightingModel, MeshData, RenderBackend};
pub use view::{Direction, OrbitCamera, Projection, UnprojectError};
