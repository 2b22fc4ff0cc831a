//! Chain following module
//!
//! Segment chain types and the single-pass follow solver.

pub mod chain;
pub mod segment;
pub mod solver;

pub use chain::{Chain, ChainBuilder};
pub use segment::Segment;
pub use solver::{FollowSolver, StepReport};
