//! Fixed reconnaissance sequence and the driver loop that runs it.

pub mod controller;
pub mod stage;

pub use controller::{Pipeline, PipelineReport};
pub use stage::{Stage, StageKind};
