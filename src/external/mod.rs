pub mod runner;
pub mod tools;

pub use runner::{ExitState, Invocation, ProcessExecutor, StageExecutor, StageResult};
