pub mod artifact;
pub mod config;
pub mod deps;
pub mod error;
pub mod external;
pub mod http_client;
pub mod output;
pub mod pipeline;
pub mod utils;

pub use crate::error::{ReconError, Result};
