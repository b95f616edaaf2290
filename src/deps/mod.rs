//! Dependency bootstrap: required tools on the search path plus the
//! auxiliary secret-scanner script.

pub mod resolver;
pub mod script;
pub mod search_path;
pub mod tools;

pub use resolver::{DependencyResolver, ToolReport, ToolStatus};
pub use script::{ScriptFetcher, ScriptStatus};
pub use search_path::SearchPath;
pub use tools::{RenameRule, ToolSpec, HTTPX_RENAME, REQUIRED_TOOLS};
