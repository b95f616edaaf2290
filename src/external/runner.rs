use async_trait::async_trait;
use std::fs::File;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::deps::SearchPath;
use crate::error::{ReconError, Result};

/// One external tool call: program, arguments and where its stdout goes.
/// `stdout: None` passes output straight to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: String,
    pub args: Vec<String>,
    pub stdout: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(tool: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { tool: tool.into(), args: args.into_iter().map(Into::into).collect(), stdout: None }
    }

    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    Success,
    Failure,
}

/// Outcome of one invocation, kept only for console reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult {
    pub tool: String,
    pub status: ExitState,
    pub error: Option<String>,
}

impl StageResult {
    pub fn success(tool: impl Into<String>) -> Self {
        Self { tool: tool.into(), status: ExitState::Success, error: None }
    }

    pub fn failure(tool: impl Into<String>, error: impl ToString) -> Self {
        Self { tool: tool.into(), status: ExitState::Failure, error: Some(error.to_string()) }
    }

    pub fn succeeded(&self) -> bool {
        self.status == ExitState::Success
    }
}

/// Seam between the pipeline and the processes it starts.
#[async_trait]
pub trait StageExecutor: Send + Sync {
    async fn execute(&self, invocation: &Invocation) -> StageResult;
}

/// Runs invocations as child processes, one attempt each, waiting for exit.
/// stderr always goes to the terminal.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    search_path: SearchPath,
}

impl ProcessExecutor {
    pub fn new(search_path: SearchPath) -> Self {
        Self { search_path }
    }

    pub async fn run(&self, invocation: &Invocation) -> Result<()> {
        let program = self
            .search_path
            .lookup(&invocation.tool)
            .unwrap_or_else(|| PathBuf::from(&invocation.tool));

        let mut cmd = Command::new(&program);
        cmd.args(&invocation.args)
            .env("PATH", self.search_path.as_os_str())
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());

        match &invocation.stdout {
            Some(path) => {
                // truncated on create; the handle is owned by `cmd` and closed when it drops
                let file = File::create(path).map_err(|e| ReconError::artifact(path, e))?;
                cmd.stdout(Stdio::from(file));
            }
            None => {
                cmd.stdout(Stdio::inherit());
            }
        }

        tracing::debug!(tool=%invocation.tool, program=%program.display(), args=?invocation.args, "spawning");
        let status = cmd
            .status()
            .await
            .map_err(|source| ReconError::Spawn { tool: invocation.tool.clone(), source })?;

        if status.success() {
            Ok(())
        } else {
            Err(ReconError::ExitStatus { tool: invocation.tool.clone(), status })
        }
    }
}

#[async_trait]
impl StageExecutor for ProcessExecutor {
    async fn execute(&self, invocation: &Invocation) -> StageResult {
        match self.run(invocation).await {
            Ok(()) => StageResult::success(&invocation.tool),
            Err(e) => {
                tracing::debug!(tool=%invocation.tool, error=%e, "stage failed");
                StageResult::failure(&invocation.tool, e)
            }
        }
    }
}
