use std::path::PathBuf;

use crate::artifact::Artifact;
use crate::external::Invocation;

/// What a stage does. Command stages go through the executor; merge and
/// filter stages transform artifacts in-process.
#[derive(Debug, Clone)]
pub enum StageKind {
    Command { invocation: Invocation, reads: Option<Artifact>, writes: Option<Artifact> },
    Merge { inputs: Vec<Artifact>, output: Artifact },
    Filter { input: Artifact, output: Artifact, needle: String },
    /// One interpreter run per non-blank line of `input`, output to the terminal.
    ScanEach { input: Artifact, interpreter: String, script: PathBuf },
}

#[derive(Debug, Clone)]
pub struct Stage {
    /// Position in the fixed sequence; stage 1 has two entries.
    pub step: u8,
    pub title: &'static str,
    pub kind: StageKind,
}

impl Stage {
    pub fn new(step: u8, title: &'static str, kind: StageKind) -> Self {
        Self { step, title, kind }
    }

    pub fn command(step: u8, title: &'static str, invocation: Invocation) -> Self {
        Self::new(step, title, StageKind::Command { invocation, reads: None, writes: None })
    }

    pub fn reads(mut self, artifact: Artifact) -> Self {
        if let StageKind::Command { reads, .. } = &mut self.kind {
            *reads = Some(artifact);
        }
        self
    }

    pub fn writes(mut self, artifact: Artifact) -> Self {
        if let StageKind::Command { writes, .. } = &mut self.kind {
            *writes = Some(artifact);
        }
        self
    }

    pub fn inputs(&self) -> Vec<Artifact> {
        match &self.kind {
            StageKind::Command { reads, .. } => reads.iter().copied().collect(),
            StageKind::Merge { inputs, .. } => inputs.clone(),
            StageKind::Filter { input, .. } | StageKind::ScanEach { input, .. } => vec![*input],
        }
    }

    pub fn output(&self) -> Option<Artifact> {
        match &self.kind {
            StageKind::Command { writes, .. } => *writes,
            StageKind::Merge { output, .. } | StageKind::Filter { output, .. } => Some(*output),
            StageKind::ScanEach { .. } => None,
        }
    }
}
