use ahash::AHashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::raw_lines;
use crate::error::{ReconError, Result};

/// Union of every non-empty trimmed line across `inputs`, written to `output`.
///
/// Missing inputs are skipped. Output order follows set iteration and is not
/// stable between runs. Returns the number of lines written.
pub fn merge_unique(inputs: &[PathBuf], output: &Path) -> Result<usize> {
    let mut lines: AHashSet<String> = AHashSet::new();

    for input in inputs {
        let file = match File::open(input) {
            Ok(f) => f,
            Err(e) => {
                tracing::debug!(path=%input.display(), error=%e, "merge input skipped");
                continue;
            }
        };
        for line in raw_lines(BufReader::new(file)) {
            let line = line.map_err(|e| ReconError::artifact(input, e))?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.insert(trimmed.to_string());
            }
        }
    }

    let out = File::create(output).map_err(|e| ReconError::artifact(output, e))?;
    let mut out = BufWriter::new(out);
    for line in &lines {
        writeln!(out, "{line}").map_err(|e| ReconError::artifact(output, e))?;
    }
    out.flush().map_err(|e| ReconError::artifact(output, e))?;

    tracing::debug!(output=%output.display(), count = lines.len(), "merged artifacts");
    Ok(lines.len())
}
