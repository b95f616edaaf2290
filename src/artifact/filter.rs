use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use super::raw_lines;
use crate::error::{ReconError, Result};

/// Copy every line of `input` containing `needle` to `output`, unmodified.
///
/// A missing `input` is a no-op: no output file, count zero.
pub fn extract_matching(input: &Path, output: &Path, needle: &str) -> Result<usize> {
    let file = match File::open(input) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path=%input.display(), "filter input missing");
            return Ok(0);
        }
        Err(e) => return Err(ReconError::artifact(input, e)),
    };

    let out = File::create(output).map_err(|e| ReconError::artifact(output, e))?;
    let mut out = BufWriter::new(out);
    let mut count = 0;
    for line in raw_lines(BufReader::new(file)) {
        let line = line.map_err(|e| ReconError::artifact(input, e))?;
        if line.contains(needle) {
            writeln!(out, "{line}").map_err(|e| ReconError::artifact(output, e))?;
            count += 1;
        }
    }
    out.flush().map_err(|e| ReconError::artifact(output, e))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_script_urls() {
        let dir = tempfile::tempdir().unwrap();
        let crawl = dir.path().join("katana.txt");
        let out = dir.path().join("jsfiles.txt");
        std::fs::write(
            &crawl,
            "https://x.com/app.js\nhttps://x.com/index.html\nhttps://x.com/main.js?v=2\n",
        )
        .unwrap();

        let count = extract_matching(&crawl, &out, ".js").unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "https://x.com/app.js\nhttps://x.com/main.js?v=2\n"
        );
    }

    #[test]
    fn keeps_whitespace_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let crawl = dir.path().join("crawl.txt");
        let out = dir.path().join("out.txt");
        std::fs::write(&crawl, "  lib.js  \nlib.js\nlib.js\nstyle.css\n").unwrap();

        assert_eq!(extract_matching(&crawl, &out, ".js").unwrap(), 3);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "  lib.js  \nlib.js\nlib.js\n");
    }

    #[test]
    fn missing_input_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("jsfiles.txt");

        assert_eq!(extract_matching(&dir.path().join("katana.txt"), &out, ".js").unwrap(), 0);
        assert!(!out.exists());
    }
}
