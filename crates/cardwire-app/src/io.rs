use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Path meaning standard input or standard output.
pub const STDIO_PATH: &str = "-";

/// ## Summary
/// Reads the whole input as UTF-8; `-` reads standard input.
///
/// ## Errors
/// Returns an error if the source cannot be read or is not UTF-8.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIO_PATH {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read standard input")?;
        return Ok(input);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// ## Summary
/// Writes `text` to `path`, or to standard output when no path (or `-`) is given.
///
/// ## Errors
/// Returns an error if the destination cannot be written.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path.filter(|p| p.as_os_str() != STDIO_PATH) {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write standard output")
        }
    }
}
