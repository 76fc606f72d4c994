//! Workflow commands and step outputs, following the GitHub Actions runner conventions.

use anyhow::{bail, Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Where `set` writes step outputs.
pub struct Outputs {
    path: Option<PathBuf>,
}

impl Outputs {
    /// `None` prints outputs to stdout instead of the runner's output file.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        let Some(path) = &self.path else {
            println!("{}={}", name, value);
            return Ok(());
        };

        let entry = format_output(name, value, &format!("ghadelimiter_{}", Uuid::new_v4()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output file {}", path.display()))?;
        file.write_all(entry.as_bytes())
            .with_context(|| format!("Failed to write output '{}'", name))?;
        Ok(())
    }
}

/// Multi-line safe `name<<delimiter` form understood by the runner.
pub fn format_output(name: &str, value: &str, delimiter: &str) -> Result<String> {
    if name.contains(delimiter) || value.contains(delimiter) {
        bail!("Output '{}' contains its delimiter", name);
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

/// Marks the step as failed with a single message.
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
