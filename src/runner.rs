//! Process layer for the external tools
//!
//! The query compiler and decoder never touch processes. [`ToolRunner`] is
//! the seam between them and whatever executes a [`Query`]:
//! - [`ProcessRunner`] spawns the real executables
//! - tests substitute canned output

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::query::Query;

/// Error running a tool
#[derive(Debug, Clone, thiserror::Error)]
pub enum RunError {
    #[error("Failed to start {program}: {reason}")]
    Spawn { program: String, reason: String },
    #[error("{program} exited with status {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("{program} wrote non UTF-8 output: {reason}")]
    InvalidOutput { program: String, reason: String },
}

/// Executes a compiled query and returns its standard output
pub trait ToolRunner {
    fn run(&self, query: &Query) -> Result<String, RunError>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, query: &Query) -> Result<String, RunError> {
        (**self).run(query)
    }
}

/// Spawns bevent/bgame/box with the events directory as their working directory
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    events_dir: PathBuf,
    bin_dir: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new(events_dir: impl Into<PathBuf>) -> Self {
        Self {
            events_dir: events_dir.into(),
            bin_dir: None,
        }
    }

    pub fn with_bin_dir(mut self, bin_dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = Some(bin_dir.into());
        self
    }

    pub fn events_dir(&self) -> &Path {
        &self.events_dir
    }

    /// Executable for a query: inside `bin_dir` when set, otherwise looked up on `PATH`
    pub fn program_path(&self, query: &Query) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(query.program()),
            None => PathBuf::from(query.program()),
        }
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, query: &Query) -> Result<String, RunError> {
        let program = self.program_path(query);
        let name = program.display().to_string();
        debug!("Running {} in {}", query, self.events_dir.display());

        let output = Command::new(&program)
            .args(query.args())
            .current_dir(&self.events_dir)
            .output()
            .map_err(|e| RunError::Spawn {
                program: name.clone(),
                reason: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(RunError::Failed {
                program: name,
                status: output
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
                stderr,
            });
        }
        if !stderr.is_empty() {
            warn!("{} ({}): {}", name, query.event_file(), stderr);
        }

        String::from_utf8(output.stdout).map_err(|e| RunError::InvalidOutput {
            program: name,
            reason: e.to_string(),
        })
    }
}
