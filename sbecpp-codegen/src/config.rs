//! Generator configuration.

use crate::naming::DEFAULT_EXTENSION;
use std::path::{Path, PathBuf};

/// Default name of the umbrella header.
pub const DEFAULT_UMBRELLA_NAME: &str = "schema.h";

/// Builder-style generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    output_dir: PathBuf,
    extension: String,
    umbrella_name: String,
    jobs: usize,
}

impl GeneratorConfig {
    /// Creates a configuration writing into `output_dir` with default
    /// settings.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            umbrella_name: DEFAULT_UMBRELLA_NAME.to_string(),
            jobs: 1,
        }
    }

    /// Sets the header extension (without the dot).
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the umbrella header file name.
    #[must_use]
    pub fn umbrella_name(mut self, name: impl Into<String>) -> Self {
        self.umbrella_name = name.into();
        self
    }

    /// Sets the number of writer threads. Zero is treated as one.
    #[must_use]
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Header extension.
    #[must_use]
    pub fn header_extension(&self) -> &str {
        &self.extension
    }

    /// Umbrella header file name.
    #[must_use]
    pub fn umbrella(&self) -> &str {
        &self.umbrella_name
    }

    /// Number of writer threads.
    #[must_use]
    pub const fn job_count(&self) -> usize {
        self.jobs
    }
}
