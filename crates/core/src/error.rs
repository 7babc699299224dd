use std::path::PathBuf;

use thiserror::Error;

/// No `.xcodeproj` bundle in the searched directory.
#[derive(Debug, Error)]
#[error("No .xcodeproj bundle found in {}", searched.display())]
pub struct NotFoundError {
    pub searched: PathBuf,
}

/// More than one `.xcodeproj` bundle while strict bundle matching is enabled.
#[derive(Debug, Error)]
#[error(
    "Found {} .xcodeproj bundles in {}: {}",
    candidates.len(),
    searched.display(),
    candidates.join(", ")
)]
pub struct AmbiguousBundleError {
    pub searched: PathBuf,
    pub candidates: Vec<String>,
}

/// Failures raised while reading, parsing, editing or writing a project descriptor.
#[derive(Debug, Error)]
pub enum DescriptorIoError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Cannot edit {}: {message}", path.display())]
    Edit { path: PathBuf, message: String },
}
