//! Generated artifacts and the writer that puts them on disk.
//!
//! The generator only returns [`Artifact`] values. Writing is separate so callers (the CLI, build scripts, tests) can
//! inspect, diff, or discard output without touching the filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// One generated file: a path relative to the output root, and its full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Errors raised while writing artifacts.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create directory '{}': {err}", .path.display())]
    CreateDir { path: PathBuf, err: io::Error },

    #[error("failed to write '{}': {err}", .path.display())]
    Write { path: PathBuf, err: io::Error },
}

/// What a write pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Files created or replaced, relative to the output root.
    pub written: Vec<PathBuf>,
    /// Files whose contents already matched.
    pub unchanged: Vec<PathBuf>,
}

impl WriteSummary {
    /// Every file the pass produced: written ones first, then unchanged ones.
    pub fn all(&self) -> impl Iterator<Item = &PathBuf> {
        self.written.iter().chain(&self.unchanged)
    }
}

/// Writes artifacts below an output root.
///
/// A file whose current contents already equal the artifact is left untouched, so reruns do not bump modification
/// times and trigger needless C++ rebuilds.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every artifact.
    ///
    /// ## Errors
    ///
    /// Stops at the first directory or file that cannot be written.
    #[tracing::instrument(skip_all, fields(root = %self.root.display(), artifact_count = artifacts.len()))]
    pub fn write_all(&self, artifacts: &[Artifact]) -> Result<WriteSummary, WriteError> {
        let mut summary = WriteSummary::default();
        for artifact in artifacts {
            if self.write(artifact)? {
                summary.written.push(artifact.path.clone());
            } else {
                summary.unchanged.push(artifact.path.clone());
            }
        }
        tracing::info!(
            written = summary.written.len(),
            unchanged = summary.unchanged.len(),
            "artifacts written"
        );
        Ok(summary)
    }

    /// Write one artifact. Returns `false` when the file already had these contents.
    pub fn write(&self, artifact: &Artifact) -> Result<bool, WriteError> {
        let path = self.root.join(&artifact.path);
        if matches!(fs::read_to_string(&path), Ok(existing) if existing == artifact.contents) {
            tracing::debug!(path = %path.display(), "unchanged");
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| WriteError::CreateDir {
                path: parent.to_path_buf(),
                err,
            })?;
        }
        fs::write(&path, &artifact.contents).map_err(|err| WriteError::Write {
            path: path.clone(),
            err,
        })?;
        tracing::debug!(path = %path.display(), "written");
        Ok(true)
    }

    /// Write a newline-separated list of paths (relative to the output root) to `list_path`.
    pub fn write_list<'p>(&self, list_path: &Path, paths: impl IntoIterator<Item = &'p PathBuf>) -> Result<(), WriteError> {
        let mut list = String::new();
        for p in paths {
            list.push_str(&self.root.join(p).to_string_lossy());
            list.push('\n');
        }
        if let Some(parent) = list_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| WriteError::CreateDir {
                path: parent.to_path_buf(),
                err,
            })?;
        }
        fs::write(list_path, list).map_err(|err| WriteError::Write {
            path: list_path.to_path_buf(),
            err,
        })
    }
}
