//! Remote filesystem boundary
//!
//! Uploads go through the [`RemoteFs`] trait. Remote paths are absolute,
//! `/`-separated strings. [`MirrorFs`] is the shipped transport: it maps the
//! remote tree under a local destination directory.

use std::path::{Component, Path, PathBuf};

use crate::error::DeployError;
use crate::infra::filesystem;

/// Minimal remote filesystem used by deploy
pub trait RemoteFs {
    /// Create one remote directory
    ///
    /// Returns [`DeployError::AlreadyExists`] when the directory is already
    /// there; callers treat that as success.
    fn mkdir(&mut self, remote: &str) -> Result<(), DeployError>;

    /// Upload a single local file to `remote`, replacing it if present
    fn put(&mut self, local: &Path, remote: &str) -> Result<(), DeployError>;
}

/// Transport writing the remote tree below a local directory
#[derive(Debug, Clone)]
pub struct MirrorFs {
    dest: PathBuf,
}

impl MirrorFs {
    /// Mirror remote paths under `dest`
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        Self { dest: dest.into() }
    }

    /// Local path a remote path maps to
    pub fn local_path(&self, remote: &str) -> Result<PathBuf, DeployError> {
        let mut path = self.dest.clone();
        for component in Path::new(remote).components() {
            match component {
                Component::RootDir | Component::CurDir => {}
                Component::Normal(part) => path.push(part),
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(DeployError::InvalidRemotePath {
                        remote: remote.to_string(),
                        reason: "path escapes the remote root".to_string(),
                    });
                }
            }
        }
        Ok(path)
    }
}

impl RemoteFs for MirrorFs {
    fn mkdir(&mut self, remote: &str) -> Result<(), DeployError> {
        let path = self.local_path(remote)?;
        if path.is_dir() {
            return Err(DeployError::AlreadyExists {
                remote: remote.to_string(),
            });
        }
        filesystem::create_dir_all(&path)?;
        Ok(())
    }

    fn put(&mut self, local: &Path, remote: &str) -> Result<(), DeployError> {
        let path = self.local_path(remote)?;
        std::fs::copy(local, &path).map_err(|e| DeployError::Transfer {
            local: local.to_path_buf(),
            remote: remote.to_string(),
            error: e.to_string(),
        })?;
        Ok(())
    }
}
