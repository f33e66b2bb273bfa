//! Error types for dkpkg
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to list directory contents
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Archive creation errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Directory traversal failed
    #[error("Failed to walk '{path}': {error}")]
    Walk { path: PathBuf, error: String },

    /// File lies outside the archive root
    #[error("'{path}' is not inside archive root '{root}'")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// Entry name is not valid UTF-8
    #[error("Entry path '{path}' is not valid UTF-8")]
    InvalidEntryName { path: PathBuf },

    /// Zip writer error
    #[error("Failed to write archive '{archive}': {error}")]
    Write { archive: PathBuf, error: String },

    /// Underlying filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Errors that abort the merged manifest stage
#[derive(Error, Debug)]
pub enum MergeError {
    /// Ordering file does not exist
    #[error("Ordering file not found: {path}")]
    OrderFileNotFound { path: PathBuf },

    /// Ordering file is not a JSON array of names
    #[error("Ordering file '{path}' must be a JSON array of application names: {error}")]
    OrderFileInvalid { path: PathBuf, error: String },

    /// Writing the merged manifest failed
    #[error("Failed to write merged manifest: {0}")]
    Output(#[from] FilesystemError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Workspace root does not exist
    #[error("Workspace root not found: {path}")]
    RootNotFound { path: PathBuf },
}

/// Deploy (upload) errors
#[derive(Error, Debug)]
pub enum DeployError {
    /// Remote directory already exists (non-fatal for callers)
    #[error("Remote directory already exists: {remote}")]
    AlreadyExists { remote: String },

    /// Remote path cannot be mapped by the transport
    #[error("Invalid remote path '{remote}': {reason}")]
    InvalidRemotePath { remote: String, reason: String },

    /// Transfer failed
    #[error("Failed to upload '{local}' to '{remote}': {error}")]
    Transfer {
        local: PathBuf,
        remote: String,
        error: String,
    },

    /// Local filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}
