//! Infrastructure layer
//!
//! Handles raw I/O: filesystem operations, archive writing and the remote
//! filesystem used for deploys.

pub mod archive;
pub mod filesystem;
pub mod remote;
