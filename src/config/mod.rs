//! Configuration and constants
//!
//! - [`defaults`] - Fixed names and default values
//! - [`layout`] - The explicit path layout passed into every stage

pub mod defaults;
pub mod layout;

pub use layout::PackageLayout;
