//! # Common Components
//!
//! Shared utilities used by the library and the `stegano` binary.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities
//! - [`logging`]: Logger setup

pub mod config;
pub mod logging;
