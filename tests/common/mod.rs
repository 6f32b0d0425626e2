//! Common test utilities and fixtures for docblock-engine integration tests
//!
//! This module provides:
//! - `Workspace` builder for temporary config and source files
//! - CLI runners that pin the configuration file for deterministic output
//! - Custom assertions for rendered blocks and JSON output

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod assertions;
pub mod workspace;

pub use assertions::*;
pub use workspace::Workspace;
