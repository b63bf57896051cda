//! Common utilities module
//!
//! This module contains shared utilities used across the canopy pipeline
//! and the correlation workflow.

pub mod error;

pub use error::{CanopyError, Result};
