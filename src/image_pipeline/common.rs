//! Common utilities module
//!
//! This module contains shared utilities used across the map pipelines.

pub mod error;

pub use error::{MapError, Result};
