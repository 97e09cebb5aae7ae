//! Utility modules.

pub mod browser;
