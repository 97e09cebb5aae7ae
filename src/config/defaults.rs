//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    use std::path::PathBuf;

    pub fn address() -> String {
        "localhost:8080".into()
    }

    pub fn root() -> PathBuf {
        ".".into()
    }
}

// ============================================================================
// [fetch] Section Defaults
// ============================================================================

pub mod fetch {
    pub fn timeout() -> Option<u64> {
        None
    }

    pub fn user_agent() -> String {
        concat!("creview/", env!("CARGO_PKG_VERSION")).into()
    }
}
