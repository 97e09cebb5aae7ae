//! `[serve]` section configuration.
//!
//! Contains preview server settings.

use super::defaults;
use educe::Educe;
use serde::Deserialize;
use std::path::PathBuf;

/// `[serve]` section in creview.toml - preview server settings.
///
/// # Example
/// ```toml
/// [serve]
/// address = "0.0.0.0:3000"  # Listen on all interfaces
/// root = "assets"           # Static files for unmatched paths
/// open = false              # Don't launch a browser
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Address the listener binds to (default: `localhost:8080`).
    #[serde(default = "defaults::serve::address")]
    #[educe(Default = defaults::serve::address())]
    pub address: String,

    /// Root directory for the static file fallback.
    #[serde(default = "defaults::serve::root")]
    #[educe(Default = defaults::serve::root())]
    pub root: PathBuf,

    /// Open the landing page in a browser once the server starts.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub open: bool,
}
