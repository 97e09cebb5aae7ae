//! JSON data sources for template rendering.

use crate::{
    error::{Error, Result},
    locator::Resolver,
};
use serde_json::Value;

/// Decode resolved content as JSON.
///
/// Any JSON value is accepted, not just objects. There is no fallback:
/// malformed content is always an [`Error::DataParse`].
pub fn parse_data(content: &[u8]) -> Result<Value> {
    serde_json::from_slice(content).map_err(Error::DataParse)
}

/// Resolve a data locator and parse whatever it yields.
pub fn load_data(locator: &str, resolver: &Resolver) -> Result<Value> {
    let resolved = resolver.resolve(locator)?;
    resolved.warn_if_unresolved(locator);
    parse_data(&resolved.content)
}
