//! Error types shared by the resolve → parse → render pipeline.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of a single render or preview operation.
///
/// Server handlers turn these into diagnostic response bodies,
/// one-shot mode turns them into a non-zero exit.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid format. {0}")]
    DataParse(#[source] serde_json::Error),

    #[error("{0}")]
    TemplateCompile(mustache::Error),

    #[error("{0}")]
    TemplateRender(mustache::Error),

    #[error("unable to read directory `{0}`: {1}")]
    DirectoryRead(PathBuf, #[source] std::io::Error),

    #[error("file names should be in the form {{width}}x{{height}}.html, got `{0}`")]
    FrameName(String),

    #[error("unable to read `{0}`: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("unable to read response body from `{0}`: {1}")]
    Fetch(String, #[source] reqwest::Error),

    #[error("no template named `{0}`")]
    UnknownEntry(String),
}
