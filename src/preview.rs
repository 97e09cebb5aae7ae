//! Preview pages for template directories.
//!
//! Every file in a template directory is named after the slot it fills,
//! `{width}x{height}.ext`. The preview page shows each one in an `<iframe>`
//! of exactly that size:
//!
//! ```text
//! ads/300x250.html  →  <iframe src="/d/300x250.html" width="300px" height="250px">
//! ads/728x90.html   →  <iframe src="/d/728x90.html"  width="728px" height="90px">
//! ```
//!
//! Hosted frames point at the server's `/d/{name}` endpoint and are rendered
//! when the browser loads them. Inline frames embed the file's raw source as
//! a `data:` URL, so the page works without a server but shows unrendered
//! placeholders.

use crate::{
    error::{Error, Result},
    template::{CompiledTemplate, TemplateSet},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Serialize;

/// Preview layout (embedded at compile time)
const PREVIEW_TEMPLATE: &str = include_str!("embed/preview.html");

/// Display metadata of one template file, parsed from its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameDescriptor {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl FrameDescriptor {
    /// Parse `{width}x{height}.ext`.
    ///
    /// The stem ends at the first `.`; a name without one is all stem.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let stem = name.split_once('.').map_or(name, |(stem, _)| stem);
        let invalid = || Error::FrameName(name.to_owned());

        let mut dims = stem.split('x');
        let (Some(width), Some(height), None) = (dims.next(), dims.next(), dims.next()) else {
            return Err(invalid());
        };

        Ok(Self {
            name: name.to_owned(),
            width: width.parse().map_err(|_| invalid())?,
            height: height.parse().map_err(|_| invalid())?,
        })
    }

    /// Path of the server endpoint rendering this file.
    pub fn url(&self) -> String {
        format!("/d/{}", urlencoding::encode(&self.name))
    }
}

/// What an `<iframe>` loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSource {
    /// Relative URL of the `/d/{name}` endpoint
    Hosted,
    /// `data:` URL holding the file's raw, unrendered source
    Inline,
}

/// A frame ready to be placed on the preview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    #[serde(flatten)]
    pub descriptor: FrameDescriptor,
    pub src: String,
}

/// The aggregate preview page, one frame per template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewDocument {
    pub frames: Vec<Frame>,
}

impl PreviewDocument {
    /// Build the frames for every entry of `set`, in the set's order.
    ///
    /// One badly named file fails the whole preview.
    pub fn compose(set: &TemplateSet, source: FrameSource) -> Result<Self> {
        let frames = set
            .entries()
            .iter()
            .map(|entry| {
                let descriptor = FrameDescriptor::from_file_name(&entry.name)?;
                let src = match source {
                    FrameSource::Hosted => descriptor.url(),
                    FrameSource::Inline => {
                        format!("data:text/html;base64,{}", STANDARD.encode(&entry.source))
                    }
                };
                Ok(Frame { descriptor, src })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { frames })
    }

    /// Render the preview page as HTML.
    pub fn render(&self) -> Result<String> {
        CompiledTemplate::compile(PREVIEW_TEMPLATE)?.render(self)
    }
}
