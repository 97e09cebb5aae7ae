//! Template sources and compilation.
//!
//! A template locator is classified once, at startup, into a
//! [`TemplateSource`]:
//!
//! - [`TemplateSource::Single`]: a file, URL or inline text, resolved through
//!   the [`Resolver`] and compiled into one [`CompiledTemplate`]
//! - [`TemplateSource::Directory`]: a local directory listed into a
//!   [`TemplateSet`]; an entry is only compiled when it is asked for
//!
//! Templates use mustache syntax: `{{var}}`, `{{{raw}}}`, sections,
//! inverted sections and `{{.}}`.
//!
//! Nothing is cached: every call re-reads and re-compiles its sources, so a
//! saved file shows up on the next render.

use crate::{
    error::{Error, Result},
    locator::Resolver,
};
use serde::Serialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Template Source
// ============================================================================

/// Where templates come from, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Single(String),
    Directory(PathBuf),
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl TemplateSource {
    /// Classify a locator. Only an existing local directory is directory mode.
    pub fn detect(locator: &str) -> Self {
        let path = Path::new(locator);
        if !locator.is_empty() && path.is_dir() {
            Self::Directory(path.to_path_buf())
        } else {
            Self::Single(locator.to_owned())
        }
    }

    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// The locator as the user wrote it.
    pub fn locator(&self) -> String {
        match self {
            Self::Single(locator) => locator.clone(),
            Self::Directory(path) => path.to_string_lossy().into_owned(),
        }
    }

    /// Server path a browser should land on.
    pub const fn landing_path(&self) -> &'static str {
        if self.is_directory() { "/p" } else { "/t" }
    }

    /// Load everything this source refers to.
    ///
    /// A single template is compiled; a directory is only listed.
    pub fn parse(&self, resolver: &Resolver) -> Result<Parsed> {
        match self {
            Self::Single(locator) => parse_template(locator, resolver).map(Parsed::Single),
            Self::Directory(dir) => TemplateSet::load(dir).map(Parsed::Directory),
        }
    }
}

/// Result of parsing a [`TemplateSource`].
#[derive(Debug)]
pub enum Parsed {
    Single(CompiledTemplate),
    Directory(TemplateSet),
}

// ============================================================================
// Single Template
// ============================================================================

/// One compiled template, ready to render against any context.
pub struct CompiledTemplate {
    template: mustache::Template,
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate").finish_non_exhaustive()
    }
}

impl CompiledTemplate {
    pub fn compile(source: &str) -> Result<Self> {
        let template = mustache::compile_str(source).map_err(Error::TemplateCompile)?;
        Ok(Self { template })
    }

    pub fn render<T: Serialize>(&self, context: &T) -> Result<String> {
        self.template
            .render_to_string(context)
            .map_err(Error::TemplateRender)
    }
}

/// Resolve a locator and compile whatever it yields.
///
/// Literal fallback means this never fails to *find* a template, only to
/// read or compile one.
pub fn parse_template(locator: &str, resolver: &Resolver) -> Result<CompiledTemplate> {
    let resolved = resolver.resolve(locator)?;
    resolved.warn_if_unresolved(locator);
    CompiledTemplate::compile(&String::from_utf8_lossy(&resolved.content))
}

// ============================================================================
// Template Directory
// ============================================================================

/// A file in a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub name: String,
    /// Raw file content, kept for self-contained previews
    pub source: Vec<u8>,
}

impl TemplateEntry {
    pub fn compile(&self) -> Result<CompiledTemplate> {
        CompiledTemplate::compile(&String::from_utf8_lossy(&self.source))
    }
}

/// The files of a template directory, addressable by file name.
///
/// Listing never compiles anything, so a broken file only fails when it is
/// the one being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    entries: Vec<TemplateEntry>,
}

impl TemplateSet {
    /// Read the immediate files of `dir`.
    ///
    /// Sub-directories and dot-files are skipped. Entries are sorted by name
    /// so previews come out in the same order on every platform.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .map_err(|err| Error::DirectoryRead(dir.to_path_buf(), err))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();

        let entries = names
            .into_iter()
            .map(|name| {
                let path = dir.join(&name);
                let source = fs::read(&path)
                    .map_err(|err| Error::Read(path.to_string_lossy().into_owned(), err))?;
                Ok(TemplateEntry { name, source })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&TemplateEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Compile the entry called `name`, and nothing else.
    pub fn compile(&self, name: &str) -> Result<CompiledTemplate> {
        self.get(name)
            .ok_or_else(|| Error::UnknownEntry(name.to_owned()))?
            .compile()
    }
}

// ============================================================================
// Tests
// ============================================================================
