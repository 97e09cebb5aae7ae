//! Runtime configuration, merged from `creview.toml` and the command line.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[serve]`   | Preview server (address, static root, browser)   |
//! | `[fetch]`   | Remote locators (timeout, user agent)            |
//!
//! # Example
//!
//! ```toml
//! [serve]
//! address = "localhost:9000"
//! root = "assets"
//!
//! [fetch]
//! timeout = 10
//! ```
//!
//! The template and data locators only come from the command line.

pub mod defaults;
mod error;
mod fetch;
mod serve;

pub use error::ConfigError;
pub use fetch::FetchConfig;
pub use serve::ServeConfig;

use crate::{cli::Cli, template::TemplateSource};
use anyhow::{Result, bail};
use educe::Educe;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration, built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the template comes from, classified once at startup
    #[serde(skip)]
    pub template: TemplateSource,

    /// Data locator: file path, URL or inline JSON
    #[serde(skip)]
    pub data: String,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Remote fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Config {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Build the final configuration: optional config file, then CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = if cli.config.is_file() {
            Self::from_path(&cli.config)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        self.template = TemplateSource::detect(&cli.template);
        self.data = cli.data.clone();

        Self::update_option(&mut self.serve.address, cli.addr.as_ref());
        Self::update_option(&mut self.serve.root, cli.root.as_ref());
        Self::update_option(&mut self.serve.open, cli.open.as_ref());
        if cli.timeout.is_some() {
            self.fetch.timeout = cli.timeout;
        }

        self.serve.root = Self::normalize_path(&self.serve.root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.template.locator().is_empty() {
            bail!(ConfigError::Validation("template locator must not be empty".into()));
        }
        if self.data.is_empty() {
            bail!(ConfigError::Validation("data locator must not be empty".into()));
        }
        if self.serve.address.trim().is_empty() {
            bail!(ConfigError::Validation("[serve.address] must not be empty".into()));
        }
        if self.fetch.timeout == Some(0) {
            bail!(ConfigError::Validation(
                "[fetch.timeout] must be at least 1 second".into()
            ));
        }
        Ok(())
    }

    /// Base URL of the preview server.
    pub fn url(&self) -> String {
        format!("http://{}", self.serve.address)
    }
}

// ============================================================================
// Tests
// ============================================================================
