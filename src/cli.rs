//! Command-line interface definitions.
//!
//! Defines all CLI arguments using clap.

use clap::Parser;
use std::path::PathBuf;

/// Render a mustache-style creative against JSON data, once or over HTTP
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// The creative template: a file, a directory of `{width}x{height}.html`
    /// files, a URL, or the template text itself
    #[arg(short, long)]
    pub template: String,

    /// The data to populate the template with: a JSON file, a URL, or inline JSON
    #[arg(short, long)]
    pub data: String,

    /// Serve the template using HTTP instead of printing it
    #[arg(short, long)]
    pub serve: bool,

    /// Server address (default: localhost:8080)
    #[arg(short, long)]
    pub addr: Option<String>,

    /// Static file root for paths the server doesn't handle itself
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Timeout in seconds for fetching remote templates and data
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Open the preview in a browser when serving
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub open: Option<bool>,

    /// Config file name (default: creview.toml)
    #[arg(short = 'C', long, default_value = "creview.toml")]
    pub config: PathBuf,
}
