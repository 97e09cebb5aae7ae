//! Opening URLs in the user's browser.
//!
//! Uses the platform's opener command, located with `which`:
//! `open` on macOS, `cmd /C start` on Windows, `xdg-open` elsewhere.

use crate::log;
use anyhow::{Context, Result, bail};
use std::{
    path::PathBuf,
    process::{Command, Stdio},
    thread,
};

/// Opener program and the arguments that go before the URL.
#[cfg(target_os = "macos")]
const OPENER: (&str, &[&str]) = ("open", &[]);
#[cfg(windows)]
const OPENER: (&str, &[&str]) = ("cmd", &["/C", "start", ""]);
#[cfg(not(any(target_os = "macos", windows)))]
const OPENER: (&str, &[&str]) = ("xdg-open", &[]);

/// Open `url` on a detached thread.
///
/// Never blocks the caller; failures are only logged.
pub fn open_in_background(url: String) {
    thread::spawn(move || {
        if let Err(err) = open(&url) {
            log!("open"; "unable to open {url}: {err:#}");
        }
    });
}

/// Open `url` and wait for the opener to exit.
pub fn open(url: &str) -> Result<()> {
    let (program, args) = OPENER;
    let path: PathBuf =
        which::which(program).with_context(|| format!("`{program}` not found"))?;

    let status = Command::new(&path)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to execute `{program}`"))?;

    if !status.success() {
        bail!("`{program}` exited with {status}");
    }
    Ok(())
}
