//! Locator resolution: file, then URL, then literal text.
//!
//! A locator is whatever the user passed for `-t` or `-d`. The first strategy
//! that succeeds wins and earlier failures are never reported:
//!
//! ```text
//! "ads/300x250.html"      → File      (exists on disk)
//! "https://cdn/x.json"    → RemoteUrl (GET connected, any status)
//! "{\"name\": \"World\"}" → Literal   (the locator's own bytes)
//! ```
//!
//! An existing file always wins, even when the same string is also a valid
//! URL or valid JSON.

use crate::{
    config::FetchConfig,
    error::{Error, Result},
    log,
};
use reqwest::blocking::Client;
use std::{fs::File, io::Read};

/// How a locator was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    File,
    RemoteUrl,
    Literal,
}

/// Raw content behind a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub content: Vec<u8>,
    pub kind: Kind,
}

impl Resolved {
    fn new(content: Vec<u8>, kind: Kind) -> Self {
        Self { content, kind }
    }

    /// Warn when a locator that reads like a path or URL ended up as text,
    /// which is almost always a typo in a file name.
    pub fn warn_if_unresolved(&self, locator: &str) {
        if self.kind == Kind::Literal && looks_like_locator(locator) {
            log!("resolve"; "`{locator}` is neither a file nor a reachable URL, using it as text");
        }
    }
}

/// Single token with a path separator or extension, and no template/JSON syntax.
fn looks_like_locator(s: &str) -> bool {
    !s.is_empty()
        && !s.contains(char::is_whitespace)
        && !s.contains(['{', '}', '<', '"', '['])
        && (s.contains('/') || s.contains('.'))
}

/// Resolves locators, holding the HTTP client used for remote fetches.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: Client,
}

impl Resolver {
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client })
    }

    /// Resolve `locator` to its content.
    ///
    /// Only fails when a source was found but reading it broke halfway,
    /// e.g. the locator names a directory or the response body was cut off.
    pub fn resolve(&self, locator: &str) -> Result<Resolved> {
        if let Ok(mut file) = File::open(locator) {
            let mut content = Vec::new();
            file.read_to_end(&mut content)
                .map_err(|err| Error::Read(locator.to_owned(), err))?;
            return Ok(Resolved::new(content, Kind::File));
        }

        if let Ok(response) = self.client.get(locator).send() {
            let body = response
                .bytes()
                .map_err(|err| Error::Fetch(locator.to_owned(), err))?;
            return Ok(Resolved::new(body.to_vec(), Kind::RemoteUrl));
        }

        Ok(Resolved::new(locator.as_bytes().to_vec(), Kind::Literal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        fs, thread,
        time::{Duration, Instant},
    };
    use tempfile::TempDir;
    use tiny_http::{Response, Server};

    fn resolver() -> Resolver {
        Resolver::new(&FetchConfig::default()).unwrap()
    }

    /// Serve `body` once on a loopback port and return the URL.
    fn serve_once(body: &'static str, status: u16) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let _ = request.respond(Response::from_string(body).with_status_code(status));
            }
        });
        format!("http://127.0.0.1:{port}/data.json")
    }

    #[test]
    fn test_existing_file_resolves_as_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, b"{\"a\": 1}").unwrap();

        let resolved = resolver().resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(resolved.kind, Kind::File);
        assert_eq!(resolved.content, b"{\"a\": 1}");
    }

    #[test]
    fn test_file_wins_over_json_looking_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("{\"name\":\"x\"}");
        fs::write(&path, b"from disk").unwrap();

        let resolved = resolver().resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(resolved.kind, Kind::File);
        assert_eq!(resolved.content, b"from disk");
    }

    #[test]
    fn test_inline_text_resolves_as_literal() {
        let locator = "Hello {{name}}";
        let resolved = resolver().resolve(locator).unwrap();
        assert_eq!(resolved.kind, Kind::Literal);
        assert_eq!(resolved.content, locator.as_bytes());
    }

    #[test]
    fn test_missing_relative_path_resolves_as_literal() {
        let resolved = resolver().resolve("no/such/file.json").unwrap();
        assert_eq!(resolved.kind, Kind::Literal);
        assert_eq!(resolved.content, b"no/such/file.json");
    }

    #[test]
    fn test_unreachable_url_resolves_as_literal() {
        // Port 1 on loopback refuses connections
        let locator = "http://127.0.0.1:1/data.json";
        let resolved = resolver().resolve(locator).unwrap();
        assert_eq!(resolved.kind, Kind::Literal);
        assert_eq!(resolved.content, locator.as_bytes());
    }

    #[test]
    fn test_reachable_url_resolves_as_remote() {
        let url = serve_once("{\"remote\": true}", 200);
        let resolved = resolver().resolve(&url).unwrap();
        assert_eq!(resolved.kind, Kind::RemoteUrl);
        assert_eq!(resolved.content, b"{\"remote\": true}");
    }

    #[test]
    fn test_error_status_still_counts_as_remote() {
        let url = serve_once("gone", 404);
        let resolved = resolver().resolve(&url).unwrap();
        assert_eq!(resolved.kind, Kind::RemoteUrl);
        assert_eq!(resolved.content, b"gone");
    }

    #[test]
    fn test_timeout_gives_up_on_slow_server() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        thread::spawn(move || {
            if let Ok(request) = server.recv() {
                thread::sleep(Duration::from_secs(5));
                let _ = request.respond(Response::from_string("too late"));
            }
        });

        let resolver = Resolver::new(&FetchConfig {
            timeout: Some(1),
            ..FetchConfig::default()
        })
        .unwrap();
        let locator = format!("http://127.0.0.1:{port}/data.json");

        let started = Instant::now();
        let resolved = resolver.resolve(&locator).unwrap();
        assert!(started.elapsed() < Duration::from_secs(4));
        assert_eq!(resolved.kind, Kind::Literal);
        assert_eq!(resolved.content, locator.as_bytes());
    }

    #[test]
    fn test_looks_like_locator() {
        assert!(looks_like_locator("ads/300x250.html"));
        assert!(looks_like_locator("data.json"));
        assert!(looks_like_locator("https://cdn.example.com/data.json"));
        assert!(!looks_like_locator("Hello {{name}}"));
        assert!(!looks_like_locator(r#"{"a": 1}"#));
        assert!(!looks_like_locator("[1.5, 2]"));
        assert!(!looks_like_locator("plain"));
        assert!(!looks_like_locator(""));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_fails_to_read() {
        let dir = TempDir::new().unwrap();
        let result = resolver().resolve(dir.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Read(..))));
    }
}
