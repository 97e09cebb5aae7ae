//! Preview server.
//!
//! A small HTTP server built on `tiny_http`. Every request is handled on its
//! own thread and re-reads its template and data from scratch, so edits show
//! up on the next reload.
//!
//! | Path        | Mode      | Response                                     |
//! |-------------|-----------|----------------------------------------------|
//! | `/t`        | single    | the template rendered against the data       |
//! | `/d/{name}` | directory | one file of the directory, rendered          |
//! | `/p`        | directory | preview page with one `<iframe>` per file    |
//! | anything    | both      | static file from `[serve.root]`              |
//!
//! Handler failures are reported as a plain-text body with status 200.

use crate::{
    config::Config,
    data::load_data,
    error::Error,
    locator::Resolver,
    log,
    preview::{FrameSource, PreviewDocument},
    template::{TemplateSet, TemplateSource, parse_template},
    utils::browser,
};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Cursor,
    path::{Component, Path, PathBuf},
    sync::Arc,
    thread,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Directory listing HTML template (embedded at compile time)
const DIRECTORY_TEMPLATE: &str = include_str!("embed/serve/directory.html");

/// Body for endpoints that don't apply to the configured template source.
const NOT_ALLOWED: &str = "This endpoint is not allowed";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the preview server and block until Ctrl+C.
///
/// A browser is pointed at the landing page unless `[serve.open]` is off;
/// that happens on its own thread and can't hold up the listener.
pub fn serve_preview(config: &'static Config, resolver: &'static Resolver) -> Result<()> {
    let server = Arc::new(bind(&config.serve.address)?);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    let landing = format!("{}{}", config.url(), config.template.landing_path());
    log!("serve"; "{landing}");

    if config.serve.open {
        browser::open_in_background(landing);
    }

    run(&server, config, resolver);
    Ok(())
}

/// Bind the listener.
fn bind(address: &str) -> Result<Server> {
    Server::http(address).map_err(|err| anyhow!("Failed to bind {address}: {err}"))
}

/// Accept requests until the server is unblocked, one thread per request.
fn run(server: &Server, config: &'static Config, resolver: &'static Resolver) {
    for request in server.incoming_requests() {
        thread::spawn(move || {
            if let Err(e) = handle_request(request, config, resolver) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

// ============================================================================
// Request Handling
// ============================================================================

/// What a request is answered with.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Html(String),
    Text(String),
    File(PathBuf),
    NotFound,
}

impl From<Result<String, String>> for Reply {
    fn from(result: Result<String, String>) -> Self {
        match result {
            Ok(html) => Self::Html(html),
            Err(message) => Self::Text(message),
        }
    }
}

fn handle_request(request: Request, config: &Config, resolver: &Resolver) -> Result<()> {
    log!("request"; "{} {}", request.method(), request.url());
    let reply = route(request.url(), config, resolver);
    respond(request, reply)
}

/// Pick the handler for a raw request URL.
fn route(url: &str, config: &Config, resolver: &Resolver) -> Reply {
    // Strip query string (e.g., ?t=123456) before decoding
    let raw_path = url.split('?').next().unwrap_or(url);
    let path = urlencoding::decode(raw_path)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| raw_path.to_owned());

    match path.as_str() {
        "/t" => render_single(config, resolver).into(),
        "/p" => render_preview(config).into(),
        _ => match path.strip_prefix("/d/") {
            Some(name) => render_entry(name, config, resolver).into(),
            None => serve_static(&config.serve.root, &path),
        },
    }
}

// ============================================================================
// Template Endpoints
// ============================================================================

/// `/t`: the configured single template.
fn render_single(config: &Config, resolver: &Resolver) -> Result<String, String> {
    let TemplateSource::Single(locator) = &config.template else {
        return Err(NOT_ALLOWED.into());
    };
    let template = parse_template(locator, resolver)
        .map_err(|err| format!("Unable to parse template. {err}"))?;
    let data = load_data(&config.data, resolver)
        .map_err(|err| format!("Unable to parse data. {err}"))?;
    template
        .render(&data)
        .map_err(|err| format!("Unable to render template. {err}"))
}

/// `/d/{name}`: one file of the template directory.
fn render_entry(name: &str, config: &Config, resolver: &Resolver) -> Result<String, String> {
    let TemplateSource::Directory(dir) = &config.template else {
        return Err(NOT_ALLOWED.into());
    };
    let template = load_set(dir)?
        .compile(name)
        .map_err(|err| format!("Unable to parse template. {err}"))?;
    let data = load_data(&config.data, resolver)
        .map_err(|err| format!("Unable to parse data. {err}"))?;
    template
        .render(&data)
        .map_err(|err| format!("Unable to render template. {err}"))
}

/// `/p`: the preview page, frames pointing back at `/d/{name}`.
///
/// Only file names matter here; no entry is compiled.
fn render_preview(config: &Config) -> Result<String, String> {
    let TemplateSource::Directory(dir) = &config.template else {
        return Err(NOT_ALLOWED.into());
    };
    let set = load_set(dir)?;
    PreviewDocument::compose(&set, FrameSource::Hosted)
        .and_then(|doc| doc.render())
        .map_err(|err| format!("Unable to compose preview. {err}"))
}

fn load_set(dir: &Path) -> Result<TemplateSet, String> {
    TemplateSet::load(dir).map_err(|err| match err {
        Error::DirectoryRead(..) => format!("Unable to read template directory. {err}"),
        _ => format!("Unable to parse template. {err}"),
    })
}

// ============================================================================
// Static Files
// ============================================================================

/// Fallback for every other path.
///
/// Request resolution order:
/// 1. Exact file match → serve file
/// 2. Directory with index.html → serve index.html
/// 3. Directory without index.html → generate listing
/// 4. Nothing found → 404
fn serve_static(root: &Path, path: &str) -> Reply {
    let request_path = path.trim_matches('/');

    // Never leave the static root
    if Path::new(request_path)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Reply::NotFound;
    }

    let local_path = root.join(request_path);

    if local_path.is_file() {
        return Reply::File(local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return Reply::File(index_path);
        }
        if let Ok(listing) = generate_directory_listing(&local_path, request_path) {
            return Reply::Html(listing);
        }
    }

    Reply::NotFound
}

/// Generate HTML directory listing for browsing.
///
/// Hidden files (starting with '.') are left out.
fn generate_directory_listing(dir_path: &Path, request_path: &str) -> std::io::Result<String> {
    let mut names: Vec<(String, bool)> = fs::read_dir(dir_path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            (entry.file_name().to_string_lossy().into_owned(), is_dir)
        })
        .filter(|(name, _)| !name.starts_with('.'))
        .collect();
    names.sort();

    let entries: Vec<String> = names
        .iter()
        .map(|(name, is_dir)| {
            let icon = if *is_dir { "📁" } else { "📄" };
            let href = if request_path.is_empty() {
                format!("/{}", urlencoding::encode(name))
            } else {
                format!("/{request_path}/{}", urlencoding::encode(name))
            };
            let name = html_escape::encode_text(name);
            format!(r#"<li><span class="icon">{icon}</span><a href="{href}">{name}</a></li>"#)
        })
        .collect();

    // Generate parent link if not at root
    let parent_link = if request_path.is_empty() {
        String::new()
    } else {
        let parent_path = Path::new(request_path)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!(
            r#"<li class="parent"><span class="icon">📂</span><a href="/{parent_path}">..</a></li>"#
        )
    };

    #[allow(clippy::literal_string_with_formatting_args)]
    // These are template placeholders, not format args
    Ok(DIRECTORY_TEMPLATE
        .replace("{path}", &html_escape::encode_text(request_path))
        .replace("{parent_link}", &parent_link)
        .replace("{entries}", &entries.join("\n            ")))
}

// ============================================================================
// Response Helpers
// ============================================================================

fn respond(request: Request, reply: Reply) -> Result<()> {
    match reply {
        Reply::Html(body) => serve_body(request, body, "text/html; charset=utf-8"),
        Reply::Text(body) => serve_body(request, body, "text/plain; charset=utf-8"),
        Reply::File(path) => serve_file(request, &path),
        Reply::NotFound => serve_not_found(request),
    }
}

fn content_type(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("invalid header `{value}`"))
}

fn serve_body(request: Request, body: String, mime: &str) -> Result<()> {
    let response = Response::from_data(body.into_bytes()).with_header(content_type(mime)?);
    request.respond(response)?;
    Ok(())
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response =
        Response::from_data(content).with_header(content_type(guess_content_type(path))?);
    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let body = "404 Not Found";
    let response = Response::new(
        StatusCode(404),
        vec![content_type("text/plain")?],
        Cursor::new(body),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Media
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",

        _ => "application/octet-stream",
    }
}

// ============================================================================
// Tests
// ============================================================================
