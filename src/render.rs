//! One-shot rendering to stdout.

use crate::{
    config::Config,
    data::load_data,
    locator::Resolver,
    preview::{FrameSource, PreviewDocument},
    template::Parsed,
};
use anyhow::{Context, Result};

/// Resolve, parse and render once.
///
/// A single template is rendered against the data. A template directory
/// becomes a self-contained preview page whose frames embed each file's raw
/// source; the data is still parsed and must be valid.
pub fn render_once(config: &Config, resolver: &Resolver) -> Result<String> {
    let template = config
        .template
        .parse(resolver)
        .context("Unable to parse template.")?;
    let data = load_data(&config.data, resolver).context("Unable to parse data.")?;

    let output = match template {
        Parsed::Single(template) => template.render(&data),
        Parsed::Directory(set) => {
            PreviewDocument::compose(&set, FrameSource::Inline).and_then(|doc| doc.render())
        }
    };
    output.context("Unable to render template.")
}

/// Render once and print the result.
pub fn render_to_stdout(config: &Config, resolver: &Resolver) -> Result<()> {
    let output = render_once(config, resolver)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::FetchConfig, template::TemplateSource};
    use std::fs;
    use tempfile::TempDir;

    fn config(template: TemplateSource, data: &str) -> Config {
        Config {
            template,
            data: data.into(),
            ..Config::default()
        }
    }

    fn resolver() -> Resolver {
        Resolver::new(&FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_render_inline() {
        let config = config(
            TemplateSource::Single("Hello {{name}}".into()),
            r#"{"name":"World"}"#,
        );
        assert_eq!(render_once(&config, &resolver()).unwrap(), "Hello World");
    }

    #[test]
    fn test_render_files() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("ad.html");
        let data = dir.path().join("data.json");
        fs::write(&template, "<a href=\"{{url}}\">{{label}}</a>").unwrap();
        fs::write(&data, r#"{"url": "/buy", "label": "Buy"}"#).unwrap();

        let config = config(
            TemplateSource::detect(template.to_str().unwrap()),
            data.to_str().unwrap(),
        );
        assert_eq!(
            render_once(&config, &resolver()).unwrap(),
            "<a href=\"/buy\">Buy</a>"
        );
    }

    #[test]
    fn test_invalid_data_is_fatal() {
        let config = config(TemplateSource::Single("Hello".into()), "{\"a\":");
        let err = render_once(&config, &resolver()).unwrap_err();

        assert_eq!(err.to_string(), "Unable to parse data.");
        assert!(format!("{err:#}").contains("Invalid format."));
    }

    #[test]
    fn test_invalid_template_is_fatal() {
        let config = config(TemplateSource::Single("{{#x}}".into()), "{}");
        let err = render_once(&config, &resolver()).unwrap_err();
        assert_eq!(err.to_string(), "Unable to parse template.");
    }

    #[test]
    fn test_directory_renders_inline_preview() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("300x250.html"), "Hello {{name}}").unwrap();
        fs::write(dir.path().join("728x90.html"), "Bye {{name}}").unwrap();

        let config = config(
            TemplateSource::Directory(dir.path().to_path_buf()),
            r#"{"name":"World"}"#,
        );
        let html = render_once(&config, &resolver()).unwrap();

        assert_eq!(html.matches("src=\"data:text/html;base64,").count(), 2);
        assert!(html.contains(r#"width="728px" height="90px""#));
        assert!(!html.contains("Hello World"));
    }

    #[test]
    fn test_directory_preview_does_not_compile_entries() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("300x250.html"), "{{#open}}never closed").unwrap();

        let config = config(TemplateSource::Directory(dir.path().to_path_buf()), "{}");
        let html = render_once(&config, &resolver()).unwrap();
        assert_eq!(html.matches("<iframe").count(), 1);
    }

    #[test]
    fn test_directory_with_bad_name_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("badname.html"), "x").unwrap();

        let config = config(TemplateSource::Directory(dir.path().to_path_buf()), "{}");
        let err = render_once(&config, &resolver()).unwrap_err();
        assert!(format!("{err:#}").contains("{width}x{height}"));
    }
}
