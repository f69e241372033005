use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use kotobuki::content::{
    content_complexity, default_content, generate_paragraphs, merge_content, validate_content,
};
use kotobuki::{
    ContentConfig, ContentKind, ContentStyle, InteractionMode, Kotobuki, Locale, RenderOptions,
    TemplateLoader,
};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "kotobuki")]
#[command(about = "Render wedding invitation templates to HTML")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a template JSON file against a wedding data JSON file
    Render {
        /// Template JSON file
        #[arg(long, value_name = "FILE")]
        template: PathBuf,

        /// Wedding data JSON file
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// Write the HTML here instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Locale for dates and times (zh-CN or en-US)
        #[arg(long, default_value = "zh-CN")]
        locale: Locale,

        /// Base URL prepended to relative image paths
        #[arg(long, value_name = "URL")]
        asset_base: Option<String>,
    },

    /// Print the merged narrative content for a style preset as JSON
    Content {
        /// cover, story, card or full
        #[arg(long, default_value = "full")]
        kind: ContentKind,

        /// romantic, modern, traditional or casual
        #[arg(long, default_value = "romantic")]
        style: ContentStyle,

        /// JSON file with content overrides
        #[arg(long, value_name = "FILE")]
        overrides: Option<PathBuf>,
    },

    /// List the template ids found in a directory
    List {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Render {
            template,
            data,
            out,
            locale,
            asset_base,
        } => {
            let options = RenderOptions {
                locale,
                asset_base,
            };
            let html = render(&template, &data, options)?;
            match out {
                Some(path) => {
                    fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("wrote {}", path.display());
                }
                None => println!("{html}"),
            }
        }
        Command::Content {
            kind,
            style,
            overrides,
        } => {
            let report = content_report(kind, style, overrides.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::List { dir } => {
            let loader = TemplateLoader::new(&dir)?;
            for id in loader.available()? {
                println!("{id}");
            }
        }
    }

    Ok(())
}

fn render(template: &Path, data: &Path, options: RenderOptions) -> Result<String> {
    let template_source = fs::read_to_string(template)
        .with_context(|| format!("Failed to read template: {}", template.display()))?;
    let data_source = fs::read_to_string(data)
        .with_context(|| format!("Failed to read data: {}", data.display()))?;

    let invitation = Kotobuki::from_json(&template_source)
        .with_context(|| format!("Invalid template: {}", template.display()))?
        .with_options(options);
    let data: serde_json::Value = serde_json::from_str(&data_source)
        .with_context(|| format!("Invalid data: {}", data.display()))?;

    info!(
        "rendering '{}' with {} sections",
        invitation.template().meta.name,
        invitation.template().sections.len()
    );
    Ok(invitation.render_html(&data))
}

fn content_report(
    kind: ContentKind,
    style: ContentStyle,
    overrides: Option<&Path>,
) -> Result<serde_json::Value> {
    let overrides: ContentConfig = match overrides {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read overrides: {}", path.display()))?;
            serde_json::from_str(&source)
                .with_context(|| format!("Invalid overrides: {}", path.display()))?
        }
        None => ContentConfig::default(),
    };

    let content = merge_content(&default_content(kind, style), &overrides);
    let complexity = content_complexity(&content);
    Ok(serde_json::json!({
        "content": content,
        "validation": validate_content(&content),
        "complexity": complexity,
        "interactionMode": InteractionMode::for_complexity(complexity),
        "paragraphs": generate_paragraphs(&content),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "kotobuki",
            "render",
            "--template",
            "t.json",
            "--data",
            "d.json",
            "--locale",
            "en-US",
        ])
        .unwrap();
        match args.command {
            Command::Render { locale, out, .. } => {
                assert_eq!(locale, Locale::EnUs);
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_args_parse_content_defaults() {
        let args = Args::try_parse_from(["kotobuki", "content", "--kind", "story"]).unwrap();
        match args.command {
            Command::Content { kind, style, .. } => {
                assert_eq!(kind, ContentKind::Story);
                assert_eq!(style, ContentStyle::Romantic);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_args_reject_unknown_values() {
        let err = Args::try_parse_from([
            "kotobuki", "render", "--template", "t.json", "--data", "d.json", "--locale", "fr-FR",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("unsupported locale"));

        let err = Args::try_parse_from(["kotobuki", "content", "--style", "gothic"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_render_files() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("t.json");
        let data = dir.path().join("d.json");
        fs::write(
            &template,
            r#"{"sections": [{"id": "b", "type": "blessing", "props": {"text": "{{blessing.text}}"}}]}"#,
        )
        .unwrap();
        fs::write(&data, r#"{"blessing": {"text": "Cheers"}}"#).unwrap();

        let html = render(&template, &data, RenderOptions::default()).unwrap();
        assert!(html.contains("<p class=\"text\">Cheers</p>"));
    }

    #[test]
    fn test_render_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let err = render(&missing, &missing, RenderOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read template"));
    }

    #[test]
    fn test_content_report_with_overrides() {
        let dir = TempDir::new().unwrap();
        let overrides = dir.path().join("o.json");
        fs::write(&overrides, r#"{"coverStory": "Hello from the two of us"}"#).unwrap();

        let report =
            content_report(ContentKind::Full, ContentStyle::Modern, Some(&overrides)).unwrap();
        assert_eq!(report["content"]["coverStory"], "Hello from the two of us");
        assert_eq!(report["validation"]["valid"], true);
        assert!(report["complexity"].as_u64().unwrap() > 0);
    }
}
