use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;

use partsheet::cli::{CliArgs, InputSource, OutputFormat, StartupConfig};
use partsheet::messages::{Msg, RowMsg, ViewMsg};
use partsheet::model::{Metadata, MetadataField};
use partsheet::project::render::RenderedDocument;
use partsheet::project::ViewType;
use partsheet::{AppConfig, AppModel, Host, Runtime};

/// Collects printed documents in the requested format
struct OutputHost {
    format: OutputFormat,
    rendered: Vec<Result<String>>,
}

impl Host for OutputHost {
    fn print(&mut self, document: &RenderedDocument) {
        let output = match self.format {
            OutputFormat::Html => Ok(document.to_html()),
            OutputFormat::Text => Ok(document.to_text()),
            OutputFormat::Json => document.to_json().context("Failed to serialize document"),
        };
        self.rendered.push(output);
    }
}

fn main() -> Result<()> {
    partsheet::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let config = match &startup.config_file {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    let text = read_input(&startup.input)?;
    let metadata = match &startup.metadata {
        Some(path) => Some(load_metadata(path)?),
        None => None,
    };

    let document = build_document(&startup, config, text.as_deref(), metadata.as_ref())?;

    match &startup.output {
        Some(path) => std::fs::write(path, document)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(document.as_bytes())
            .context("Failed to write to stdout")?,
    }
    Ok(())
}

/// Drive the app through the same messages the UI would send
fn build_document(
    startup: &StartupConfig,
    config: AppConfig,
    text: Option<&str>,
    metadata: Option<&Metadata>,
) -> Result<String> {
    let host = OutputHost {
        format: startup.format,
        rendered: Vec::new(),
    };
    let mut runtime = Runtime::new(AppModel::new(config), host);
    if let Some(date) = &startup.issue_date {
        runtime = runtime.with_issue_date(date.clone());
    }

    if let Some(text) = text {
        if runtime.model().rows.is_empty() {
            runtime.dispatch(Msg::Rows(RowMsg::Add));
        }
        runtime.dispatch(Msg::click(0, startup.anchor.index()));
        // A single line without tabs would not be treated as tabular
        let mut text = text.to_string();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        runtime.dispatch(Msg::paste(text));
    }

    if let Some(metadata) = metadata {
        for field in MetadataField::ALL {
            let value = metadata.get(field);
            if !value.is_empty() {
                runtime.dispatch(Msg::set_metadata(field, value));
            }
        }
    }

    runtime.dispatch(Msg::switch_view(ViewType::Document(startup.kind)));
    runtime.dispatch(Msg::View(ViewMsg::Print));

    let (_, host) = runtime.into_parts();
    match host.rendered.into_iter().next() {
        Some(output) => output,
        None => bail!("No document was produced"),
    }
}

fn read_input(source: &InputSource) -> Result<Option<String>> {
    let text = match source {
        InputSource::None => return Ok(None),
        InputSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
        InputSource::Clipboard => arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.get_text())
            .context("Failed to read the clipboard")?,
    };
    Ok(Some(text))
}

fn load_metadata(path: &Path) -> Result<Metadata> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse metadata in {}", path.display()))
}
