//! Command-line argument parsing
//!
//! Supports:
//! - Importing a tab-separated parts list from a file, stdin or the clipboard
//! - Job metadata from a YAML file
//! - Choosing the document and output format

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::columns::ColumnKey;
use crate::project::DocumentKind;

/// Render a parts list as a quote, production order, delivery note or
/// purchase order
#[derive(Parser, Debug)]
#[command(name = "partsheet", version, about = "Parts-list documents from spreadsheet data")]
pub struct CliArgs {
    /// Document to produce: quote, production, delivery, purchase (or 报价单 ...)
    #[arg(long, value_name = "KIND", default_value = "quote", value_parser = parse_kind)]
    pub view: DocumentKind,

    /// Tab-separated parts list; `-` reads stdin
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Read the parts list from the system clipboard
    #[arg(long, conflicts_with = "input")]
    pub clipboard: bool,

    /// YAML file with job metadata (keys are the field labels, e.g. 客户名称)
    #[arg(short, long, value_name = "PATH")]
    pub metadata: Option<PathBuf>,

    /// Column the first pasted field lands in
    #[arg(long, value_name = "COLUMN", default_value = "图号", value_parser = parse_column)]
    pub anchor: ColumnKey,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Date of issue printed in the footer (default: today)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Config file to use instead of ~/.config/partsheet/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the document here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Text,
    Json,
}

/// Where the parts list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// No parts list; the document has only empty rows
    None,
    File(PathBuf),
    Stdin,
    Clipboard,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub kind: DocumentKind,
    pub input: InputSource,
    pub metadata: Option<PathBuf>,
    pub anchor: ColumnKey,
    pub format: OutputFormat,
    pub issue_date: Option<String>,
    pub config_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

fn parse_kind(s: &str) -> Result<DocumentKind, String> {
    s.parse()
}

fn parse_column(s: &str) -> Result<ColumnKey, String> {
    s.parse::<ColumnKey>().map_err(|e| e.to_string())
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if self.anchor.def().display == crate::columns::DisplayType::Image {
            return Err(format!("cannot paste into the {} column", self.anchor));
        }

        let input = match (self.input, self.clipboard) {
            (_, true) => InputSource::Clipboard,
            (Some(path), false) if path.as_os_str() == "-" => InputSource::Stdin,
            (Some(path), false) => InputSource::File(path),
            (None, false) => InputSource::None,
        };

        Ok(StartupConfig {
            kind: self.view,
            input,
            metadata: self.metadata,
            anchor: self.anchor,
            format: self.format,
            issue_date: self.date,
            config_file: self.config,
            output: self.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<StartupConfig, String> {
        let args = CliArgs::try_parse_from(std::iter::once("partsheet").chain(args.iter().copied()))
            .map_err(|e| e.to_string())?;
        args.into_config()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.kind, DocumentKind::Quote);
        assert_eq!(config.input, InputSource::None);
        assert_eq!(config.anchor, ColumnKey::DrawingNo);
        assert_eq!(config.format, OutputFormat::Html);
        assert!(config.issue_date.is_none());
    }

    #[test]
    fn test_view_accepts_title() {
        let config = parse(&["--view", "采购单"]).unwrap();
        assert_eq!(config.kind, DocumentKind::Purchase);
    }

    #[test]
    fn test_unknown_view_rejected() {
        assert!(parse(&["--view", "invoice"]).is_err());
    }

    #[test]
    fn test_stdin_input() {
        let config = parse(&["--input", "-"]).unwrap();
        assert_eq!(config.input, InputSource::Stdin);
    }

    #[test]
    fn test_file_input_and_format() {
        let config = parse(&["-i", "parts.tsv", "-f", "json", "--anchor", "spec"]).unwrap();
        assert_eq!(config.input, InputSource::File(PathBuf::from("parts.tsv")));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.anchor, ColumnKey::Spec);
    }

    #[test]
    fn test_clipboard_conflicts_with_input() {
        assert!(parse(&["--clipboard", "--input", "a.tsv"]).is_err());
        assert_eq!(parse(&["--clipboard"]).unwrap().input, InputSource::Clipboard);
    }

    #[test]
    fn test_image_anchor_rejected() {
        let err = parse(&["--anchor", "零件图片"]).unwrap_err();
        assert!(err.contains("零件图片"));
    }
}
