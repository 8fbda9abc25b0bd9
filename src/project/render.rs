//! Printable rendering of a projection
//!
//! [`render`] fills a [`RenderedDocument`]: every cell already formatted
//! as display text, so the HTML, plain-text and JSON outputs share one
//! source of truth.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use crate::columns::ColumnKey;
use crate::config::AppConfig;
use crate::image::ImageHandles;
use crate::model::{CellValue, MetadataField, Row};

use super::{DocumentKind, Projection};

/// Header label of the row-number column
pub const ROW_NUMBER_LABEL: &str = "序号";
/// Body of the single placeholder row shown when no rows survive filtering
pub const EMPTY_PLACEHOLDER: &str = "暂无数据";
const TOTAL_LABEL: &str = "合计金额";
const PREPARED_BY_LABEL: &str = "制单人";
const REVIEWED_BY_LABEL: &str = "审核人";
const SIGNATURE_LABEL: &str = "签字";
const REMARKS_LABEL: &str = "备注";
/// Shown for empty cells
const EMPTY_CELL: &str = "-";

/// Printed label of a company field; the form labels carry a 本 prefix
fn company_label(field: MetadataField) -> &'static str {
    match field {
        MetadataField::CompanyName => "公司名称",
        MetadataField::CompanyAddress => "公司地址",
        MetadataField::CompanyContact => "公司联系人",
        other => other.label(),
    }
}

/// Formatting knobs for [`render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for 单价 / 总价 values and the total
    pub currency_symbol: String,
    /// Shown for empty header fields and signature slots
    pub blank_placeholder: String,
    /// Date of issue, used when the document has no date of its own
    pub issue_date: String,
}

impl RenderOptions {
    pub fn from_config(config: &AppConfig, issue_date: impl Into<String>) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            blank_placeholder: config.blank_placeholder.clone(),
            issue_date: issue_date.into(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default(), today())
    }
}

/// Today's local date, in the `2026/10/16` style used on documents
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y/%-m/%-d").to_string()
}

/// Normalize an ISO date (`2026-10-16`) to document style; other text is
/// kept as typed.
pub fn document_date(text: &str) -> String {
    match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%Y/%-m/%-d").to_string(),
        Err(_) => text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RenderedCell {
    Text(String),
    /// Renderable image source (URL or `data:` URL)
    Image(String),
}

impl RenderedCell {
    pub fn as_text(&self) -> &str {
        match self {
            RenderedCell::Text(text) | RenderedCell::Image(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFooter {
    pub prepared_by: RenderedField,
    pub reviewed_by: RenderedField,
    pub date: RenderedField,
    pub signature: RenderedField,
}

/// A document ready for output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub title: String,
    pub company: Vec<RenderedField>,
    pub fields: Vec<RenderedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<RenderedField>,
    /// 序号 followed by the column labels
    pub header: Vec<String>,
    pub body: Vec<Vec<RenderedCell>>,
    /// Set when `body` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<RenderedField>,
    pub footer: RenderedFooter,
}

/// Format a projection for output.
///
/// Image cells holding in-memory data get their display handle from
/// `images`, so rendering the same document twice reuses handles.
pub fn render(
    projection: &Projection<'_>,
    images: &mut ImageHandles,
    options: &RenderOptions,
) -> RenderedDocument {
    let field = |label: &str, value: &str| RenderedField {
        label: label.to_string(),
        value: if value.is_empty() {
            options.blank_placeholder.clone()
        } else {
            value.to_string()
        },
    };

    let company = projection
        .company_fields()
        .iter()
        .map(|f| field(company_label(f.field), f.value))
        .collect();
    let fields = projection
        .document_fields()
        .iter()
        .map(|f| field(f.label, f.value))
        .collect();
    let remarks = projection.remarks.map(|r| field(REMARKS_LABEL, r));

    let header = std::iter::once(ROW_NUMBER_LABEL.to_string())
        .chain(projection.columns.iter().map(|c| c.label().to_string()))
        .collect();

    let body: Vec<Vec<RenderedCell>> = projection
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            std::iter::once(RenderedCell::Text((i + 1).to_string()))
                .chain(
                    projection
                        .columns
                        .iter()
                        .map(|&key| render_cell(row, key, images, options)),
                )
                .collect()
        })
        .collect();

    let placeholder = body.is_empty().then(|| EMPTY_PLACEHOLDER.to_string());

    let total = projection
        .total
        .as_deref()
        .map(|t| field(TOTAL_LABEL, &format!("{}{}", options.currency_symbol, t)));

    let date = match projection.footer.date {
        Some(date) => document_date(date),
        None => options.issue_date.clone(),
    };

    RenderedDocument {
        kind: projection.kind,
        title: projection.title.to_string(),
        company,
        fields,
        remarks,
        header,
        body,
        placeholder,
        total,
        footer: RenderedFooter {
            prepared_by: field(PREPARED_BY_LABEL, projection.footer.prepared_by),
            reviewed_by: field(REVIEWED_BY_LABEL, ""),
            date: field(projection.footer.date_label, &date),
            signature: field(SIGNATURE_LABEL, ""),
        },
    }
}

fn render_cell(
    row: &Row,
    key: ColumnKey,
    images: &mut ImageHandles,
    options: &RenderOptions,
) -> RenderedCell {
    match row.get(key) {
        CellValue::Image(value) => match images.acquire(row.id(), value) {
            Some(src) => RenderedCell::Image(src.to_string()),
            None => RenderedCell::Text(EMPTY_CELL.to_string()),
        },
        CellValue::Boolean(flag) => {
            RenderedCell::Text(if *flag { "是" } else { "否" }.to_string())
        }
        CellValue::Text(text) | CellValue::Number(text) => {
            let text = if text.is_empty() {
                EMPTY_CELL.to_string()
            } else if is_money(key) {
                format!("{}{}", options.currency_symbol, text)
            } else {
                text.clone()
            };
            RenderedCell::Text(text)
        }
    }
}

fn is_money(key: ColumnKey) -> bool {
    matches!(key, ColumnKey::UnitPrice | ColumnKey::TotalPrice)
}

impl RenderedDocument {
    /// Standalone print-ready HTML page
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<!DOCTYPE html>");
        let _ = writeln!(out, "<html lang=\"zh-CN\">");
        let _ = writeln!(out, "<head>");
        let _ = writeln!(out, "<meta charset=\"utf-8\">");
        let _ = writeln!(out, "<title>{}</title>", escape_html(&self.title));
        let _ = writeln!(out, "<style>{}</style>", STYLE);
        let _ = writeln!(out, "</head>");
        let _ = writeln!(out, "<body>");
        let _ = writeln!(out, "<h1>{}</h1>", escape_html(&self.title));

        let _ = writeln!(out, "<section class=\"company\">");
        write_fields_html(&mut out, &self.company);
        let _ = writeln!(out, "</section>");

        let _ = writeln!(out, "<section class=\"fields\">");
        write_fields_html(&mut out, &self.fields);
        if let Some(remarks) = &self.remarks {
            write_fields_html(&mut out, std::slice::from_ref(remarks));
        }
        let _ = writeln!(out, "</section>");

        let _ = writeln!(out, "<table>");
        let _ = write!(out, "<thead><tr>");
        for label in &self.header {
            let _ = write!(out, "<th>{}</th>", escape_html(label));
        }
        let _ = writeln!(out, "</tr></thead>");
        let _ = writeln!(out, "<tbody>");
        for row in &self.body {
            let _ = write!(out, "<tr>");
            for cell in row {
                match cell {
                    RenderedCell::Text(text) => {
                        let _ = write!(out, "<td>{}</td>", escape_html(text));
                    }
                    RenderedCell::Image(src) => {
                        let _ = write!(
                            out,
                            "<td><img src=\"{}\" alt=\"{}\"></td>",
                            escape_html(src),
                            ColumnKey::PartImage.label()
                        );
                    }
                }
            }
            let _ = writeln!(out, "</tr>");
        }
        if let Some(placeholder) = &self.placeholder {
            let _ = writeln!(
                out,
                "<tr><td class=\"empty\" colspan=\"{}\">{}</td></tr>",
                self.header.len(),
                escape_html(placeholder)
            );
        }
        let _ = writeln!(out, "</tbody>");
        let _ = writeln!(out, "</table>");

        if let Some(total) = &self.total {
            let _ = writeln!(
                out,
                "<p class=\"total\">{}: {}</p>",
                escape_html(&total.label),
                escape_html(&total.value)
            );
        }

        let _ = writeln!(out, "<footer>");
        write_fields_html(&mut out, &self.footer_fields());
        let _ = writeln!(out, "</footer>");
        let _ = writeln!(out, "</body>");
        let _ = writeln!(out, "</html>");
        out
    }

    /// Plain-text rendering, one field per line and the table tab-separated
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out);
        for f in self.company.iter().chain(&self.fields).chain(&self.remarks) {
            let _ = writeln!(out, "{}: {}", f.label, f.value);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "{}", self.header.join("\t"));
        for row in &self.body {
            let cells: Vec<&str> = row
                .iter()
                .map(|cell| match cell {
                    // data: URLs are unreadable in text output
                    RenderedCell::Image(src) if src.starts_with("data:") => "[图片]",
                    other => other.as_text(),
                })
                .collect();
            let _ = writeln!(out, "{}", cells.join("\t"));
        }
        if let Some(placeholder) = &self.placeholder {
            let _ = writeln!(out, "{}", placeholder);
        }

        if let Some(total) = &self.total {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}: {}", total.label, total.value);
        }
        let _ = writeln!(out);
        let footer: Vec<String> = self
            .footer_fields()
            .iter()
            .map(|f| format!("{}: {}", f.label, f.value))
            .collect();
        let _ = writeln!(out, "{}", footer.join("    "));
        out
    }

    /// JSON form of the document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn footer_fields(&self) -> [RenderedField; 4] {
        [
            self.footer.prepared_by.clone(),
            self.footer.reviewed_by.clone(),
            self.footer.date.clone(),
            self.footer.signature.clone(),
        ]
    }
}

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
h1{text-align:center}\
section{display:grid;grid-template-columns:repeat(3,1fr);gap:.5em;margin-bottom:1em}\
table{width:100%;border-collapse:collapse}\
th,td{border:1px solid #333;padding:4px;text-align:center}\
td img{max-width:80px;max-height:80px}\
td.empty{color:#888}\
.total{text-align:right;font-weight:bold}\
footer{display:flex;justify-content:space-between;margin-top:2em}\
@media print{body{margin:0}}";

fn write_fields_html(out: &mut String, fields: &[RenderedField]) {
    for f in fields {
        let _ = writeln!(
            out,
            "<div><span class=\"label\">{}:</span> <span class=\"value\">{}</span></div>",
            escape_html(&f.label),
            escape_html(&f.value)
        );
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_date() {
        assert_eq!(document_date("2026-03-05"), "2026/3/5");
        assert_eq!(document_date("下周一"), "下周一");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_rendered_cell_json_shape() {
        let json = serde_json::to_string(&RenderedCell::Image("http://x".into())).unwrap();
        assert_eq!(json, r#"{"kind":"image","value":"http://x"}"#);
    }
}
