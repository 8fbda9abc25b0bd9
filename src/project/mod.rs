//! Document projection
//!
//! Turns the parts list and job metadata into one of four business
//! documents. Each document kind is a row in the static [`DOCUMENTS`]
//! table: which columns it shows, which metadata fields head it, which
//! rows it keeps and whether it carries a total. Projection is a pure
//! function of `(kind, metadata, rows)` and never mutates rows.

pub mod render;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::columns::ColumnKey;
use crate::model::{Metadata, MetadataField, Row};

/// The four printable documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// 报价单
    Quote,
    /// 生产单
    Production,
    /// 送货单
    Delivery,
    /// 采购单
    Purchase,
}

/// Which view is active: the editing grid or a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewType {
    #[default]
    Edit,
    Document(DocumentKind),
}

/// Which rows a document keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter {
    /// Rows flagged for purchase (采购)
    Purchased,
    /// Rows with at least one non-blank cell
    NonBlank,
}

impl RowFilter {
    pub fn keeps(self, row: &Row) -> bool {
        match self {
            RowFilter::Purchased => row.is_purchase(),
            RowFilter::NonBlank => !row.is_blank(),
        }
    }
}

/// Static description of one document kind
#[derive(Debug)]
pub struct DocumentSpec {
    pub kind: DocumentKind,
    pub title: &'static str,
    pub columns: &'static [ColumnKey],
    /// Fields shown after the company block
    pub fields: &'static [MetadataField],
    pub filter: RowFilter,
    /// Whether the document ends with a 总价 total
    pub totals: bool,
    /// Label of the footer date slot
    pub date_label: &'static str,
}

use ColumnKey as C;
use MetadataField as F;

/// Every document kind, in navigation order
pub static DOCUMENTS: [DocumentSpec; 4] = [
    DocumentSpec {
        kind: DocumentKind::Quote,
        title: "报价单",
        columns: &[
            C::PartImage,
            C::DrawingNo,
            C::Spec,
            C::Material,
            C::Quantity,
            C::UnitPrice,
            C::TotalPrice,
        ],
        fields: &[
            F::SalesOrderNo,
            F::DeliveryDate,
            F::CustomerName,
            F::Contact,
            F::PreparedBy,
        ],
        filter: RowFilter::NonBlank,
        totals: true,
        date_label: "制单日期",
    },
    DocumentSpec {
        kind: DocumentKind::Production,
        title: "生产单",
        columns: &[
            C::PartImage,
            C::DrawingNo,
            C::Spec,
            C::Material,
            C::Quantity,
            C::Process,
            C::Requirements,
            C::Remarks,
        ],
        fields: &[
            F::SalesOrderNo,
            F::DeliveryDate,
            F::CustomerName,
            F::PreparedBy,
        ],
        filter: RowFilter::NonBlank,
        totals: false,
        date_label: "制单日期",
    },
    DocumentSpec {
        kind: DocumentKind::Delivery,
        title: "送货单",
        columns: &[C::PartImage, C::DrawingNo, C::Spec, C::Quantity, C::Remarks],
        fields: &[
            F::SalesOrderNo,
            F::DeliveryDate,
            F::CustomerName,
            F::Contact,
        ],
        filter: RowFilter::NonBlank,
        totals: false,
        date_label: "制单日期",
    },
    DocumentSpec {
        kind: DocumentKind::Purchase,
        title: "采购单",
        columns: &[
            C::PartImage,
            C::DrawingNo,
            C::Spec,
            C::Material,
            C::Quantity,
            C::UnitPrice,
            C::TotalPrice,
        ],
        fields: &[
            F::Supplier,
            F::SupplierAddress,
            F::ShipDate,
            F::PreparedBy,
        ],
        filter: RowFilter::Purchased,
        totals: true,
        date_label: "采购日期",
    },
];

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Quote,
        DocumentKind::Production,
        DocumentKind::Delivery,
        DocumentKind::Purchase,
    ];

    pub fn spec(self) -> &'static DocumentSpec {
        match self {
            DocumentKind::Quote => &DOCUMENTS[0],
            DocumentKind::Production => &DOCUMENTS[1],
            DocumentKind::Delivery => &DOCUMENTS[2],
            DocumentKind::Purchase => &DOCUMENTS[3],
        }
    }

    pub fn title(self) -> &'static str {
        self.spec().title
    }

    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Quote => "quote",
            DocumentKind::Production => "production",
            DocumentKind::Delivery => "delivery",
            DocumentKind::Purchase => "purchase",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    /// Accepts the English name (`quote`) or the title (`报价单`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DocumentKind::ALL
            .into_iter()
            .find(|k| k.title() == s || k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown document type: {}", s))
    }
}

impl ViewType {
    pub fn document(self) -> Option<DocumentKind> {
        match self {
            ViewType::Edit => None,
            ViewType::Document(kind) => Some(kind),
        }
    }
}

/// A labelled metadata value in a document header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedField<'a> {
    pub field: MetadataField,
    pub label: &'static str,
    pub value: &'a str,
}

/// Signature block at the bottom of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footer<'a> {
    pub prepared_by: &'a str,
    pub date_label: &'static str,
    /// Date taken from metadata; `None` means "date of issue"
    pub date: Option<&'a str>,
}

/// Read-only view of the data as one document
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a> {
    pub kind: DocumentKind,
    pub title: &'static str,
    /// Company fields, then the document's own fields
    pub fields: Vec<ProjectedField<'a>>,
    pub columns: &'static [ColumnKey],
    /// Kept rows, in store order
    pub rows: Vec<&'a Row>,
    /// Sum of 总价 with two decimals, for documents that carry one
    pub total: Option<String>,
    /// 备注 from metadata, when filled in
    pub remarks: Option<&'a str>,
    pub footer: Footer<'a>,
}

impl Projection<'_> {
    /// Number of header fields that belong to the company block
    pub const COMPANY_FIELDS: usize = MetadataField::COMPANY.len();

    pub fn company_fields(&self) -> &[ProjectedField<'_>] {
        &self.fields[..Self::COMPANY_FIELDS]
    }

    pub fn document_fields(&self) -> &[ProjectedField<'_>] {
        &self.fields[Self::COMPANY_FIELDS..]
    }
}

/// Project rows and metadata into the document `kind`
pub fn project<'a>(kind: DocumentKind, metadata: &'a Metadata, rows: &'a [Row]) -> Projection<'a> {
    let spec = kind.spec();

    let fields = MetadataField::COMPANY
        .iter()
        .chain(spec.fields)
        .map(|&field| ProjectedField {
            field,
            label: field.label(),
            value: metadata.get(field),
        })
        .collect();

    let rows: Vec<&Row> = rows.iter().filter(|row| spec.filter.keeps(row)).collect();

    let total = spec.totals.then(|| {
        let sum: f64 = rows
            .iter()
            .map(|row| parse_decimal(row.text(ColumnKey::TotalPrice)))
            .sum();
        format_amount(sum)
    });

    let remarks = Some(metadata.remarks.as_str()).filter(|r| !r.is_empty());

    let date = match kind {
        DocumentKind::Purchase => Some(metadata.ship_date.as_str()).filter(|d| !d.is_empty()),
        _ => None,
    };

    Projection {
        kind,
        title: spec.title,
        fields,
        columns: spec.columns,
        rows,
        total,
        remarks,
        footer: Footer {
            prepared_by: &metadata.prepared_by,
            date_label: spec.date_label,
            date,
        },
    }
}

/// Read a leading decimal number the way a browser's `parseFloat` does.
///
/// Leading whitespace is skipped and trailing junk ignored (`"12元"` is 12).
/// Anything without a leading number is 0.
pub fn parse_decimal(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Two-decimal amount text, rounded the way `Number.prototype.toFixed(2)`
/// rounds: on the exact binary value, with ties going away from zero.
///
/// The sign is kept even when the digits round to zero (`-0.001` is
/// `"-0.00"`).
pub fn format_amount(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    // A value lies exactly halfway between two cents only when it is an
    // odd multiple of 1/8; everything else is already rounded correctly.
    let eighths = abs * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths % 2.0 == 1.0;

    if is_tie {
        let cents = (abs * 100.0).round() as u64;
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    } else {
        format!("{}{:.2}", sign, abs)
    }
}
