//! Static column table for the parts list
//!
//! The grid always has the same 11 columns. Their order drives arrow/Tab
//! navigation and the left-to-right fill order of tabular paste.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a column's cells are displayed and edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Text,
    Number,
    Image,
    Checkbox,
}

impl DisplayType {
    /// Whether cells of this type open a draft buffer on Enter/double-click
    pub fn is_text_editable(self) -> bool {
        matches!(self, DisplayType::Text | DisplayType::Number)
    }
}

/// Identifies one of the 11 parts-list columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKey {
    PartImage,
    DrawingNo,
    Spec,
    Material,
    Quantity,
    Process,
    Requirements,
    Remarks,
    UnitPrice,
    TotalPrice,
    Purchase,
}

/// A column definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: ColumnKey,
    pub label: &'static str,
    pub display: DisplayType,
    /// Display width in CSS pixels
    pub width: u16,
}

/// Number of columns in every row
pub const COLUMN_COUNT: usize = 11;

/// All columns in navigation order
pub static COLUMNS: [ColumnDef; COLUMN_COUNT] = [
    ColumnDef {
        key: ColumnKey::PartImage,
        label: "零件图片",
        display: DisplayType::Image,
        width: 120,
    },
    ColumnDef {
        key: ColumnKey::DrawingNo,
        label: "图号",
        display: DisplayType::Text,
        width: 120,
    },
    ColumnDef {
        key: ColumnKey::Spec,
        label: "规格",
        display: DisplayType::Text,
        width: 140,
    },
    ColumnDef {
        key: ColumnKey::Material,
        label: "材料",
        display: DisplayType::Text,
        width: 120,
    },
    ColumnDef {
        key: ColumnKey::Quantity,
        label: "数量",
        display: DisplayType::Number,
        width: 80,
    },
    ColumnDef {
        key: ColumnKey::Process,
        label: "加工方式",
        display: DisplayType::Text,
        width: 120,
    },
    ColumnDef {
        key: ColumnKey::Requirements,
        label: "工艺要求",
        display: DisplayType::Text,
        width: 140,
    },
    ColumnDef {
        key: ColumnKey::Remarks,
        label: "备注",
        display: DisplayType::Text,
        width: 120,
    },
    ColumnDef {
        key: ColumnKey::UnitPrice,
        label: "单价",
        display: DisplayType::Number,
        width: 80,
    },
    ColumnDef {
        key: ColumnKey::TotalPrice,
        label: "总价",
        display: DisplayType::Number,
        width: 80,
    },
    ColumnDef {
        key: ColumnKey::Purchase,
        label: "采购",
        display: DisplayType::Checkbox,
        width: 60,
    },
];

impl ColumnKey {
    /// Position of this column in [`COLUMNS`]
    pub fn index(self) -> usize {
        match self {
            ColumnKey::PartImage => 0,
            ColumnKey::DrawingNo => 1,
            ColumnKey::Spec => 2,
            ColumnKey::Material => 3,
            ColumnKey::Quantity => 4,
            ColumnKey::Process => 5,
            ColumnKey::Requirements => 6,
            ColumnKey::Remarks => 7,
            ColumnKey::UnitPrice => 8,
            ColumnKey::TotalPrice => 9,
            ColumnKey::Purchase => 10,
        }
    }

    /// Column at `index`, if any
    pub fn from_index(index: usize) -> Option<ColumnKey> {
        COLUMNS.get(index).map(|c| c.key)
    }

    pub fn def(self) -> &'static ColumnDef {
        &COLUMNS[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.def().label
    }

    pub fn display(self) -> DisplayType {
        self.def().display
    }

    /// snake_case name, as used in config and on the command line
    pub fn name(self) -> &'static str {
        match self {
            ColumnKey::PartImage => "part_image",
            ColumnKey::DrawingNo => "drawing_no",
            ColumnKey::Spec => "spec",
            ColumnKey::Material => "material",
            ColumnKey::Quantity => "quantity",
            ColumnKey::Process => "process",
            ColumnKey::Requirements => "requirements",
            ColumnKey::Remarks => "remarks",
            ColumnKey::UnitPrice => "unit_price",
            ColumnKey::TotalPrice => "total_price",
            ColumnKey::Purchase => "purchase",
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognized column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumn(pub String);

impl fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column: {}", self.0)
    }
}

impl std::error::Error for UnknownColumn {}

impl FromStr for ColumnKey {
    type Err = UnknownColumn;

    /// Accepts either the Chinese label (`图号`) or the snake_case name (`drawing_no`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        COLUMNS
            .iter()
            .map(|c| c.key)
            .find(|key| key.label() == s || key.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}
