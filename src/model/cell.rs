//! Typed cell values
//!
//! Every column declares one [`DisplayType`]; a cell only ever holds the
//! matching [`CellValue`] variant. Mismatches are caught when a value is
//! written into a row, not when it is rendered.

use std::fmt;
use std::sync::Arc;

use crate::columns::DisplayType;

/// Decoded, in-memory image data
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBlob {
    /// Raw encoded bytes (png, jpeg, ...)
    pub bytes: Arc<[u8]>,
    /// MIME type, e.g. `image/png`
    pub mime: String,
    pub width: u32,
    pub height: u32,
}

impl ImageBlob {
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            bytes: bytes.into(),
            mime: mime.into(),
            width,
            height,
        }
    }
}

impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Content of an image cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageValue {
    #[default]
    Absent,
    /// A persistent URL (http(s) or `data:` URL)
    Url(String),
    /// An in-memory image that needs a display handle to render
    Blob(ImageBlob),
}

impl ImageValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, ImageValue::Absent)
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    /// Free-form numeric text; never validated
    Number(String),
    Boolean(bool),
    Image(ImageValue),
}

impl CellValue {
    /// The empty value for a column of the given type
    pub fn default_for(display: DisplayType) -> Self {
        match display {
            DisplayType::Text => CellValue::Text(String::new()),
            DisplayType::Number => CellValue::Number(String::new()),
            DisplayType::Checkbox => CellValue::Boolean(false),
            DisplayType::Image => CellValue::Image(ImageValue::Absent),
        }
    }

    /// Build a value of the right variant from committed editor text.
    ///
    /// Returns `None` for columns that have no text representation.
    pub fn from_text(display: DisplayType, text: impl Into<String>) -> Option<Self> {
        match display {
            DisplayType::Text => Some(CellValue::Text(text.into())),
            DisplayType::Number => Some(CellValue::Number(text.into())),
            DisplayType::Checkbox | DisplayType::Image => None,
        }
    }

    /// Whether this variant is the one `display` columns hold
    pub fn matches(&self, display: DisplayType) -> bool {
        matches!(
            (self, display),
            (CellValue::Text(_), DisplayType::Text)
                | (CellValue::Number(_), DisplayType::Number)
                | (CellValue::Boolean(_), DisplayType::Checkbox)
                | (CellValue::Image(_), DisplayType::Image)
        )
    }

    /// Empty text, `false`, or no image
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) | CellValue::Number(s) => s.is_empty(),
            CellValue::Boolean(b) => !b,
            CellValue::Image(img) => img.is_absent(),
        }
    }

    /// Text content for text/number cells
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) | CellValue::Number(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageValue> {
        match self {
            CellValue::Image(img) => Some(img),
            _ => None,
        }
    }
}
