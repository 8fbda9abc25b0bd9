//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::image::{ClipboardPayload, ImagePayload};
use crate::model::{ImageBlob, MetadataField, RowId};
use crate::project::ViewType;

/// Direction for selection movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Grid selection and cell editing messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridMsg {
    // === Selection ===
    /// Select a cell (single click), discarding any pending draft
    Click { row: usize, col: usize },
    /// Select a cell and start editing it when it is a text/number cell
    DoubleClick { row: usize, col: usize },
    /// Arrow key while selected
    Move(Direction),
    /// Tab while selected
    NextCell,
    /// Focus left the grid
    Blur,

    // === Editing ===
    /// Enter while selected
    StartEditing,
    /// Enter while editing
    ConfirmEdit,
    /// Tab while editing: commit, then advance
    ConfirmEditAndAdvance,
    /// Escape while editing
    CancelEdit,
    /// Insert a character into the draft
    EditInsertChar(char),
    /// Replace the whole draft (input field change)
    EditSetDraft(String),
    EditDeleteBackward,
    EditDeleteForward,
    EditCursorLeft,
    EditCursorRight,
    EditCursorHome,
    EditCursorEnd,

    // === Other cell input ===
    /// Text paste at grid level
    Paste(String),
    /// Click on a checkbox cell
    ToggleCheckbox { row: usize, col: usize },
}

/// Row list messages
#[derive(Debug, Clone, PartialEq)]
pub enum RowMsg {
    /// Append an empty row (添加行)
    Add,
    /// Delete a row by id
    Delete(RowId),
    /// Replace every row at once (loading a parts list)
    ReplaceAll(Vec<crate::model::Row>),
}

/// Image cell messages
#[derive(Debug, Clone, PartialEq)]
pub enum ImageMsg {
    /// Paste event targeted at an image cell
    Paste { row: usize, payload: ClipboardPayload },
    /// File dropped on an image cell
    Drop { row: usize, file: ImagePayload },
    /// Clear an image cell
    Clear { row: usize },
    /// A deferred decode finished
    Decoded { row_id: RowId, blob: ImageBlob },
}

/// Metadata form messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataMsg {
    Set { field: MetadataField, value: String },
}

/// View switching and printing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMsg {
    Switch(ViewType),
    /// Print the active document
    Print,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Grid selection and editing
    Grid(GridMsg),
    /// Row list changes
    Rows(RowMsg),
    /// Image cells
    Image(ImageMsg),
    /// Metadata form
    Metadata(MetadataMsg),
    /// View switching
    View(ViewMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn click(row: usize, col: usize) -> Self {
        Msg::Grid(GridMsg::Click { row, col })
    }

    pub fn double_click(row: usize, col: usize) -> Self {
        Msg::Grid(GridMsg::DoubleClick { row, col })
    }

    pub fn paste(text: impl Into<String>) -> Self {
        Msg::Grid(GridMsg::Paste(text.into()))
    }

    pub fn set_metadata(field: MetadataField, value: impl Into<String>) -> Self {
        Msg::Metadata(MetadataMsg::Set {
            field,
            value: value.into(),
        })
    }

    pub fn switch_view(view: ViewType) -> Self {
        Msg::View(ViewMsg::Switch(view))
    }
}
