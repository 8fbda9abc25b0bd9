//! Grid selection and edit state
//!
//! The grid is in one of three modes: nothing selected, a cell selected, or
//! a cell being edited through a draft buffer. The draft never touches the
//! row store until it is committed.

use crate::columns::{ColumnKey, COLUMN_COUNT};
use crate::model::{CellValue, RowId, RowStore};

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position of `key` in row `row`
    pub fn at(row: usize, key: ColumnKey) -> Self {
        Self::new(row, key.index())
    }

    /// Column key at this position (`None` if `col` is out of range)
    pub fn column_key(&self) -> Option<ColumnKey> {
        ColumnKey::from_index(self.col)
    }

    /// Whether the position addresses an existing cell
    pub fn is_within(&self, row_count: usize) -> bool {
        self.row < row_count && self.col < COLUMN_COUNT
    }
}

/// The grid's current mode, derived from [`GridState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    Idle,
    Selected(CellPosition),
    Editing(CellPosition),
}

/// Draft buffer for a text/number cell being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditState {
    /// Position of the cell being edited
    pub position: CellPosition,
    /// Committed value when editing began (restored on cancel)
    pub original: String,
    draft: String,
    /// Cursor position in characters
    cursor: usize,
}

impl CellEditState {
    /// Start a draft holding the committed value, cursor at the end
    pub fn new(position: CellPosition, value: String) -> Self {
        let cursor = value.chars().count();
        Self {
            position,
            draft: value.clone(),
            original: value,
            cursor,
        }
    }

    /// Current draft content
    pub fn buffer(&self) -> &str {
        &self.draft
    }

    pub fn cursor_char_position(&self) -> usize {
        self.cursor
    }

    /// Check if content changed from original
    pub fn is_modified(&self) -> bool {
        self.draft != self.original
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.draft
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.draft.len())
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.draft.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert text at cursor (for paste while editing)
    pub fn insert_text(&mut self, text: &str) {
        let at = self.byte_offset(self.cursor);
        self.draft.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Replace the whole draft (native input `change` event)
    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
        self.cursor = self.draft.chars().count();
    }

    /// Delete character before cursor (backspace)
    pub fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.draft.remove(at);
    }

    /// Delete character at cursor (delete)
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.draft.chars().count() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.draft.remove(at);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.draft.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.draft.chars().count();
    }
}

/// A committed cell edit, for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row_id: RowId,
    pub column: ColumnKey,
    pub old_value: String,
    pub new_value: String,
}

/// Selection + edit state of the grid.
///
/// `editing` is only ever `Some` at the selected position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    /// Currently selected cell
    pub(crate) selection: Option<CellPosition>,
    /// Cell editing state (Some when editing a cell)
    pub(crate) editing: Option<CellEditState>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> GridMode {
        match (self.selection, &self.editing) {
            (None, _) => GridMode::Idle,
            (Some(pos), Some(_)) => GridMode::Editing(pos),
            (Some(pos), None) => GridMode::Selected(pos),
        }
    }

    pub fn selection(&self) -> Option<CellPosition> {
        self.selection
    }

    /// Check if currently editing a cell
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing(&self) -> Option<&CellEditState> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut CellEditState> {
        self.editing.as_mut()
    }

    /// Drop selection and any pending draft
    pub fn clear(&mut self) {
        self.selection = None;
        self.editing = None;
    }

    /// Select a cell, discarding any pending draft.
    ///
    /// Positions outside the grid are ignored.
    pub fn select_cell(&mut self, pos: CellPosition, row_count: usize) -> bool {
        if !pos.is_within(row_count) {
            return false;
        }
        if let Some(edit) = self.editing.take() {
            tracing::debug!(
                row = edit.position.row,
                col = edit.position.col,
                "draft discarded by selection change"
            );
        }
        self.selection = Some(pos);
        true
    }

    /// Open a draft for the selected cell.
    ///
    /// Only text and number columns have an edit mode; on other columns
    /// (and when already editing) this does nothing.
    pub fn start_editing(&mut self, store: &RowStore) -> bool {
        if self.editing.is_some() {
            return false;
        }
        let Some(pos) = self.selection else {
            return false;
        };
        let Some(key) = pos.column_key() else {
            return false;
        };
        if !key.display().is_text_editable() {
            return false;
        }
        let Some(row) = store.get(pos.row) else {
            return false;
        };
        let value = row.text(key).to_string();
        self.editing = Some(CellEditState::new(pos, value));
        true
    }

    /// Write the draft into the store and leave edit mode.
    ///
    /// Returns the edit if the stored value changed.
    pub fn confirm_edit(&mut self, store: &mut RowStore) -> Option<CellEdit> {
        let edit_state = self.editing.take()?;

        if !edit_state.is_modified() {
            return None;
        }

        let key = edit_state.position.column_key()?;
        let row_id = store.get(edit_state.position.row)?.id();
        let value = CellValue::from_text(key.display(), edit_state.buffer())?;

        if !store.update(row_id, key, value) {
            return None;
        }

        Some(CellEdit {
            row_id,
            column: key,
            new_value: edit_state.buffer().to_string(),
            old_value: edit_state.original,
        })
    }

    /// Cancel edit and discard changes
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}
