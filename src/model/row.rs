//! Row store: the ordered parts list
//!
//! Every mutation is total. Unknown ids and mistyped values are ignored
//! rather than reported, since callers always derive ids from the current
//! snapshot.

use std::fmt;

use crate::columns::{ColumnKey, COLUMNS, COLUMN_COUNT};

use super::cell::{CellValue, ImageValue};

/// Stable identity of a row, never reused within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// One part line
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    id: RowId,
    cells: [CellValue; COLUMN_COUNT],
}

impl Row {
    /// A row with every cell at its column's default
    pub fn empty(id: RowId) -> Self {
        Self {
            id,
            cells: std::array::from_fn(|i| CellValue::default_for(COLUMNS[i].display)),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn get(&self, key: ColumnKey) -> &CellValue {
        &self.cells[key.index()]
    }

    /// Set a cell, rejecting values of the wrong variant for the column.
    ///
    /// Returns whether the value was stored.
    pub fn set(&mut self, key: ColumnKey, value: CellValue) -> bool {
        if !value.matches(key.display()) {
            return false;
        }
        self.cells[key.index()] = value;
        true
    }

    /// Builder-style [`Row::set`], for constructing rows in one expression
    pub fn with(mut self, key: ColumnKey, value: CellValue) -> Self {
        self.set(key, value);
        self
    }

    /// Text of a text/number cell, or `""` for other columns
    pub fn text(&self, key: ColumnKey) -> &str {
        self.get(key).as_text().unwrap_or("")
    }

    pub fn image(&self) -> &ImageValue {
        match self.get(ColumnKey::PartImage) {
            CellValue::Image(img) => img,
            _ => &ImageValue::Absent,
        }
    }

    /// Whether the row is flagged for purchase (采购)
    pub fn is_purchase(&self) -> bool {
        self.get(ColumnKey::Purchase).as_bool().unwrap_or(false)
    }

    /// A scratch row: every cell blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_blank)
    }

    pub fn cells(&self) -> impl Iterator<Item = (ColumnKey, &CellValue)> {
        COLUMNS.iter().map(|c| c.key).zip(self.cells.iter())
    }
}

/// The ordered collection of rows
#[derive(Debug, Clone)]
pub struct RowStore {
    rows: Vec<Row>,
    next_id: u64,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RowStore {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }

    /// A store holding `count` empty rows
    pub fn with_empty_rows(count: usize) -> Self {
        let mut store = Self::new();
        for _ in 0..count {
            let row = store.new_row();
            store.append(row);
        }
        store
    }

    /// Allocate a fresh id and build an empty row for it (not yet inserted)
    pub fn new_row(&mut self) -> Row {
        let id = RowId(self.next_id);
        self.next_id += 1;
        Row::empty(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Row at display position `index`
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn find(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    /// Insert at the end
    pub fn append(&mut self, row: Row) {
        self.reserve_id(row.id);
        self.rows.push(row);
    }

    /// Remove by id; unknown ids are ignored
    pub fn remove(&mut self, id: RowId) -> Option<Row> {
        let index = self.index_of(id)?;
        Some(self.rows.remove(index))
    }

    /// Set one cell; unknown ids and mistyped values are ignored.
    ///
    /// Returns whether the store changed.
    pub fn update(&mut self, id: RowId, key: ColumnKey, value: CellValue) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            tracing::debug!(%id, column = %key, "update on unknown row ignored");
            return false;
        };
        if row.get(key) == &value {
            return false;
        }
        if !row.set(key, value) {
            tracing::warn!(%id, column = %key, "rejected value of wrong type");
            return false;
        }
        true
    }

    /// Swap in a whole new row list in one step
    pub fn replace_all(&mut self, rows: Vec<Row>) {
        for row in &rows {
            self.reserve_id(row.id);
        }
        debug_assert!(
            {
                let mut ids: Vec<RowId> = rows.iter().map(Row::id).collect();
                ids.sort_unstable();
                ids.windows(2).all(|w| w[0] != w[1])
            },
            "replace_all received duplicate row ids"
        );
        self.rows = rows;
    }

    /// Keep the id counter ahead of rows built elsewhere
    fn reserve_id(&mut self, id: RowId) {
        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_ids_are_unique_and_not_reused() {
        let mut store = RowStore::with_empty_rows(2);
        let first = store.get(0).unwrap().id();
        let second = store.get(1).unwrap().id();
        assert_ne!(first, second);

        store.remove(second);
        let third = store.new_row();
        assert_ne!(third.id(), second);
        assert_ne!(third.id(), first);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = RowStore::with_empty_rows(1);
        assert!(store.remove(RowId(999)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut store = RowStore::with_empty_rows(1);
        let before = store.rows().to_vec();
        assert!(!store.update(RowId(42), ColumnKey::Spec, CellValue::Text("x".into())));
        assert_eq!(store.rows(), before.as_slice());
    }

    #[test]
    fn test_update_rejects_wrong_variant() {
        let mut store = RowStore::with_empty_rows(1);
        let id = store.get(0).unwrap().id();
        assert!(!store.update(id, ColumnKey::Purchase, CellValue::Text("yes".into())));
        assert!(!store.get(0).unwrap().is_purchase());

        assert!(store.update(id, ColumnKey::Purchase, CellValue::Boolean(true)));
        assert!(store.get(0).unwrap().is_purchase());
    }

    #[test]
    fn test_replace_all_keeps_counter_ahead() {
        let mut store = RowStore::new();
        store.replace_all(vec![Row::empty(RowId(10))]);
        assert!(store.new_row().id() > RowId(10));
    }

    #[test]
    fn test_blank_row() {
        let mut row = Row::empty(RowId(1));
        assert!(row.is_blank());
        row.set(ColumnKey::Purchase, CellValue::Boolean(true));
        assert!(!row.is_blank());
    }
}
