//! Tabular clipboard import
//!
//! Spreadsheet copies arrive as tab-separated fields, one row per line.
//! Pasting such text at the selected cell fills the grid rightwards and
//! downwards from there, appending rows when the block runs past the end.

use crate::columns::{DisplayType, COLUMNS};
use crate::model::{CellValue, RowStore};

use super::model::CellPosition;

/// Whether clipboard text should go through tabular import
pub fn is_tabular(text: &str) -> bool {
    text.contains('\t') || text.contains('\n')
}

/// Split clipboard text into lines of tab-separated fields.
///
/// Trailing blank lines are dropped; blank lines in the middle are kept
/// as a single empty field. A `\r` before each newline is stripped.
pub fn parse_tabular(text: &str) -> Vec<Vec<&str>> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    lines.into_iter().map(|line| line.split('\t').collect()).collect()
}

/// Checkbox text coercion: `true`, `1`, `yes` (any case) are true
pub fn parse_checkbox(text: &str) -> bool {
    text.eq_ignore_ascii_case("true") || text == "1" || text.eq_ignore_ascii_case("yes")
}

/// Paste `text` with its top-left field at `anchor`.
///
/// Grows the store as needed and swaps the result in with a single
/// `replace_all`. Image columns keep their content. Returns the number of
/// data lines applied.
pub fn import_tabular(store: &mut RowStore, anchor: CellPosition, text: &str) -> usize {
    let data = parse_tabular(text);
    if data.is_empty() {
        return 0;
    }

    let mut rows = store.rows().to_vec();
    let required = anchor.row + data.len();
    while rows.len() < required {
        rows.push(store.new_row());
    }

    for (i, fields) in data.iter().enumerate() {
        let Some(row) = rows.get_mut(anchor.row + i) else {
            continue;
        };
        for (j, field) in fields.iter().enumerate() {
            let Some(column) = COLUMNS.get(anchor.col + j) else {
                break;
            };
            let value = match column.display {
                DisplayType::Image => continue,
                DisplayType::Checkbox => CellValue::Boolean(parse_checkbox(field)),
                DisplayType::Text => CellValue::Text((*field).to_string()),
                DisplayType::Number => CellValue::Number((*field).to_string()),
            };
            row.set(column.key, value);
        }
    }

    tracing::debug!(
        lines = data.len(),
        anchor_row = anchor.row,
        anchor_col = anchor.col,
        rows = rows.len(),
        "tabular paste applied"
    );
    store.replace_all(rows);
    data.len()
}
