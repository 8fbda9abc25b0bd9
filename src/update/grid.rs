//! Grid mode update functions
//!
//! Handles GridMsg messages: selection, navigation, cell editing and
//! grid-level paste.

use crate::columns::DisplayType;
use crate::commands::Cmd;
use crate::grid::{import_tabular, is_tabular, CellEditState, CellPosition, GridMode};
use crate::messages::GridMsg;
use crate::model::{AppModel, CellValue};

/// Handle grid messages
pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::Click { row, col } => select_cell(model, CellPosition::new(row, col)),
        GridMsg::DoubleClick { row, col } => double_click(model, CellPosition::new(row, col)),
        GridMsg::Move(direction) => {
            if model.grid.is_editing() {
                return None;
            }
            let row_count = model.rows.len();
            model
                .grid
                .move_selection(direction, row_count)
                .then_some(Cmd::Redraw)
        }
        GridMsg::NextCell | GridMsg::ConfirmEditAndAdvance => next_cell(model),
        GridMsg::Blur => {
            // Losing focus commits exactly like Enter
            if model.grid.is_editing() {
                confirm_edit(model)
            } else {
                None
            }
        }

        GridMsg::StartEditing => model.grid.start_editing(&model.rows).then_some(Cmd::Redraw),
        GridMsg::ConfirmEdit => confirm_edit(model),
        GridMsg::CancelEdit => {
            if !model.grid.is_editing() {
                return None;
            }
            model.grid.cancel_edit();
            Some(Cmd::Redraw)
        }
        GridMsg::EditInsertChar(ch) => edit_draft(model, |edit| edit.insert_char(ch)),
        GridMsg::EditSetDraft(text) => edit_draft(model, |edit| edit.set_draft(&text)),
        GridMsg::EditDeleteBackward => edit_draft(model, CellEditState::delete_backward),
        GridMsg::EditDeleteForward => edit_draft(model, CellEditState::delete_forward),
        GridMsg::EditCursorLeft => edit_draft(model, CellEditState::cursor_left),
        GridMsg::EditCursorRight => edit_draft(model, CellEditState::cursor_right),
        GridMsg::EditCursorHome => edit_draft(model, CellEditState::cursor_home),
        GridMsg::EditCursorEnd => edit_draft(model, CellEditState::cursor_end),

        GridMsg::Paste(text) => paste(model, &text),
        GridMsg::ToggleCheckbox { row, col } => toggle_checkbox(model, CellPosition::new(row, col)),
    }
}

fn select_cell(model: &mut AppModel, pos: CellPosition) -> Option<Cmd> {
    let row_count = model.rows.len();
    if !model.grid.select_cell(pos, row_count) {
        tracing::debug!(row = pos.row, col = pos.col, "click outside grid ignored");
        return None;
    }
    Some(Cmd::Redraw)
}

/// Select, then open a draft when the column has an edit mode
fn double_click(model: &mut AppModel, pos: CellPosition) -> Option<Cmd> {
    let cmd = select_cell(model, pos)?;
    model.grid.start_editing(&model.rows);
    Some(cmd)
}

/// Tab: commit any draft, then advance one cell
fn next_cell(model: &mut AppModel) -> Option<Cmd> {
    let committed = model.grid.is_editing();
    if committed {
        confirm_edit(model);
    }
    let row_count = model.rows.len();
    let moved = model.grid.move_to_next_cell(row_count);
    (committed || moved).then_some(Cmd::Redraw)
}

fn confirm_edit(model: &mut AppModel) -> Option<Cmd> {
    if !model.grid.is_editing() {
        return None;
    }
    if let Some(edit) = model.grid.confirm_edit(&mut model.rows) {
        tracing::debug!(
            row = %edit.row_id,
            column = %edit.column,
            old = %edit.old_value,
            new = %edit.new_value,
            "cell committed"
        );
    }
    Some(Cmd::Redraw)
}

fn edit_draft(model: &mut AppModel, f: impl FnOnce(&mut CellEditState)) -> Option<Cmd> {
    let edit = model.grid.editing_mut()?;
    f(edit);
    Some(Cmd::Redraw)
}

/// Grid-level paste.
///
/// While editing the text goes into the draft. While a cell is selected,
/// tabular text is imported at that cell. Anything else is left alone.
fn paste(model: &mut AppModel, text: &str) -> Option<Cmd> {
    match model.grid.mode() {
        GridMode::Editing(_) => edit_draft(model, |edit| edit.insert_text(text)),
        GridMode::Selected(anchor) if is_tabular(text) => {
            let applied = import_tabular(&mut model.rows, anchor, text);
            model.images.retain_live(&model.rows);
            (applied > 0).then_some(Cmd::Redraw)
        }
        GridMode::Selected(_) | GridMode::Idle => None,
    }
}

fn toggle_checkbox(model: &mut AppModel, pos: CellPosition) -> Option<Cmd> {
    let key = pos.column_key()?;
    if key.display() != DisplayType::Checkbox {
        return None;
    }
    let row = model.rows.get(pos.row)?;
    let (id, checked) = (row.id(), row.get(key).as_bool().unwrap_or(false));

    select_cell(model, pos);
    model.rows.update(id, key, CellValue::Boolean(!checked));
    tracing::debug!(row = %id, column = %key, checked = !checked, "checkbox toggled");
    Some(Cmd::Redraw)
}
