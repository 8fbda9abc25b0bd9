//! Row list update handlers

use crate::commands::Cmd;
use crate::messages::RowMsg;
use crate::model::AppModel;

/// Handle row messages (add, delete, replace)
///
/// Structural changes other than append leave the grid `Idle`: positions
/// held by the selection may no longer point at the same row.
pub fn update_rows(model: &mut AppModel, msg: RowMsg) -> Option<Cmd> {
    match msg {
        RowMsg::Add => {
            let row = model.rows.new_row();
            tracing::debug!(row = %row.id(), "row added");
            model.rows.append(row);
            Some(Cmd::Redraw)
        }

        RowMsg::Delete(id) => {
            model.rows.remove(id)?;
            tracing::debug!(row = %id, remaining = model.rows.len(), "row deleted");
            model.grid.clear();
            model.images.release(id);
            Some(Cmd::Redraw)
        }

        RowMsg::ReplaceAll(rows) => {
            model.rows.replace_all(rows);
            model.grid.clear();
            model.images.retain_live(&model.rows);
            Some(Cmd::Redraw)
        }
    }
}
