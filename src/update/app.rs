//! App message handlers (metadata form, view switching, printing)

use crate::commands::Cmd;
use crate::messages::{MetadataMsg, ViewMsg};
use crate::model::AppModel;
use crate::project::ViewType;

/// Handle metadata form messages
pub fn update_metadata(model: &mut AppModel, msg: MetadataMsg) -> Option<Cmd> {
    match msg {
        MetadataMsg::Set { field, value } => {
            if model.metadata.get(field) == value {
                return None;
            }
            model.metadata = model.metadata.with(field, value);
            Some(Cmd::Redraw)
        }
    }
}

/// Handle view messages
pub fn update_view(model: &mut AppModel, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::Switch(view) => {
            if view == model.view {
                return None;
            }
            if model.view == ViewType::Edit {
                // Leaving the grid blurs it: a pending draft is committed
                model.grid.confirm_edit(&mut model.rows);
                model.grid.clear();
            }
            tracing::debug!(from = ?model.view, to = ?view, "view switched");
            model.view = view;
            Some(Cmd::Redraw)
        }

        ViewMsg::Print => match model.view.document() {
            Some(kind) => Some(Cmd::Print { kind }),
            None => {
                tracing::debug!("print requested outside a document view");
                None
            }
        },
    }
}
