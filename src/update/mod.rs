//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod grid;
mod image;
mod rows;

use crate::commands::Cmd;
use crate::messages::{ImageMsg, Msg};
use crate::model::AppModel;
use crate::project::ViewType;

#[cfg(debug_assertions)]
use crate::tracing::GridSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::{update_metadata, update_view};
pub use grid::update_grid;
pub use image::update_image;
pub use rows::update_rows;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Grid(m) => {
            // The grid only takes input while it is showing
            if model.view != ViewType::Edit {
                return None;
            }
            grid::update_grid(model, m)
        }
        Msg::Rows(m) => rows::update_rows(model, m),
        Msg::Image(m) => {
            // Cell edits need the grid; a finished decode still lands
            if model.view != ViewType::Edit && !matches!(m, ImageMsg::Decoded { .. }) {
                return None;
            }
            image::update_image(model, m)
        }
        Msg::Metadata(m) => app::update_metadata(model, m),
        Msg::View(m) => app::update_view(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after grid state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = GridSnapshot::capture(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = GridSnapshot::capture(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }
    after.assert_consistent(&msg_name);

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Example outputs:
/// - `Grid::Move(Up)`
/// - `Grid::EditInsertChar('x')`
/// - `Rows::Add`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Grid(m) => format!("Grid::{:?}", m),
        Msg::Rows(m) => match m {
            crate::messages::RowMsg::ReplaceAll(rows) => {
                format!("Rows::ReplaceAll({} rows)", rows.len())
            }
            other => format!("Rows::{:?}", other),
        },
        Msg::Image(m) => format!("Image::{:?}", m),
        Msg::Metadata(m) => format!("Metadata::{:?}", m),
        Msg::View(m) => format!("View::{:?}", m),
    }
}
