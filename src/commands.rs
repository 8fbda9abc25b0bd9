//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::image::ImagePayload;
use crate::model::RowId;
use crate::project::DocumentKind;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the UI
    Redraw,
    /// Decode a binary image; sends `ImageMsg::Decoded` on success
    DecodeImage { row_id: RowId, payload: ImagePayload },
    /// Hand the rendered document to the host's print facility
    Print { kind: DocumentKind },
}

impl Cmd {
    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // The decoded image arrives later with its own redraw
            Cmd::DecodeImage { .. } => false,
            Cmd::Print { .. } => false,
        }
    }
}
