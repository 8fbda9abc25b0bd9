//! Image cell update handlers
//!
//! Processes ImageMsg messages. URLs are stored immediately; binary
//! payloads are handed to the runtime for decoding and come back as
//! `ImageMsg::Decoded`.

use crate::columns::ColumnKey;
use crate::commands::Cmd;
use crate::image::{accepts_drop, classify_paste, ImagePaste};
use crate::messages::ImageMsg;
use crate::model::{AppModel, CellValue, ImageValue, RowId};

pub fn update_image(model: &mut AppModel, msg: ImageMsg) -> Option<Cmd> {
    match msg {
        ImageMsg::Paste { row, payload } => {
            let row_id = model.rows.get(row)?.id();
            match classify_paste(&payload)? {
                ImagePaste::Decode(payload) => Some(Cmd::DecodeImage { row_id, payload }),
                ImagePaste::Url(url) => set_image(model, row_id, ImageValue::Url(url)),
            }
        }

        ImageMsg::Drop { row, file } => {
            let row_id = model.rows.get(row)?.id();
            if !accepts_drop(&file) {
                tracing::debug!(row = %row_id, mime = %file.mime, "non-image drop ignored");
                return None;
            }
            Some(Cmd::DecodeImage {
                row_id,
                payload: file,
            })
        }

        ImageMsg::Clear { row } => {
            let row_id = model.rows.get(row)?.id();
            set_image(model, row_id, ImageValue::Absent)
        }

        ImageMsg::Decoded { row_id, blob } => {
            tracing::debug!(row = %row_id, width = blob.width, height = blob.height, "image decoded");
            set_image(model, row_id, ImageValue::Blob(blob))
        }
    }
}

/// Store a new image value and drop the row's stale display handle
fn set_image(model: &mut AppModel, row_id: RowId, value: ImageValue) -> Option<Cmd> {
    if !model
        .rows
        .update(row_id, ColumnKey::PartImage, CellValue::Image(value))
    {
        return None;
    }
    model.images.release(row_id);
    Some(Cmd::Redraw)
}
