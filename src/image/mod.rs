//! Part images
//!
//! Image cells accept pasted or dropped binary images and URL text.
//! Binary payloads are sniffed and decoded with the `image` crate before
//! they are stored. Rendering an in-memory image needs a display handle
//! (a `data:` URL); handles are created lazily, cached per row, and
//! released as soon as the row's image changes or the row goes away.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::model::{ImageBlob, ImageValue, RowId, RowStore};

/// A binary clipboard item or dropped file
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// MIME type as reported by the clipboard / drop source
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything a paste event carries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    /// Binary items, in clipboard order
    pub items: Vec<ImagePayload>,
    /// `text/plain` content, if any
    pub text: Option<String>,
}

impl ClipboardPayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            text: Some(text.into()),
        }
    }

    pub fn image(item: ImagePayload) -> Self {
        Self {
            items: vec![item],
            text: None,
        }
    }
}

/// What pasting into an image cell should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePaste {
    /// Decode a binary image, then store it
    Decode(ImagePayload),
    /// Store a URL right away
    Url(String),
}

/// Pick the image content out of a paste event.
///
/// The first item with an image MIME type wins. Without one, text that
/// looks like an http(s) or `data:image` URL is used.
pub fn classify_paste(payload: &ClipboardPayload) -> Option<ImagePaste> {
    if let Some(item) = payload.items.iter().find(|i| i.mime.contains("image")) {
        return Some(ImagePaste::Decode(item.clone()));
    }
    let text = payload.text.as_deref()?;
    if text.starts_with("http") || text.starts_with("data:image") {
        return Some(ImagePaste::Url(text.to_string()));
    }
    None
}

/// Whether a dropped file should be accepted by an image cell
pub fn accepts_drop(file: &ImagePayload) -> bool {
    file.mime.starts_with("image/")
}

/// Error for an image payload that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// No known image signature in the data
    UnknownFormat,
    /// The format was recognized but decoding failed
    Decode(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::UnknownFormat => write!(f, "unrecognized image format"),
            ImageError::Decode(msg) => write!(f, "image decode failed: {}", msg),
        }
    }
}

impl std::error::Error for ImageError {}

/// Decode a binary image payload into a storable blob.
///
/// The declared MIME type is only a hint; the stored type comes from the
/// data itself.
pub fn decode_image(payload: &ImagePayload) -> Result<ImageBlob, ImageError> {
    let format =
        image::guess_format(&payload.bytes).map_err(|_| ImageError::UnknownFormat)?;
    let decoded = image::load_from_memory_with_format(&payload.bytes, format)
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    let mime = format.to_mime_type();
    if mime != payload.mime {
        tracing::debug!(declared = %payload.mime, detected = mime, "image type differs from declared");
    }

    Ok(ImageBlob::new(
        payload.bytes.clone(),
        mime,
        decoded.width(),
        decoded.height(),
    ))
}

/// `data:` URL for a blob
pub fn data_url(blob: &ImageBlob) -> String {
    format!("data:{};base64,{}", blob.mime, STANDARD.encode(&blob.bytes))
}

#[derive(Debug)]
struct DisplayHandle {
    source: Arc<[u8]>,
    src: String,
}

/// Per-row cache of display handles for in-memory images
#[derive(Debug, Default)]
pub struct ImageHandles {
    handles: HashMap<RowId, DisplayHandle>,
}

impl ImageHandles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderable source for a row's image, without touching the stored value.
    ///
    /// URLs are returned as-is. Blobs get a cached handle, rebuilt only when
    /// the blob itself changed. Calling this repeatedly is idempotent.
    pub fn acquire<'a>(&'a mut self, id: RowId, value: &'a ImageValue) -> Option<&'a str> {
        match value {
            ImageValue::Absent => {
                self.release(id);
                None
            }
            ImageValue::Url(url) => {
                self.release(id);
                Some(url.as_str())
            }
            ImageValue::Blob(blob) => {
                let stale = self
                    .handles
                    .get(&id)
                    .is_some_and(|h| !Arc::ptr_eq(&h.source, &blob.bytes));
                if stale {
                    self.release(id);
                }
                let handle = self.handles.entry(id).or_insert_with(|| {
                    tracing::trace!(%id, "image handle created");
                    DisplayHandle {
                        source: Arc::clone(&blob.bytes),
                        src: data_url(blob),
                    }
                });
                Some(handle.src.as_str())
            }
        }
    }

    /// Drop the handle for a row. Returns whether one existed.
    pub fn release(&mut self, id: RowId) -> bool {
        let released = self.handles.remove(&id).is_some();
        if released {
            tracing::trace!(%id, "image handle released");
        }
        released
    }

    /// Drop handles whose row is gone or whose image no longer matches
    pub fn retain_live(&mut self, store: &RowStore) {
        self.handles.retain(|id, handle| {
            store.find(*id).is_some_and(|row| match row.image() {
                ImageValue::Blob(blob) => Arc::ptr_eq(&handle.source, &blob.bytes),
                _ => false,
            })
        });
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
