//! Message loop and side-effect execution
//!
//! The runtime owns the model, feeds messages through [`update`], and
//! performs the commands handlers return. Deferred work (image decoding)
//! runs after the handler that requested it has returned; its result comes
//! back as a message through the same queue.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::commands::Cmd;
use crate::image::decode_image;
use crate::messages::{ImageMsg, Msg};
use crate::model::AppModel;
use crate::project::render::{render, RenderOptions, RenderedDocument};
use crate::project::{project, DocumentKind};
use crate::update::update;

/// Outside-world services the runtime needs
pub trait Host {
    /// Send a rendered document to the printer
    fn print(&mut self, document: &RenderedDocument);

    /// The UI should repaint
    fn request_redraw(&mut self) {}
}

/// Host that ignores every request
#[derive(Debug, Default)]
pub struct NullHost;

impl Host for NullHost {
    fn print(&mut self, _document: &RenderedDocument) {}
}

pub struct Runtime<H: Host> {
    model: AppModel,
    host: H,
    options: RenderOptions,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl<H: Host> Runtime<H> {
    /// Documents are dated today unless [`Runtime::with_issue_date`] says otherwise
    pub fn new(model: AppModel, host: H) -> Self {
        let options = RenderOptions::from_config(&model.config, crate::project::render::today());
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            host,
            options,
            msg_tx,
            msg_rx,
        }
    }

    pub fn with_issue_date(mut self, date: impl Into<String>) -> Self {
        self.options.issue_date = date.into();
        self
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_parts(self) -> (AppModel, H) {
        (self.model, self.host)
    }

    /// A sender for messages produced outside the runtime
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Process `msg` and everything it causes, until the queue is empty.
    ///
    /// Returns whether anything asked for a redraw.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let mut redraw = self.step(msg);
        redraw |= self.drain();
        if redraw {
            self.host.request_redraw();
        }
        redraw
    }

    /// Process queued messages (e.g. sent through [`Runtime::sender`])
    pub fn drain(&mut self) -> bool {
        let mut redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            redraw |= self.step(msg);
        }
        redraw
    }

    fn step(&mut self, msg: Msg) -> bool {
        let Some(cmd) = update(&mut self.model, msg) else {
            return false;
        };
        let redraw = cmd.needs_redraw();
        self.process_cmd(cmd);
        redraw
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::DecodeImage { row_id, payload } => match decode_image(&payload) {
                Ok(blob) => {
                    let _ = self
                        .msg_tx
                        .send(Msg::Image(ImageMsg::Decoded { row_id, blob }));
                }
                // The cell keeps its previous value
                Err(e) => tracing::warn!(row = %row_id, mime = %payload.mime, "{}", e),
            },
            Cmd::Print { kind } => {
                let document = self.render(kind);
                tracing::info!(document = kind.name(), rows = document.body.len(), "printing");
                self.host.print(&document);
            }
        }
    }

    /// Render a document from the current model
    pub fn render(&mut self, kind: DocumentKind) -> RenderedDocument {
        let model = &mut self.model;
        let projection = project(kind, &model.metadata, model.rows.rows());
        render(&projection, &mut model.images, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImagePayload;
    use crate::messages::{GridMsg, ViewMsg};
    use crate::project::ViewType;

    #[derive(Default)]
    struct RecordingHost {
        printed: Vec<String>,
        redraws: usize,
    }

    impl Host for RecordingHost {
        fn print(&mut self, document: &RenderedDocument) {
            self.printed.push(document.title.clone());
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }
    }

    #[test]
    fn test_print_goes_to_host() {
        let mut rt = Runtime::new(AppModel::default(), RecordingHost::default());
        rt.dispatch(Msg::switch_view(ViewType::Document(DocumentKind::Quote)));
        rt.dispatch(Msg::View(ViewMsg::Print));
        assert_eq!(rt.host().printed, vec!["报价单".to_string()]);
    }

    #[test]
    fn test_print_in_edit_view_does_nothing() {
        let mut rt = Runtime::new(AppModel::default(), RecordingHost::default());
        assert!(!rt.dispatch(Msg::View(ViewMsg::Print)));
        assert!(rt.host().printed.is_empty());
    }

    #[test]
    fn test_redraw_reported_to_host() {
        let mut rt = Runtime::new(AppModel::default(), RecordingHost::default());
        assert!(rt.dispatch(Msg::click(0, 1)));
        assert!(!rt.dispatch(Msg::Grid(GridMsg::CancelEdit)));
        assert_eq!(rt.host().redraws, 1);
    }

    #[test]
    fn test_failed_decode_leaves_cell_alone() {
        let mut rt = Runtime::new(AppModel::default(), NullHost);
        rt.dispatch(Msg::Image(ImageMsg::Drop {
            row: 0,
            file: ImagePayload::new("image/png", b"garbage".to_vec()),
        }));
        let row = rt.model().rows.get(0).unwrap();
        assert!(row.image().is_absent());
    }

    #[test]
    fn test_sender_messages_processed_on_drain() {
        let mut rt = Runtime::new(AppModel::default(), NullHost);
        rt.sender().send(Msg::click(0, 2)).unwrap();
        assert!(rt.drain());
        assert!(rt.model().grid.selection().is_some());
    }
}
