//! Parts-list grid engine
//!
//! Spreadsheet-like editing of the row store:
//! - Cell selection by click, arrow keys and Tab
//! - In-place editing of text/number cells through a draft buffer
//! - Tabular clipboard import anchored at the selected cell
//!
//! # Architecture
//!
//! The grid owns only selection/edit state. Rows live in the
//! [`RowStore`](crate::model::RowStore), which every operation takes
//! explicitly, so the state machine can be driven without an app model.
//!
//! ```text
//! GridState
//! ├── selection: Option<CellPosition>
//! └── editing:   Option<CellEditState>   (draft buffer, only at selection)
//! ```

mod model;
mod navigation;
pub mod paste;

pub use model::{CellEdit, CellEditState, CellPosition, GridMode, GridState};
pub use paste::{import_tabular, is_tabular, parse_tabular};
