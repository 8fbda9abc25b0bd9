//! Application model - the complete state of a parts-list session
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod cell;
pub mod metadata;
pub mod row;

pub use cell::{CellValue, ImageBlob, ImageValue};
pub use metadata::{Metadata, MetadataField};
pub use row::{Row, RowId, RowStore};

use crate::config::AppConfig;
use crate::grid::GridState;
use crate::image::ImageHandles;
use crate::project::ViewType;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// The parts list
    pub rows: RowStore,
    /// Job metadata shown on every document
    pub metadata: Metadata,
    /// Grid selection and edit state
    pub grid: GridState,
    /// Which view is showing (the grid, or one of the documents)
    pub view: ViewType,
    /// Display handles for in-memory images
    pub images: ImageHandles,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppModel {
    /// A fresh session: `config.initial_rows` empty rows and the configured
    /// company details filled in.
    pub fn new(config: AppConfig) -> Self {
        let rows = RowStore::with_empty_rows(config.initial_rows);
        let metadata = Metadata {
            company_name: config.company.name.clone(),
            company_address: config.company.address.clone(),
            company_contact: config.company.contact.clone(),
            ..Metadata::default()
        };

        Self {
            rows,
            metadata,
            grid: GridState::new(),
            view: ViewType::Edit,
            images: ImageHandles::new(),
            config,
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
