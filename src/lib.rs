//! partsheet - Elm-style parts-list grid and document projector
//!
//! This crate provides the core types and logic for editing a parts list
//! in a spreadsheet-like grid and projecting it into quote, production,
//! delivery and purchase documents.

pub mod cli;
pub mod columns;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod image;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod project;
pub mod runtime;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::AppConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::{Host, Runtime};
