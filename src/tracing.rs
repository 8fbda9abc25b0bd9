//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging grid
//! selection, editing, and state transition issues.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=grid=debug,message=debug` - scoped filtering
//! - `RUST_LOG=partsheet::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/partsheet/logs/partsheet.log` with daily
//! rotation. File logging uses debug level by default.

use std::fmt;

use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::grid::GridMode;
use crate::model::AppModel;
use crate::project::ViewType;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`) and goes to stderr,
/// so rendered documents on stdout stay clean.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = tfmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "partsheet.log");
            Some(
                tfmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of grid state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub view: ViewType,
    pub mode: GridMode,
    pub row_count: usize,
    pub draft: Option<String>,
    pub image_handles: usize,
}

impl GridSnapshot {
    pub fn capture(model: &AppModel) -> Self {
        Self {
            view: model.view,
            mode: model.grid.mode(),
            row_count: model.rows.len(),
            draft: model.grid.editing().map(|e| e.buffer().to_string()),
            image_handles: model.images.len(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &GridSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.view != other.view {
            changes.push(format!("view: {:?} → {:?}", self.view, other.view));
        }
        if self.mode != other.mode {
            changes.push(format!("mode: {} → {}", ModeDisplay(self.mode), ModeDisplay(other.mode)));
        }
        if self.row_count != other.row_count {
            changes.push(format!("rows: {} → {}", self.row_count, other.row_count));
        }
        if self.draft != other.draft {
            changes.push(format!("draft: {:?} → {:?}", self.draft, other.draft));
        }
        if self.image_handles != other.image_handles {
            changes.push(format!(
                "image handles: {} → {}",
                self.image_handles, other.image_handles
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }

    /// Panic if the selection points outside the grid
    pub fn assert_consistent(&self, context: &str) {
        let pos = match self.mode {
            GridMode::Idle => return,
            GridMode::Selected(pos) | GridMode::Editing(pos) => pos,
        };
        assert!(
            pos.is_within(self.row_count),
            "[{}] selection ({}, {}) outside grid of {} rows",
            context,
            pos.row,
            pos.col,
            self.row_count
        );
    }
}

struct ModeDisplay(GridMode);

impl fmt::Display for ModeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            GridMode::Idle => write!(f, "Idle"),
            GridMode::Selected(p) => write!(f, "Selected({},{})", p.row, p.col),
            GridMode::Editing(p) => write!(f, "Editing({},{})", p.row, p.col),
        }
    }
}
