//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::io::Cursor;

use partsheet::columns::ColumnKey;
use partsheet::config::AppConfig;
use partsheet::grid::GridMode;
use partsheet::image::ImagePayload;
use partsheet::messages::{GridMsg, Msg};
use partsheet::model::{AppModel, CellValue, Row, RowStore};
use partsheet::update::update;

/// Create a test model with `rows` empty rows and nothing selected
pub fn test_model(rows: usize) -> AppModel {
    AppModel::new(AppConfig {
        initial_rows: rows,
        ..AppConfig::default()
    })
}

/// Create a test model with a cell selected
pub fn test_model_selected(rows: usize, row: usize, key: ColumnKey) -> AppModel {
    let mut model = test_model(rows);
    update(&mut model, Msg::click(row, key.index()));
    assert_eq!(model.grid.mode(), GridMode::Selected(pos(row, key)));
    model
}

pub fn pos(row: usize, key: ColumnKey) -> partsheet::grid::CellPosition {
    partsheet::grid::CellPosition::at(row, key)
}

/// Send a sequence of grid messages
pub fn send_grid(model: &mut AppModel, msgs: impl IntoIterator<Item = GridMsg>) {
    for msg in msgs {
        update(model, Msg::Grid(msg));
    }
}

/// Type a string into the open draft
pub fn type_text(model: &mut AppModel, text: &str) {
    send_grid(model, text.chars().map(GridMsg::EditInsertChar));
}

/// Stored text of a cell ("" for non-text cells)
pub fn cell_text(model: &AppModel, row: usize, key: ColumnKey) -> String {
    model
        .rows
        .get(row)
        .map(|r| r.text(key).to_string())
        .unwrap_or_default()
}

/// Set a text/number cell directly in the store
pub fn set_text(model: &mut AppModel, row: usize, key: ColumnKey, text: &str) {
    let id = model.rows.get(row).expect("row exists").id();
    let value = CellValue::from_text(key.display(), text).expect("text column");
    model.rows.update(id, key, value);
}

/// A store whose rows are built from `(column, text)` pairs
pub fn store_with(rows: &[&[(ColumnKey, &str)]]) -> RowStore {
    let mut store = RowStore::new();
    for cells in rows {
        let mut row = store.new_row();
        for &(key, text) in *cells {
            let value = match key {
                ColumnKey::Purchase => CellValue::Boolean(text == "true"),
                _ => CellValue::from_text(key.display(), text).expect("text column"),
            };
            row = row.with(key, value);
        }
        store.append(row);
    }
    store
}

/// A filled row flagged (or not) for purchase
pub fn part_row(store: &mut RowStore, drawing_no: &str, total: &str, purchase: bool) -> Row {
    store
        .new_row()
        .with(ColumnKey::DrawingNo, CellValue::Text(drawing_no.into()))
        .with(ColumnKey::Quantity, CellValue::Number("2".into()))
        .with(ColumnKey::TotalPrice, CellValue::Number(total.into()))
        .with(ColumnKey::Purchase, CellValue::Boolean(purchase))
}

/// A real PNG of the given size, encoded in memory
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("png encoding");
    out.into_inner()
}

pub fn png_payload(width: u32, height: u32) -> ImagePayload {
    ImagePayload::new("image/png", png_bytes(width, height))
}
