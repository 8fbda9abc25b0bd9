//! Tabular clipboard import tests

mod common;

use common::{cell_text, pos, send_grid, set_text, test_model, test_model_selected, type_text};
use partsheet::columns::ColumnKey;
use partsheet::grid::GridMode;
use partsheet::messages::{GridMsg, ImageMsg, Msg};
use partsheet::model::ImageValue;
use partsheet::update::update;

#[test]
fn test_paste_grows_store() {
    let mut model = test_model_selected(1, 0, ColumnKey::DrawingNo);

    update(&mut model, Msg::paste("A\tB\nC\tD"));

    assert_eq!(model.rows.len(), 2);
    assert_eq!(cell_text(&model, 0, ColumnKey::DrawingNo), "A");
    assert_eq!(cell_text(&model, 0, ColumnKey::Spec), "B");
    assert_eq!(cell_text(&model, 1, ColumnKey::DrawingNo), "C");
    assert_eq!(cell_text(&model, 1, ColumnKey::Spec), "D");
}

#[test]
fn test_paste_never_truncates() {
    let mut model = test_model_selected(4, 1, ColumnKey::Spec);
    update(&mut model, Msg::paste("x\ny"));
    assert_eq!(model.rows.len(), 4);
    assert_eq!(cell_text(&model, 2, ColumnKey::Spec), "y");
}

#[test]
fn test_paste_keeps_selection() {
    let mut model = test_model_selected(1, 0, ColumnKey::DrawingNo);
    update(&mut model, Msg::paste("A\nB\nC"));
    assert_eq!(model.grid.mode(), GridMode::Selected(pos(0, ColumnKey::DrawingNo)));
}

#[test]
fn test_checkbox_coercion() {
    let mut model = test_model_selected(3, 0, ColumnKey::Purchase);

    update(&mut model, Msg::paste("yes\nno\n"));
    assert!(model.rows.get(0).unwrap().is_purchase());
    assert!(!model.rows.get(1).unwrap().is_purchase());

    update(&mut model, Msg::click(1, ColumnKey::TotalPrice.index()));
    update(&mut model, Msg::paste("1\tTRUE\n2\t\n"));
    assert!(model.rows.get(1).unwrap().is_purchase());
    assert!(!model.rows.get(2).unwrap().is_purchase());
}

#[test]
fn test_image_column_immune_to_text_paste() {
    let mut model = test_model(2);
    let url = "http://example.com/part.png";
    update(
        &mut model,
        Msg::Image(ImageMsg::Paste {
            row: 0,
            payload: partsheet::image::ClipboardPayload::text(url),
        }),
    );
    update(&mut model, Msg::click(0, ColumnKey::PartImage.index()));

    update(&mut model, Msg::paste("img\tP-1\nimg2\tP-2"));

    assert_eq!(model.rows.get(0).unwrap().image(), &ImageValue::Url(url.into()));
    assert!(model.rows.get(1).unwrap().image().is_absent());
    assert_eq!(cell_text(&model, 0, ColumnKey::DrawingNo), "P-1");
    assert_eq!(cell_text(&model, 1, ColumnKey::DrawingNo), "P-2");
}

#[test]
fn test_fields_are_stored_verbatim() {
    let mut model = test_model_selected(1, 0, ColumnKey::Quantity);
    update(&mut model, Msg::paste(" 10 \t3.50元\n"));
    assert_eq!(cell_text(&model, 0, ColumnKey::Quantity), " 10 ");
    assert_eq!(cell_text(&model, 0, ColumnKey::Process), "3.50元");
}

#[test]
fn test_crlf_clipboard() {
    let mut model = test_model_selected(1, 0, ColumnKey::DrawingNo);
    update(&mut model, Msg::paste("A\tB\r\nC\tD\r\n"));
    assert_eq!(model.rows.len(), 2);
    assert_eq!(cell_text(&model, 0, ColumnKey::Spec), "B");
    assert_eq!(cell_text(&model, 1, ColumnKey::Spec), "D");
}

#[test]
fn test_plain_text_paste_is_ignored_when_selected() {
    let mut model = test_model_selected(1, 0, ColumnKey::DrawingNo);
    assert!(update(&mut model, Msg::paste("single")).is_none());
    assert_eq!(cell_text(&model, 0, ColumnKey::DrawingNo), "");
}

#[test]
fn test_paste_without_selection_is_ignored() {
    let mut model = test_model(1);
    assert!(update(&mut model, Msg::paste("A\tB")).is_none());
    assert!(model.rows.get(0).unwrap().is_blank());
}

#[test]
fn test_paste_while_editing_goes_into_draft() {
    let mut model = test_model_selected(1, 0, ColumnKey::Spec);
    set_text(&mut model, 0, ColumnKey::Spec, "M8");

    send_grid(&mut model, [GridMsg::StartEditing]);
    update(&mut model, Msg::paste("x20\tignored"));
    type_text(&mut model, "!");
    send_grid(&mut model, [GridMsg::ConfirmEdit]);

    assert_eq!(model.rows.len(), 1);
    assert_eq!(cell_text(&model, 0, ColumnKey::Spec), "M8x20\tignored!");
}

#[test]
fn test_new_rows_get_fresh_ids() {
    let mut model = test_model_selected(1, 0, ColumnKey::DrawingNo);
    let first = model.rows.get(0).unwrap().id();

    update(&mut model, Msg::paste("a\nb\nc"));

    let ids: Vec<_> = model.rows.iter().map(|r| r.id()).collect();
    assert_eq!(ids[0], first);
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3);
}
