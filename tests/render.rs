//! Document rendering tests

mod common;

use common::{part_row, store_with};
use partsheet::columns::ColumnKey;
use partsheet::config::AppConfig;
use partsheet::image::ImageHandles;
use partsheet::model::{Metadata, MetadataField, RowStore};
use partsheet::project::render::{
    render, RenderOptions, RenderedCell, RenderedDocument, EMPTY_PLACEHOLDER, ROW_NUMBER_LABEL,
};
use partsheet::project::{project, DocumentKind};

fn options() -> RenderOptions {
    RenderOptions::from_config(&AppConfig::default(), "2026/10/16")
}

fn render_doc(kind: DocumentKind, metadata: &Metadata, store: &RowStore) -> RenderedDocument {
    let projection = project(kind, metadata, store.rows());
    render(&projection, &mut ImageHandles::new(), &options())
}

fn texts(row: &[RenderedCell]) -> Vec<&str> {
    row.iter().map(RenderedCell::as_text).collect()
}

#[test]
fn test_header_starts_with_row_number() {
    let doc = render_doc(DocumentKind::Delivery, &Metadata::default(), &RowStore::new());
    assert_eq!(doc.header, [ROW_NUMBER_LABEL, "零件图片", "图号", "规格", "数量", "备注"]);
}

#[test]
fn test_body_cells_are_formatted() {
    let mut store = RowStore::new();
    let row = part_row(&mut store, "A-01", "25", true);
    store.append(row);

    let doc = render_doc(DocumentKind::Quote, &Metadata::default(), &store);

    assert_eq!(doc.body.len(), 1);
    assert_eq!(
        texts(&doc.body[0]),
        ["1", "-", "A-01", "-", "-", "2", "-", "¥25"]
    );
    assert!(doc.placeholder.is_none());
}

#[test]
fn test_row_numbers_count_kept_rows() {
    let store = store_with(&[
        &[(ColumnKey::DrawingNo, "A")],
        &[],
        &[(ColumnKey::DrawingNo, "B")],
    ]);
    let doc = render_doc(DocumentKind::Production, &Metadata::default(), &store);
    let numbers: Vec<&str> = doc.body.iter().map(|r| r[0].as_text()).collect();
    assert_eq!(numbers, ["1", "2"]);
}

#[test]
fn test_empty_document_shows_placeholder() {
    let store = store_with(&[&[(ColumnKey::DrawingNo, "A")]]);
    let doc = render_doc(DocumentKind::Purchase, &Metadata::default(), &store);

    assert!(doc.body.is_empty());
    assert_eq!(doc.placeholder.as_deref(), Some(EMPTY_PLACEHOLDER));
    assert_eq!(doc.total.as_ref().unwrap().value, "¥0.00");
}

#[test]
fn test_total_line() {
    let store = store_with(&[
        &[(ColumnKey::TotalPrice, "10.50")],
        &[(ColumnKey::TotalPrice, "abc")],
    ]);
    let doc = render_doc(DocumentKind::Quote, &Metadata::default(), &store);
    let total = doc.total.unwrap();
    assert_eq!(total.label, "合计金额");
    assert_eq!(total.value, "¥10.50");

    let doc = render_doc(DocumentKind::Delivery, &Metadata::default(), &store);
    assert!(doc.total.is_none());
}

#[test]
fn test_fields_and_footer() {
    let metadata = Metadata::default()
        .with(MetadataField::CompanyName, "精工机械")
        .with(MetadataField::CustomerName, "远东")
        .with(MetadataField::PreparedBy, "李工");
    let doc = render_doc(DocumentKind::Quote, &metadata, &RowStore::new());

    let company: Vec<_> = doc.company.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(company, ["公司名称", "公司地址", "公司联系人"]);
    assert_eq!(doc.company[0].value, "精工机械");
    assert_eq!(doc.company[1].value, "_____");
    let customer = doc.fields.iter().find(|f| f.label == "客户名称").unwrap();
    assert_eq!(customer.value, "远东");

    assert_eq!(doc.footer.prepared_by.label, "制单人");
    assert_eq!(doc.footer.prepared_by.value, "李工");
    assert_eq!(doc.footer.reviewed_by.label, "审核人");
    assert_eq!(doc.footer.reviewed_by.value, "_____");
    assert_eq!(doc.footer.date.label, "制单日期");
    assert_eq!(doc.footer.date.value, "2026/10/16");
    assert_eq!(doc.footer.signature.label, "签字");
}

#[test]
fn test_purchase_footer_uses_ship_date() {
    let metadata = Metadata::default().with(MetadataField::ShipDate, "2026-03-05");
    let doc = render_doc(DocumentKind::Purchase, &metadata, &RowStore::new());
    assert_eq!(doc.footer.date.label, "采购日期");
    assert_eq!(doc.footer.date.value, "2026/3/5");

    let doc = render_doc(DocumentKind::Purchase, &Metadata::default(), &RowStore::new());
    assert_eq!(doc.footer.date.value, "2026/10/16");
}

#[test]
fn test_remarks_only_when_filled() {
    let doc = render_doc(DocumentKind::Quote, &Metadata::default(), &RowStore::new());
    assert!(doc.remarks.is_none());

    let metadata = Metadata::default().with(MetadataField::Remarks, "含税价");
    let doc = render_doc(DocumentKind::Quote, &metadata, &RowStore::new());
    assert_eq!(doc.remarks.unwrap().value, "含税价");
}

#[test]
fn test_currency_symbol_from_config() {
    let config = AppConfig {
        currency_symbol: "$".into(),
        ..AppConfig::default()
    };
    let store = store_with(&[&[(ColumnKey::UnitPrice, "3"), (ColumnKey::TotalPrice, "6")]]);
    let meta = Metadata::default();
    let projection = project(DocumentKind::Quote, &meta, store.rows());
    let doc = render(
        &projection,
        &mut ImageHandles::new(),
        &RenderOptions::from_config(&config, "today"),
    );

    assert_eq!(doc.body[0][6].as_text(), "$3");
    assert_eq!(doc.body[0][7].as_text(), "$6");
    assert_eq!(doc.total.unwrap().value, "$6.00");
}

// ========================================================================
// Output formats
// ========================================================================

#[test]
fn test_html_output() {
    let store = store_with(&[&[(ColumnKey::DrawingNo, "<A&B>")]]);
    let metadata = Metadata::default().with(MetadataField::CustomerName, "\"远东\"");
    let html = render_doc(DocumentKind::Delivery, &metadata, &store).to_html();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>送货单</title>"));
    assert!(html.contains("<th>序号</th>"));
    assert!(html.contains("<td>&lt;A&amp;B&gt;</td>"));
    assert!(html.contains("&quot;远东&quot;"));
    assert!(!html.contains("暂无数据"));
}

#[test]
fn test_html_placeholder_spans_table() {
    let html = render_doc(DocumentKind::Delivery, &Metadata::default(), &RowStore::new()).to_html();
    assert!(html.contains("<td class=\"empty\" colspan=\"6\">暂无数据</td>"));
}

#[test]
fn test_text_output() {
    let mut store = RowStore::new();
    let row = part_row(&mut store, "A-01", "12.5", false);
    store.append(row);
    let text = render_doc(DocumentKind::Quote, &Metadata::default(), &store).to_text();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "报价单");
    assert!(lines.contains(&"序号\t零件图片\t图号\t规格\t材料\t数量\t单价\t总价"));
    assert!(lines.contains(&"1\t-\tA-01\t-\t-\t2\t-\t¥12.5"));
    assert!(lines.contains(&"合计金额: ¥12.50"));
    assert!(text.contains("制单日期: 2026/10/16"));
}

#[test]
fn test_json_output() {
    let store = store_with(&[&[(ColumnKey::Purchase, "true"), (ColumnKey::TotalPrice, "1")]]);
    let json = render_doc(DocumentKind::Purchase, &Metadata::default(), &store)
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["kind"], "purchase");
    assert_eq!(value["title"], "采购单");
    assert_eq!(value["body"][0][0]["kind"], "text");
    assert_eq!(value["body"][0][0]["value"], "1");
    assert_eq!(value["total"]["value"], "¥1.00");
    assert!(value.get("placeholder").is_none());
    assert!(value.get("remarks").is_none());
}
