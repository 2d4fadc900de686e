// ==========================================
// 数据导入预览 - 端到端流程测试
// ==========================================
// 流程: CSV 文件 → 表头匹配 → 预览 → 重映射/跳过 → 刷新 → 导出
// ==========================================


use import_preview::engine::write_csv;
use import_preview::importer::{ParserOptions, UniversalFileParser};
use import_preview::{
    ColumnClass, ControllerOptions, ImportLogEntry, PreviewController, PreviewError,
};
use serde_json::json;
use test_helpers::{create_test_csv, item_registry};

fn controller_from_csv(lines: &[&str], log: Vec<ImportLogEntry>) -> PreviewController {
    let file = create_test_csv(lines).unwrap();
    let table = UniversalFileParser::new(ParserOptions::default())
        .parse(file.path())
        .unwrap();
    PreviewController::new(item_registry(), "Item", table, log, ControllerOptions::default()).unwrap()
}

#[test]
fn test_csv_to_preview() {
    let controller = controller_from_csv(
        &["Item Code,Notes,Barcode (Item Barcode)", "A-001,first,111", "A-002,,222"],
        vec![ImportLogEntry::succeeded(["2"])],
    );
    let preview = controller.preview();

    let classes: Vec<ColumnClass> = preview.columns().iter().map(|c| c.class()).collect();
    assert_eq!(
        classes,
        vec![ColumnClass::Serial, ColumnClass::Mapped, ColumnClass::Skipped, ColumnClass::Mapped]
    );
    assert_eq!(preview.columns()[1].title, "ID (Item Code)");
    assert_eq!(preview.columns()[3].title, "Barcode (Item Barcode)");

    // "Notes" 无法映射
    assert_eq!(preview.warnings().lines().len(), 1);

    assert_eq!(preview.rows().len(), 2);
    assert_eq!(preview.rows()[1][2], json!(""));
    assert!(!preview.is_row_imported(0));
    assert!(preview.is_row_imported(1));
    assert!(preview.render_cell(1, 0).unwrap().import_success);
    assert!(!preview.render_cell(1, 1).unwrap().import_success);
}

#[test]
fn test_remap_then_skip_round_trip() {
    let mut controller = controller_from_csv(
        &["Item Code,Title", "A-001,Bolt"],
        Vec::new(),
    );
    assert_eq!(controller.preview().generation(), 1);

    let dialog = controller.preview().open_remap_dialog(1).unwrap();
    assert!(dialog.options.iter().any(|o| o.value == "item_name"));
    let event = controller
        .preview()
        .confirm_remap(&dialog, Some("item_name"))
        .unwrap();
    assert!(event.is_some());
    assert_eq!(controller.process_events().unwrap(), 1);

    let preview = controller.preview();
    assert_eq!(preview.generation(), 2);
    assert_eq!(preview.columns()[2].fieldname(), Some("item_name"));
    assert_eq!(preview.columns()[2].title, "Item Name");

    // 旧对话框已过期
    let stale = controller.preview().confirm_remap(&dialog, Some("item_code"));
    assert!(matches!(
        stale,
        Err(PreviewError::StaleReference { opened_at: 1, current: 2 })
    ));

    controller.preview().skip_import(0).unwrap();
    controller.process_events().unwrap();
    let preview = controller.preview();
    assert_eq!(preview.columns()[1].class(), ColumnClass::Skipped);
    assert!(!preview.columns()[1].editable);
}

#[test]
fn test_out_of_range_index_emits_nothing() {
    let mut controller = controller_from_csv(&["Item Code", "A-001"], Vec::new());

    assert!(controller.preview().remap_column(5, Some("item_name")).is_err());
    assert!(controller.preview().skip_import(-1).is_err());
    assert!(controller.preview().remap_column(0, None).unwrap().is_none());

    assert_eq!(controller.process_events().unwrap(), 0);
    assert_eq!(controller.preview().generation(), 1);
}

#[test]
fn test_edit_add_row_and_export() {
    let mut controller = controller_from_csv(&["Item Code,Notes", "A-001,x"], Vec::new());
    let preview = controller.preview_mut();

    preview.edit_cell(0, 1, json!("A-009")).unwrap();
    assert_eq!(
        preview.edit_cell(0, 2, json!("y")),
        Err(PreviewError::CellNotEditable { col: 2 })
    );
    preview.add_row();
    assert_eq!(preview.rows().len(), 2);
    assert!(preview.rows()[1].iter().all(|cell| cell == &json!("")));

    let flat = preview.to_flat_rows();
    assert_eq!(flat[0], vec![json!(1), json!("A-009"), json!("x")]);

    let header: Vec<String> = preview.columns().iter().map(|c| c.title.clone()).collect();
    let mut out = Vec::new();
    write_csv(&header, &flat, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Sr. No,ID (Item Code),Notes\n1,A-009,x\n"));
}

#[test]
fn test_replace_table_keeps_overrides() {
    let mut controller = controller_from_csv(&["Item Code,Title", "A-001,Bolt"], Vec::new());
    controller.preview().skip_import(0).unwrap();
    controller.process_events().unwrap();

    let file = create_test_csv(&["Item Code,Title", "B-001,Nut", "B-002,Washer"]).unwrap();
    let table = UniversalFileParser::new(ParserOptions::default())
        .parse(file.path())
        .unwrap();
    controller.replace_table(table).unwrap();

    let preview = controller.preview();
    assert_eq!(preview.rows().len(), 2);
    assert_eq!(preview.columns()[1].class(), ColumnClass::Skipped);
    assert_eq!(preview.generation(), 3);
}

#[test]
fn test_ragged_csv_rows_align_to_columns() {
    let controller = controller_from_csv(
        &["Item Code,Notes", "A-001,x,extra,more", "A-002"],
        Vec::new(),
    );
    let preview = controller.preview();
    let width = preview.columns().len();

    assert_eq!(width, 3);
    assert!(preview.rows().iter().all(|row| row.len() == width));
    assert_eq!(preview.to_flat_rows()[0], vec![json!(1), json!("A-001"), json!("x")]);
    assert_eq!(preview.to_flat_rows()[1], vec![json!(2), json!("A-002"), json!("")]);
    // "Notes" 无法映射 + 第 1 行多余单元格
    assert_eq!(preview.warnings().lines().len(), 2);
}
