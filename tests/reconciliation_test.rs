// ==========================================
// 数据导入预览 - 列模型与行标注集成测试
// ==========================================


use import_preview::engine::{to_flat_rows, ColumnLabels, ColumnModelBuilder, ImportedIndex, RowAnnotator};
use import_preview::{DoctypeMeta, FieldDescriptor, ImportLogEntry, PreviewError};
use serde_json::{json, Value};
use std::collections::HashSet;
use test_helpers::{item_meta, serial};

#[test]
fn test_serial_and_name_scenario() {
    // 目标类型按 item_code 命名，name 字段不受影响
    let fields = vec![serial(), FieldDescriptor::mapped("name", "Name", "Item")];
    let columns = ColumnModelBuilder::default().build(&fields, &item_meta()).unwrap();

    assert!(!columns[0].is_mapped());
    assert!(!columns[0].editable);
    assert_eq!(columns[1].title, "Name");
    assert!(columns[1].editable);
}

#[test]
fn test_import_log_scenario() {
    let log = vec![ImportLogEntry::succeeded(["1", "3"])];
    assert!(RowAnnotator::was_imported(&[json!("3"), json!("A")], &log));
    assert!(!RowAnnotator::was_imported(&[json!("2"), json!("B")], &log));
}

#[test]
fn test_titles_for_mixed_descriptors() {
    let fields = vec![
        serial(),
        FieldDescriptor::mapped("item_code", "Item Code", "Item"),
        FieldDescriptor::mapped("barcode", "Barcode", "Item Barcode"),
        FieldDescriptor::skipped("Notes"),
        FieldDescriptor::mapped("item_name", "Item Name", "Item"),
    ];
    let columns = ColumnModelBuilder::new(ColumnLabels::default())
        .build(&fields, &item_meta())
        .unwrap();

    let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Sr. No", "ID (Item Code)", "Barcode (Item Barcode)", "Notes", "Item Name"]
    );

    let header_indexes: Vec<i64> = columns.iter().map(|c| c.header_index).collect();
    assert_eq!(header_indexes, vec![-1, 0, 1, 2, 3]);
    assert_eq!(columns.iter().filter(|c| c.header_index == -1).count(), 1);
}

#[test]
fn test_ids_distinct_across_builds() {
    let fields = vec![
        serial(),
        FieldDescriptor::skipped("A"),
        FieldDescriptor::mapped("item_code", "Item Code", "Item"),
        FieldDescriptor::skipped("A"),
    ];
    let builder = ColumnModelBuilder::default();

    for _ in 0..20 {
        let columns = builder.build(&fields, &item_meta()).unwrap();
        let ids: HashSet<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), columns.len());
    }
}

#[test]
fn test_empty_descriptors_rejected() {
    let result = ColumnModelBuilder::default().build(&[], &DoctypeMeta::new("Item"));
    assert_eq!(result, Err(PreviewError::NoFields));
}

#[test]
fn test_normalize_then_flatten_round_trip() {
    let raw = vec![
        vec![json!(1), json!("A-001"), Value::Null, json!(4)],
        vec![json!(2), Value::Null, json!("  spaced  "), json!(false)],
    ];
    let rows = RowAnnotator::normalize(raw);

    assert_eq!(rows[0][2], json!(""));
    assert_eq!(rows[1][2], json!("  spaced  "));
    assert_eq!(to_flat_rows(&rows), rows);
    assert_eq!(RowAnnotator::normalize(rows.clone()), rows);
}

#[test]
fn test_index_precomputed_once_per_log() {
    let log = vec![
        ImportLogEntry::failed([1, 2]),
        ImportLogEntry::succeeded([2]),
        ImportLogEntry::succeeded([2, 4]),
    ];
    let index = ImportedIndex::build(&log);
    let rows = RowAnnotator::normalize(vec![
        vec![json!(1)],
        vec![json!(2)],
        vec![json!(3)],
        vec![json!(4)],
    ]);

    let flags: Vec<bool> = rows.iter().map(|row| index.contains(row)).collect();
    assert_eq!(flags, vec![false, true, false, true]);
    // 日志本身不被修改
    assert_eq!(log.len(), 3);
}
