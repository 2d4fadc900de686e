// ==========================================
// 数据导入预览 - 行标注器
// ==========================================
// 职责: 原始单元格规范化 + 历史导入成功判定
// 规则: Null → 空字符串，其余原样保留（不转换、不 TRIM）
// 关联键: row[0] 为行序号
// ==========================================

use crate::domain::import_log::{serial_key, ImportLogEntry};
use crate::domain::payload::Row;
use serde_json::Value;
use std::collections::HashSet;

pub struct RowAnnotator;

impl RowAnnotator {
    /// 规范化原始行（幂等）
    pub fn normalize(raw_rows: Vec<Vec<Value>>) -> Vec<Row> {
        raw_rows
            .into_iter()
            .map(|row| row.into_iter().map(Self::normalize_cell).collect())
            .collect()
    }

    pub fn normalize_cell(cell: Value) -> Value {
        match cell {
            Value::Null => Value::String(String::new()),
            other => other,
        }
    }

    /// 行是否已被某条成功的导入日志覆盖
    ///
    /// 线性扫描日志；批量场景使用 [`ImportedIndex`]
    pub fn was_imported(row: &[Value], import_log: &[ImportLogEntry]) -> bool {
        let Some(key) = row.first().and_then(serial_key) else {
            return false;
        };
        import_log
            .iter()
            .any(|entry| entry.success && entry.covers(&key))
    }
}

// ==========================================
// ImportedIndex - 成功序号索引
// ==========================================
// 每次刷新预计算一次，行查询 O(1)
#[derive(Debug, Clone, Default)]
pub struct ImportedIndex {
    keys: HashSet<String>,
}

impl ImportedIndex {
    pub fn build(import_log: &[ImportLogEntry]) -> Self {
        let keys = import_log
            .iter()
            .filter(|entry| entry.success)
            .flat_map(|entry| entry.row_indexes.iter().filter_map(serial_key))
            .collect();
        Self { keys }
    }

    pub fn contains(&self, row: &[Value]) -> bool {
        row.first()
            .and_then(serial_key)
            .is_some_and(|key| self.keys.contains(&key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_null_to_empty() {
        let rows = RowAnnotator::normalize(vec![vec![json!(1), Value::Null, json!(" x ")]]);
        assert_eq!(rows, vec![vec![json!(1), json!(""), json!(" x ")]]);
    }

    #[test]
    fn test_normalize_idempotent() {
        let raw = vec![
            vec![json!(1), Value::Null, json!(2.5), json!(true)],
            vec![json!("2"), json!(""), Value::Null],
        ];
        let once = RowAnnotator::normalize(raw);
        let twice = RowAnnotator::normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_was_imported_matches_successful_entry() {
        let log = vec![ImportLogEntry::succeeded(["1", "3"])];
        assert!(RowAnnotator::was_imported(&[json!("3"), json!("x")], &log));
        assert!(!RowAnnotator::was_imported(&[json!("2"), json!("x")], &log));
    }

    #[test]
    fn test_was_imported_ignores_failed_entries() {
        let log = vec![
            ImportLogEntry::failed([2]),
            ImportLogEntry::succeeded([4]),
        ];
        assert!(!RowAnnotator::was_imported(&[json!(2)], &log));
        assert!(RowAnnotator::was_imported(&[json!(4)], &log));
    }

    #[test]
    fn test_was_imported_empty_log_and_row() {
        assert!(!RowAnnotator::was_imported(&[json!(1)], &[]));
        let log = vec![ImportLogEntry::succeeded([1])];
        assert!(!RowAnnotator::was_imported(&[], &log));
    }

    #[test]
    fn test_number_and_string_serials_match() {
        let log = vec![ImportLogEntry::succeeded([3])];
        assert!(RowAnnotator::was_imported(&[json!("3")], &log));
    }

    #[test]
    fn test_index_agrees_with_scan() {
        let log = vec![
            ImportLogEntry::succeeded([1, 3]),
            ImportLogEntry::failed([2]),
            ImportLogEntry::succeeded(["5"]),
        ];
        let index = ImportedIndex::build(&log);
        for serial in 0..7 {
            let row = vec![json!(serial)];
            assert_eq!(index.contains(&row), RowAnnotator::was_imported(&row, &log));
        }
        assert_eq!(index.len(), 3);
    }
}
