// ==========================================
// 数据导入预览 - 导出
// ==========================================
// 职责: 将当前表格内容（含用户编辑）展平为二维数组
// 规则: 保留所有列（含跳过列），由下游按映射过滤
// ==========================================

use crate::domain::payload::Row;
use serde_json::Value;
use std::io::Write;

/// 展平当前行（无副作用）
pub fn to_flat_rows(rows: &[Row]) -> Vec<Vec<Value>> {
    rows.iter().map(|row| row.to_vec()).collect()
}

/// 单元格文本表示
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 以 CSV 写出（首行为表头）
pub fn write_csv<W: Write>(
    header: &[String],
    rows: &[Vec<Value>],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    if !header.is_empty() {
        csv_writer.write_record(header)?;
    }
    for row in rows {
        csv_writer.write_record(row.iter().map(cell_text))?;
    }
    csv_writer.flush()?;
    Ok(())
}
