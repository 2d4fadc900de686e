// ==========================================
// 数据导入预览 - 预览载荷
// ==========================================
// 职责: 预览刷新的输入（字段描述符 + 原始行 + 警告）
// ==========================================

use crate::domain::field::FieldDescriptor;
use crate::i18n::t_with_args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// 单元格值（不做类型转换）
pub type Cell = Value;

/// 与列顺序对齐的一行
pub type Row = Vec<Cell>;

// ==========================================
// RawTable - 文件解析结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub header_row: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

// ==========================================
// PreviewPayload - 预览载荷
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewPayload {
    #[serde(default)]
    pub header_row: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl PreviewPayload {
    /// 由原始表格组装载荷
    ///
    /// 每行前置 1 起始的序号，并对齐到表头长度:
    /// 短行以 Null 补齐，超出表头的单元格被截断并产生一条警告
    pub fn from_table(
        table: &RawTable,
        fields: Vec<FieldDescriptor>,
        mut warnings: Vec<String>,
    ) -> Self {
        let width = table.header_row.len();
        let data = table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                let serial = idx + 1;
                if raw.len() > width {
                    warn!(row = serial, cells = raw.len(), width, "行单元格多于表头，多余部分已截断");
                    warnings.push(t_with_args(
                        "importer.extra_cells",
                        &[
                            ("row", serial.to_string().as_str()),
                            ("count", (raw.len() - width).to_string().as_str()),
                        ],
                    ));
                }

                let mut row = Vec::with_capacity(width + 1);
                row.push(Value::from(serial));
                row.extend(raw.iter().take(width).cloned());
                row.resize(width + 1, Value::Null);
                row
            })
            .collect();

        Self {
            header_row: table.header_row.clone(),
            fields,
            data,
            warnings,
        }
    }
}
