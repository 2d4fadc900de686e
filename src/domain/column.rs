// ==========================================
// 数据导入预览 - 列模型
// ==========================================
// 职责: 预览表格的列定义（由字段描述符派生）
// 红线: 列 id 在整个模型内唯一；列顺序 = 描述符顺序
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 序号列的表头下标（不对应任何原始表头）
pub const SERIAL_HEADER_INDEX: i64 = -1;

// ==========================================
// ColumnKind - 列分类（带标签的变体）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    /// 已映射到目标字段
    Mapped {
        fieldname: String,
        parent_type: String,
    },
    /// 跳过导入（无字段身份）
    Skipped {
        /// 是否为合成的序号列
        serial: bool,
    },
}

// ==========================================
// ColumnClass - 呈现层分派键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnClass {
    Mapped,
    Skipped,
    Serial,
}

impl fmt::Display for ColumnClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnClass::Mapped => write!(f, "MAPPED"),
            ColumnClass::Skipped => write!(f, "SKIPPED"),
            ColumnClass::Serial => write!(f, "SERIAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// 数值类字段类型（右对齐）
const NUMERIC_FIELDTYPES: &[&str] = &["Int", "Float", "Currency", "Percent"];

impl Align {
    /// 按字段类型决定对齐；类型未知时左对齐
    pub fn for_fieldtype(fieldtype: Option<&str>) -> Self {
        match fieldtype {
            Some(ft) if NUMERIC_FIELDTYPES.contains(&ft) => Align::Right,
            _ => Align::Left,
        }
    }
}

// ==========================================
// Column - 预览列
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// 稳定身份: 映射列为字段名，跳过列为随机令牌
    pub id: String,
    /// 显示标题
    pub title: String,
    /// 原始表头中的位置（描述符下标 - 1）
    pub header_index: i64,
    pub kind: ColumnKind,
    pub editable: bool,
    pub focusable: bool,
    pub align: Align,
}

impl Column {
    pub fn is_mapped(&self) -> bool {
        matches!(self.kind, ColumnKind::Mapped { .. })
    }

    pub fn is_serial(&self) -> bool {
        matches!(self.kind, ColumnKind::Skipped { serial: true })
    }

    pub fn class(&self) -> ColumnClass {
        match self.kind {
            ColumnKind::Mapped { .. } => ColumnClass::Mapped,
            ColumnKind::Skipped { serial: true } => ColumnClass::Serial,
            ColumnKind::Skipped { serial: false } => ColumnClass::Skipped,
        }
    }

    /// 映射列对应的目标字段名
    pub fn fieldname(&self) -> Option<&str> {
        match &self.kind {
            ColumnKind::Mapped { fieldname, .. } => Some(fieldname),
            ColumnKind::Skipped { .. } => None,
        }
    }
}

/// 按表头下标查找列（序号列不参与）
pub fn find_by_header_index(columns: &[Column], header_index: i64) -> Option<&Column> {
    if header_index == SERIAL_HEADER_INDEX {
        return None;
    }
    columns.iter().find(|c| c.header_index == header_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skipped(header_index: i64, serial: bool) -> Column {
        Column {
            id: format!("tok{}", header_index),
            title: "x".to_string(),
            header_index,
            kind: ColumnKind::Skipped { serial },
            editable: false,
            focusable: false,
            align: Align::Left,
        }
    }

    #[test]
    fn test_column_class() {
        assert_eq!(skipped(-1, true).class(), ColumnClass::Serial);
        assert_eq!(skipped(2, false).class(), ColumnClass::Skipped);

        let mapped = Column {
            id: "item_code".to_string(),
            title: "Item Code".to_string(),
            header_index: 0,
            kind: ColumnKind::Mapped {
                fieldname: "item_code".to_string(),
                parent_type: "Item".to_string(),
            },
            editable: true,
            focusable: true,
            align: Align::Left,
        };
        assert_eq!(mapped.class(), ColumnClass::Mapped);
        assert_eq!(mapped.fieldname(), Some("item_code"));
    }

    #[test]
    fn test_align_for_fieldtype() {
        assert_eq!(Align::for_fieldtype(Some("Currency")), Align::Right);
        assert_eq!(Align::for_fieldtype(Some("Int")), Align::Right);
        assert_eq!(Align::for_fieldtype(Some("Data")), Align::Left);
        assert_eq!(Align::for_fieldtype(None), Align::Left);
    }

    #[test]
    fn test_find_by_header_index_ignores_serial() {
        let columns = vec![skipped(-1, true), skipped(0, false)];
        assert!(find_by_header_index(&columns, -1).is_none());
        assert_eq!(find_by_header_index(&columns, 0).map(|c| c.header_index), Some(0));
        assert!(find_by_header_index(&columns, 1).is_none());
    }
}
