// ==========================================
// 数据导入预览 - 导入日志
// ==========================================
// 职责: 历史导入尝试的结果记录（外部只读）
// 关联: 行序号 (serial number) ↔ row_indexes
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==========================================
// ImportLogEntry - 单次导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportLogEntry {
    pub success: bool,
    /// 本次尝试覆盖的行序号（数字或字符串）
    #[serde(default)]
    pub row_indexes: Vec<Value>,
    /// 成功时生成的记录名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docname: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ImportLogEntry {
    pub fn new(success: bool, row_indexes: Vec<Value>) -> Self {
        Self {
            success,
            row_indexes,
            docname: None,
            messages: Vec::new(),
            exception: None,
            created_at: None,
        }
    }

    pub fn succeeded<I, V>(row_indexes: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(true, row_indexes.into_iter().map(Into::into).collect())
    }

    pub fn failed<I, V>(row_indexes: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(false, row_indexes.into_iter().map(Into::into).collect())
    }

    /// 本条目是否覆盖指定序号键
    pub fn covers(&self, key: &str) -> bool {
        self.row_indexes
            .iter()
            .filter_map(serial_key)
            .any(|k| k == key)
    }
}

/// 序号值的规范化比较键
///
/// 字符串原样返回，数字取十进制表示（3 与 "3" 相同）；其他类型不参与匹配
pub fn serial_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
