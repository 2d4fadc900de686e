// ==========================================
// 数据导入预览 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 前置条件错误 / 过期引用错误
// 说明: 导入日志未命中不是错误（即"尚未导入"）
// ==========================================

use thiserror::Error;

/// 预览引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    // ===== 前置条件错误 =====
    #[error("字段描述符为空，无可预览数据")]
    NoFields,

    #[error("表头下标 {header_index} 不对应任何当前列")]
    UnknownColumn { header_index: i64 },

    #[error("单元格越界: 行 {row}, 列 {col}")]
    CellOutOfRange { row: usize, col: usize },

    #[error("列 {col} 不可编辑（跳过导入）")]
    CellNotEditable { col: usize },

    // ===== 过期引用错误 =====
    #[error("重映射对话框已过期: 打开于第 {opened_at} 次刷新，当前为第 {current} 次")]
    StaleReference { opened_at: u64, current: u64 },

    // ===== 控制器错误 =====
    #[error("未知单据类型: {0}")]
    UnknownDoctype(String),

    #[error("单据类型 {doctype} 中不存在字段: {fieldname}")]
    UnknownField { doctype: String, fieldname: String },
}

/// Result 类型别名
pub type PreviewResult<T> = Result<T, PreviewError>;
