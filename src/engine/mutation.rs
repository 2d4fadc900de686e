// ==========================================
// 数据导入预览 - 变更处理器
// ==========================================
// 职责: 重映射 / 跳过导入 / 追加空行
// 状态: 每列仅 {mapped, skipped}，命令为一次性转移而非切换
// 红线: 重映射与跳过只产生意图，不修改本地列模型
// ==========================================

use crate::domain::column::{find_by_header_index, Column};
use crate::domain::payload::Row;
use crate::engine::error::{PreviewError, PreviewResult};
use crate::engine::events::PreviewEvent;
use serde_json::Value;
use tracing::debug;

pub struct MutationHandler;

impl MutationHandler {
    /// 生成重映射意图
    ///
    /// # 返回
    /// - Ok(Some(event)): 校验通过，待发布
    /// - Ok(None): 未选择字段，不派发
    /// - Err(UnknownColumn): 表头下标不对应当前任何列
    pub fn remap_column(
        columns: &[Column],
        header_index: i64,
        fieldname: Option<&str>,
    ) -> PreviewResult<Option<PreviewEvent>> {
        Self::ensure_column(columns, header_index)?;

        let Some(fieldname) = fieldname.map(str::trim).filter(|f| !f.is_empty()) else {
            debug!(header_index, "未选择目标字段，忽略重映射");
            return Ok(None);
        };

        Ok(Some(PreviewEvent::RemapColumn {
            header_index,
            fieldname: fieldname.to_string(),
        }))
    }

    /// 生成跳过导入意图
    pub fn skip_import(columns: &[Column], header_index: i64) -> PreviewResult<PreviewEvent> {
        Self::ensure_column(columns, header_index)?;
        Ok(PreviewEvent::SkipImport { header_index })
    }

    /// 追加一行空单元格（仅本地，不发事件）
    pub fn add_row(rows: &mut Vec<Row>, column_count: usize) {
        rows.push(vec![Value::String(String::new()); column_count]);
    }

    fn ensure_column(columns: &[Column], header_index: i64) -> PreviewResult<()> {
        match find_by_header_index(columns, header_index) {
            Some(_) => Ok(()),
            None => Err(PreviewError::UnknownColumn { header_index }),
        }
    }
}
