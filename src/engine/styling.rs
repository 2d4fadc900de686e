// ==========================================
// 数据导入预览 - 呈现样式策略
// ==========================================
// 职责: 列分类 → 呈现提示（表头色调 / 单元格弱化 / 导入成功标记）
// 分派: 按 ColumnClass 查找 CellFormatter，不做运行时类型判断
// ==========================================

use crate::domain::column::{Align, Column, ColumnClass};
use crate::engine::export::cell_text;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderTone {
    /// 已映射（绿色）
    Mapped,
    /// 跳过导入（橙色）
    Skipped,
    /// 无强调
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnStyle {
    pub header: HeaderTone,
    /// 列体使用浅色背景
    pub muted_body: bool,
    pub align: Align,
}

pub fn style_for(column: &Column) -> ColumnStyle {
    let (header, muted_body) = match column.class() {
        ColumnClass::Mapped => (HeaderTone::Mapped, false),
        ColumnClass::Skipped => (HeaderTone::Skipped, true),
        ColumnClass::Serial => (HeaderTone::Neutral, false),
    };
    ColumnStyle {
        header,
        muted_body,
        align: column.align,
    }
}

// ==========================================
// CellView - 单元格渲染结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub text: String,
    pub muted: bool,
    /// 在单元格前叠加导入成功标记
    pub import_success: bool,
}

pub trait CellFormatter: Send + Sync {
    /// 渲染单元格；imported 为行标注器的结果（只读）
    fn format(&self, value: &Value, imported: bool) -> CellView;
}

pub struct MappedCellFormatter;

impl CellFormatter for MappedCellFormatter {
    fn format(&self, value: &Value, _imported: bool) -> CellView {
        CellView {
            text: cell_text(value),
            muted: false,
            import_success: false,
        }
    }
}

pub struct SkippedCellFormatter;

impl CellFormatter for SkippedCellFormatter {
    fn format(&self, value: &Value, _imported: bool) -> CellView {
        CellView {
            text: cell_text(value),
            muted: true,
            import_success: false,
        }
    }
}

pub struct SerialCellFormatter;

impl CellFormatter for SerialCellFormatter {
    fn format(&self, value: &Value, imported: bool) -> CellView {
        CellView {
            text: cell_text(value),
            muted: true,
            import_success: imported,
        }
    }
}

static MAPPED: MappedCellFormatter = MappedCellFormatter;
static SKIPPED: SkippedCellFormatter = SkippedCellFormatter;
static SERIAL: SerialCellFormatter = SerialCellFormatter;

pub fn formatter_for(class: ColumnClass) -> &'static dyn CellFormatter {
    match class {
        ColumnClass::Mapped => &MAPPED,
        ColumnClass::Skipped => &SKIPPED,
        ColumnClass::Serial => &SERIAL,
    }
}

pub fn render_cell(column: &Column, value: &Value, imported: bool) -> CellView {
    formatter_for(column.class()).format(value, imported)
}
