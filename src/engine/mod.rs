// ==========================================
// 数据导入预览 - 引擎层
// ==========================================
// 职责: 列模型构建 / 行标注 / 变更处理 / 导出 / 样式策略
// 说明: 所有组件无环境状态，模型与日志均以参数传入
// ==========================================

pub mod column_builder;
pub mod error;
pub mod events;
pub mod export;
pub mod mutation;
pub mod row_annotator;
pub mod styling;
pub mod warnings;

// 重导出核心类型
pub use column_builder::{ColumnIdGenerator, ColumnLabels, ColumnModelBuilder, UuidIdGenerator};
pub use error::{PreviewError, PreviewResult};
pub use events::{NoOpEventSink, PreviewEvent, PreviewEventSink, RecordingEventSink};
pub use export::{cell_text, to_flat_rows, write_csv};
pub use mutation::MutationHandler;
pub use row_annotator::{ImportedIndex, RowAnnotator};
pub use styling::{render_cell, style_for, CellFormatter, CellView, ColumnStyle, HeaderTone};
pub use warnings::WarningPanel;
