// ==========================================
// 数据导入预览 - 核心库
// ==========================================
// 职责: 导入数据与目标单据结构、历史导入日志的对账
// 输出: 可编辑预览表格（列分类 + 行导入成功标注）
// 边界: 不持久化映射、不执行导入、不校验单元格类型
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 字段/列/日志/载荷
pub mod domain;

// 引擎层 - 对账与列映射
pub mod engine;

// 导入源层 - 文件解析与表头匹配
pub mod importer;

// 配置层
pub mod config;

// 应用层 - 预览上下文与控制器
pub mod app;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use app::{ControllerOptions, ImportPreview, PreviewController, RemapDialog};
pub use domain::{
    Column, ColumnClass, ColumnKind, DocField, DoctypeMeta, FieldDescriptor, ImportLogEntry,
    NamingRule, PreviewPayload, RawTable, Row, SchemaRegistry,
};
pub use engine::{
    ColumnLabels, ColumnModelBuilder, MutationHandler, PreviewError, PreviewEvent,
    PreviewEventSink, PreviewResult, RowAnnotator,
};

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
