// ==========================================
// 数据导入预览 - 应用层
// ==========================================
// 职责: 预览上下文与控制器，连接表格组件与引擎
// ==========================================

pub mod controller;
pub mod preview;

// 重导出
pub use controller::{ControllerOptions, PreviewController};
pub use preview::{ImportPreview, RemapDialog};
