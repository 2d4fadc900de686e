// ==========================================
// 数据导入预览 - 领域层
// ==========================================
// 职责: 字段描述符 / 列模型 / 导入日志 / 预览载荷
// ==========================================

pub mod column;
pub mod field;
pub mod field_options;
pub mod import_log;
pub mod payload;

// 重导出核心类型
pub use column::{find_by_header_index, Align, Column, ColumnClass, ColumnKind, SERIAL_HEADER_INDEX};
pub use field::{DocField, DoctypeMeta, FieldDescriptor, NamingRule, SchemaRegistry};
pub use field_options::{field_options, resolve_field, FieldOption, ResolvedField};
pub use import_log::{serial_key, ImportLogEntry};
pub use payload::{Cell, PreviewPayload, RawTable, Row};
