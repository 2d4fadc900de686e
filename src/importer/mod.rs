// ==========================================
// 数据导入预览 - 导入源层
// ==========================================
// 职责: 文件解析 → 原始表格 → 字段描述符
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod header_matcher;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, ParserOptions, UniversalFileParser};
pub use header_matcher::{ColumnMapping, HeaderMatch, HeaderMatcher, MappingOverrides};
