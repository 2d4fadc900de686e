// ==========================================
// 数据导入预览 - 配置层
// ==========================================
// 职责: 预览引擎配置加载
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod preview_config_trait;

// 重导出核心配置管理器
pub use config_manager::{default_config_path, ConfigError, ConfigManager, PreviewConfig};
pub use preview_config_trait::PreviewConfigReader;
