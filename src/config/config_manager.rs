// ==========================================
// 数据导入预览 - 配置管理器
// ==========================================
// 职责: 配置加载与查询
// 存储: JSON 文件（缺省键使用默认值）
// ==========================================

use crate::config::preview_config_trait::PreviewConfigReader;
use crate::engine::column_builder::ColumnLabels;
use crate::i18n;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },
}

// ==========================================
// PreviewConfig - 配置项全集
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub locale: String,
    pub serial_column_label: Option<String>,
    pub identifier_marker: Option<String>,
    pub skip_blank_rows: bool,
    pub header_match_case_sensitive: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            serial_column_label: None,
            identifier_marker: None,
            skip_blank_rows: true,
            header_match_case_sensitive: false,
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: PreviewConfig,
}

impl ConfigManager {
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: PreviewConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(path = %path.display(), locale = %config.locale, "配置加载完成");
        Ok(Self { config })
    }

    /// 从默认位置加载；文件不存在时使用默认配置
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::default())
            }
        }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// 应用语言设置
    pub fn apply_locale(&self) {
        i18n::set_locale(&self.config.locale);
    }

    /// 生成列标题文本（未配置项按当前语言翻译）
    pub fn column_labels(&self) -> ColumnLabels {
        let localized = ColumnLabels::localized();
        ColumnLabels {
            identifier_marker: self
                .identifier_marker()
                .unwrap_or(localized.identifier_marker),
            serial_label: self.serial_column_label().unwrap_or(localized.serial_label),
        }
    }
}

/// 默认配置文件路径: <config_dir>/import-preview/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("import-preview").join("config.json"))
}

impl PreviewConfigReader for ConfigManager {
    fn locale(&self) -> String {
        self.config.locale.clone()
    }

    fn serial_column_label(&self) -> Option<String> {
        self.config.serial_column_label.clone()
    }

    fn identifier_marker(&self) -> Option<String> {
        self.config.identifier_marker.clone()
    }

    fn skip_blank_rows(&self) -> bool {
        self.config.skip_blank_rows
    }

    fn header_match_case_sensitive(&self) -> bool {
        self.config.header_match_case_sensitive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"identifier_marker": "Key"}}"#).unwrap();

        let manager = ConfigManager::from_file(temp_file.path()).unwrap();
        assert_eq!(manager.identifier_marker(), Some("Key".to_string()));
        assert_eq!(manager.locale(), "en");
        assert!(manager.skip_blank_rows());
        assert!(!manager.header_match_case_sensitive());
    }

    #[test]
    fn test_configured_labels_override_translation() {
        let manager = ConfigManager::new(PreviewConfig {
            serial_column_label: Some("No.".to_string()),
            identifier_marker: Some("Key".to_string()),
            ..PreviewConfig::default()
        });
        let labels = manager.column_labels();
        assert_eq!(labels.serial_label, "No.");
        assert_eq!(labels.identifier_marker, "Key");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "not json").unwrap();
        let result = ConfigManager::from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = ConfigManager::from_file("/nonexistent/import-preview.json");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
