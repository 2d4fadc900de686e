// ==========================================
// 数据导入预览 - 警告汇总
// ==========================================
// 引擎只负责汇总，不负责生成警告文本
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningPanel {
    lines: Vec<String>,
}

impl WarningPanel {
    pub fn aggregate<I, S>(warnings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: warnings.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 每条警告一行
    pub fn render_text(&self) -> String {
        self.lines.join("\n")
    }
}
