// ==========================================
// 数据导入预览 - 字段与单据类型元数据
// ==========================================
// 职责: 字段描述符 / 单据类型元数据 / 命名规则
// 来源: 外部 Schema 元数据存储（本引擎只读）
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// FieldDescriptor - 字段描述符
// ==========================================
// 与表头位置按下标对齐（下标 0 为合成的序号列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default)]
    pub fieldname: String,
    pub label: String,
    /// 字段所属单据类型（子表字段为子表类型）
    #[serde(default, rename = "parent", alias = "parent_type")]
    pub parent_type: String,
    #[serde(default)]
    pub skip_import: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fieldtype: Option<String>,
}

impl FieldDescriptor {
    /// 创建映射字段描述符
    pub fn mapped(
        fieldname: impl Into<String>,
        label: impl Into<String>,
        parent_type: impl Into<String>,
    ) -> Self {
        Self {
            fieldname: fieldname.into(),
            label: label.into(),
            parent_type: parent_type.into(),
            skip_import: false,
            fieldtype: None,
        }
    }

    /// 创建跳过导入的描述符（无字段身份）
    pub fn skipped(label: impl Into<String>) -> Self {
        Self {
            fieldname: String::new(),
            label: label.into(),
            parent_type: String::new(),
            skip_import: true,
            fieldtype: None,
        }
    }

    pub fn with_fieldtype(mut self, fieldtype: impl Into<String>) -> Self {
        self.fieldtype = Some(fieldtype.into());
        self
    }
}

// ==========================================
// 命名规则 (Naming Rule)
// ==========================================
// 对应元数据中的 autoname 字符串
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingRule {
    /// field:<fieldname> - 直接取某字段的值作为记录名
    ByField(String),
    /// naming_series:
    NamingSeries,
    Hash,
    Autoincrement,
    Prompt,
    /// format:<expr>
    Format(String),
    /// 未识别的规则，原样保留
    Other(String),
}

impl NamingRule {
    /// 解析 autoname 字符串（空串返回 None）
    pub fn parse(autoname: &str) -> Option<Self> {
        let rule = autoname.trim();
        if rule.is_empty() {
            return None;
        }

        if let Some(fieldname) = rule.strip_prefix("field:") {
            return Some(NamingRule::ByField(fieldname.trim().to_string()));
        }
        if let Some(expr) = rule.strip_prefix("format:") {
            return Some(NamingRule::Format(expr.to_string()));
        }

        Some(match rule.to_lowercase().as_str() {
            "naming_series:" => NamingRule::NamingSeries,
            "hash" => NamingRule::Hash,
            "autoincrement" => NamingRule::Autoincrement,
            "prompt" => NamingRule::Prompt,
            _ => NamingRule::Other(rule.to_string()),
        })
    }

    /// 该规则是否直接绑定到指定字段
    pub fn binds_field(&self, fieldname: &str) -> bool {
        matches!(self, NamingRule::ByField(f) if f == fieldname)
    }
}

impl fmt::Display for NamingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingRule::ByField(field) => write!(f, "field:{}", field),
            NamingRule::NamingSeries => write!(f, "naming_series:"),
            NamingRule::Hash => write!(f, "hash"),
            NamingRule::Autoincrement => write!(f, "autoincrement"),
            NamingRule::Prompt => write!(f, "prompt"),
            NamingRule::Format(expr) => write!(f, "format:{}", expr),
            NamingRule::Other(raw) => write!(f, "{}", raw),
        }
    }
}

// ==========================================
// DocField - 单据类型字段定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocField {
    pub fieldname: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_fieldtype")]
    pub fieldtype: String,
    /// Table 类型字段存放子表单据类型名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    #[serde(default)]
    pub reqd: bool,
}

fn default_fieldtype() -> String {
    "Data".to_string()
}

/// 不承载数据的布局类字段
const LAYOUT_FIELDTYPES: &[&str] = &[
    "Section Break",
    "Column Break",
    "Tab Break",
    "HTML",
    "Button",
    "Fold",
    "Heading",
];

/// 子表字段类型
const TABLE_FIELDTYPES: &[&str] = &["Table", "Table MultiSelect"];

impl DocField {
    pub fn new(fieldname: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            fieldname: fieldname.into(),
            label: label.into(),
            fieldtype: default_fieldtype(),
            options: None,
            reqd: false,
        }
    }

    /// 子表字段（options 为子表单据类型）
    pub fn table(
        fieldname: impl Into<String>,
        label: impl Into<String>,
        child_doctype: impl Into<String>,
    ) -> Self {
        Self {
            fieldname: fieldname.into(),
            label: label.into(),
            fieldtype: "Table".to_string(),
            options: Some(child_doctype.into()),
            reqd: false,
        }
    }

    pub fn is_layout(&self) -> bool {
        LAYOUT_FIELDTYPES.contains(&self.fieldtype.as_str())
    }

    pub fn is_table(&self) -> bool {
        TABLE_FIELDTYPES.contains(&self.fieldtype.as_str())
    }

    /// 显示标签（标签为空时退化为字段名）
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.fieldname
        } else {
            &self.label
        }
    }
}

// ==========================================
// DoctypeMeta - 目标单据类型元数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctypeMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoname: Option<String>,
    #[serde(default)]
    pub fields: Vec<DocField>,
}

impl DoctypeMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            autoname: None,
            fields: Vec::new(),
        }
    }

    pub fn with_autoname(mut self, autoname: impl Into<String>) -> Self {
        self.autoname = Some(autoname.into());
        self
    }

    pub fn with_field(mut self, field: DocField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn naming_rule(&self) -> Option<NamingRule> {
        self.autoname.as_deref().and_then(NamingRule::parse)
    }

    pub fn get_field(&self, fieldname: &str) -> Option<&DocField> {
        self.fields.iter().find(|f| f.fieldname == fieldname)
    }

    /// 可承载数据的字段（排除布局与子表字段）
    pub fn data_fields(&self) -> impl Iterator<Item = &DocField> {
        self.fields.iter().filter(|f| !f.is_layout() && !f.is_table())
    }

    pub fn table_fields(&self) -> impl Iterator<Item = &DocField> {
        self.fields.iter().filter(|f| f.is_table())
    }
}

// ==========================================
// SchemaRegistry - 单据类型元数据查找
// ==========================================
// 假定在引擎运行前已全部加载
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    doctypes: HashMap<String, DoctypeMeta>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, meta: DoctypeMeta) {
        self.doctypes.insert(meta.name.clone(), meta);
    }

    pub fn with(mut self, meta: DoctypeMeta) -> Self {
        self.register(meta);
        self
    }

    pub fn get(&self, doctype: &str) -> Option<&DoctypeMeta> {
        self.doctypes.get(doctype)
    }

    pub fn len(&self) -> usize {
        self.doctypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctypes.is_empty()
    }
}
