// ==========================================
// 数据导入预览 - 表头匹配器
// ==========================================
// 职责: 表头行 → 字段描述符（含合成序号列）
// 优先级: 显式映射覆写 > 标签/字段名匹配 > 跳过
// 规则: 同一字段被多列映射时仅保留第一列
// ==========================================

use crate::domain::field::{DoctypeMeta, FieldDescriptor, SchemaRegistry};
use crate::domain::field_options::{field_options, resolve_field};
use crate::i18n::t_with_args;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

// ==========================================
// ColumnMapping - 表头列的显式映射
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMapping {
    /// 映射到候选字段（字段名或 table.fieldname）
    Field(String),
    Skip,
}

/// 表头下标 → 显式映射
pub type MappingOverrides = BTreeMap<usize, ColumnMapping>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMatch {
    pub fields: Vec<FieldDescriptor>,
    pub warnings: Vec<String>,
}

pub struct HeaderMatcher<'a> {
    meta: &'a DoctypeMeta,
    registry: &'a SchemaRegistry,
    serial_label: String,
    case_sensitive: bool,
}

impl<'a> HeaderMatcher<'a> {
    pub fn new(meta: &'a DoctypeMeta, registry: &'a SchemaRegistry) -> Self {
        Self {
            meta,
            registry,
            serial_label: "Sr. No".to_string(),
            case_sensitive: false,
        }
    }

    pub fn serial_label(mut self, label: impl Into<String>) -> Self {
        self.serial_label = label.into();
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// 匹配表头行
    pub fn match_headers(&self, header_row: &[String], overrides: &MappingOverrides) -> HeaderMatch {
        let options = field_options(self.meta, self.registry);
        // 字段 → 首个映射它的列号（1 起始）
        let mut used: HashMap<String, String> = HashMap::new();
        let mut warnings = Vec::new();

        let mut serial = FieldDescriptor::skipped(self.serial_label.clone());
        serial.parent_type = self.meta.name.clone();
        let mut fields = vec![serial];

        for (i, header) in header_row.iter().enumerate() {
            let column_no = (i + 1).to_string();

            let target = match overrides.get(&i) {
                Some(ColumnMapping::Skip) => None,
                Some(ColumnMapping::Field(value)) => {
                    if resolve_field(self.meta, self.registry, value).is_none() {
                        warnings.push(t_with_args(
                            "importer.unknown_override",
                            &[("index", column_no.as_str()), ("field", value.as_str())],
                        ));
                        None
                    } else {
                        Some(value.clone())
                    }
                }
                None => {
                    let found = options
                        .iter()
                        .find(|o| self.same(&o.label, header) || self.same(&o.value, header))
                        .map(|o| o.value.clone());
                    if found.is_none() {
                        warnings.push(t_with_args(
                            "importer.unmapped_column",
                            &[("index", column_no.as_str()), ("header", header.as_str())],
                        ));
                    }
                    found
                }
            };

            let descriptor = match target {
                Some(value) if used.contains_key(&value) => {
                    let first = used.get(&value).map(String::as_str).unwrap_or_default();
                    warnings.push(t_with_args(
                        "importer.duplicate_mapping",
                        &[
                            ("field", value.as_str()),
                            ("first", first),
                            ("index", column_no.as_str()),
                        ],
                    ));
                    FieldDescriptor::skipped(header.clone())
                }
                Some(value) => {
                    // 上面已校验，解析必定成功
                    let descriptor = resolve_field(self.meta, self.registry, &value)
                        .map(|resolved| resolved.to_descriptor())
                        .unwrap_or_else(|| FieldDescriptor::skipped(header.clone()));
                    used.insert(value, column_no.clone());
                    descriptor
                }
                None => FieldDescriptor::skipped(header.clone()),
            };
            fields.push(descriptor);
        }

        debug!(
            headers = header_row.len(),
            mapped = used.len(),
            warnings = warnings.len(),
            "表头匹配完成"
        );

        HeaderMatch { fields, warnings }
    }

    fn same(&self, candidate: &str, header: &str) -> bool {
        let header = header.trim();
        if self.case_sensitive {
            candidate == header
        } else {
            candidate.to_lowercase() == header.to_lowercase()
        }
    }
}
