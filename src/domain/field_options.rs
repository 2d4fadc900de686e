// ==========================================
// 数据导入预览 - 重映射候选字段
// ==========================================
// 职责: 为字段选择器提供目标字段候选项
// 规则: 本单据数据字段 + 子表字段（table.fieldname）
// ==========================================

use crate::domain::field::{DocField, DoctypeMeta, FieldDescriptor, SchemaRegistry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// 选中后回传的值
    pub value: String,
    /// 下拉显示文本
    pub label: String,
}

/// 解析后的目标字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField<'a> {
    pub field: &'a DocField,
    /// 字段所属单据类型
    pub parent_type: &'a str,
}

impl ResolvedField<'_> {
    pub fn to_descriptor(&self) -> FieldDescriptor {
        FieldDescriptor::mapped(
            self.field.fieldname.clone(),
            self.field.display_label().to_string(),
            self.parent_type.to_string(),
        )
        .with_fieldtype(self.field.fieldtype.clone())
    }
}

/// 列出目标单据类型的候选字段
pub fn field_options(meta: &DoctypeMeta, registry: &SchemaRegistry) -> Vec<FieldOption> {
    let mut options: Vec<FieldOption> = meta
        .data_fields()
        .map(|f| FieldOption {
            value: f.fieldname.clone(),
            label: f.display_label().to_string(),
        })
        .collect();

    for table in meta.table_fields() {
        let Some(child) = table.options.as_deref().and_then(|dt| registry.get(dt)) else {
            continue;
        };
        options.extend(child.data_fields().map(|f| FieldOption {
            value: format!("{}.{}", table.fieldname, f.fieldname),
            label: format!("{} ({})", f.display_label(), child.name),
        }));
    }

    options
}

/// 将候选值解析回字段定义
pub fn resolve_field<'a>(
    meta: &'a DoctypeMeta,
    registry: &'a SchemaRegistry,
    value: &str,
) -> Option<ResolvedField<'a>> {
    match value.split_once('.') {
        None => meta
            .data_fields()
            .find(|f| f.fieldname == value)
            .map(|field| ResolvedField {
                field,
                parent_type: &meta.name,
            }),
        Some((table_field, fieldname)) => {
            let table = meta.table_fields().find(|f| f.fieldname == table_field)?;
            let child = registry.get(table.options.as_deref()?)?;
            child
                .data_fields()
                .find(|f| f.fieldname == fieldname)
                .map(|field| ResolvedField {
                    field,
                    parent_type: &child.name,
                })
        }
    }
}
