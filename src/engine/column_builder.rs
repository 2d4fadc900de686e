// ==========================================
// 数据导入预览 - 列模型构建器
// ==========================================
// 职责: 字段描述符 + 表头位置 → 有序列模型
// 规则: 先判断跳过，再处理映射
// 红线: 列顺序 = 描述符顺序；列 id 全模型唯一
// ==========================================

use crate::domain::column::{Align, Column, ColumnKind};
use crate::domain::field::{DoctypeMeta, FieldDescriptor};
use crate::engine::error::{PreviewError, PreviewResult};
use crate::i18n;
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

// ==========================================
// ColumnLabels - 列标题中使用的固定文本
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabels {
    /// 命名规则绑定字段的标识前缀
    pub identifier_marker: String,
    /// 序号列标题
    pub serial_label: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            identifier_marker: "ID".to_string(),
            serial_label: "Sr. No".to_string(),
        }
    }
}

impl ColumnLabels {
    /// 按当前语言生成
    pub fn localized() -> Self {
        Self {
            identifier_marker: i18n::t("preview.identifier"),
            serial_label: i18n::t("preview.serial_no"),
        }
    }
}

// ==========================================
// ColumnIdGenerator - 跳过列身份生成
// ==========================================
pub trait ColumnIdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// 基于 UUID v4 的随机令牌
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl ColumnIdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

// ==========================================
// ColumnModelBuilder - 列模型构建器
// ==========================================
pub struct ColumnModelBuilder {
    labels: ColumnLabels,
    id_generator: Box<dyn ColumnIdGenerator>,
}

impl Default for ColumnModelBuilder {
    fn default() -> Self {
        Self::new(ColumnLabels::default())
    }
}

impl ColumnModelBuilder {
    pub fn new(labels: ColumnLabels) -> Self {
        Self::with_id_generator(labels, Box::new(UuidIdGenerator))
    }

    pub fn with_id_generator(labels: ColumnLabels, id_generator: Box<dyn ColumnIdGenerator>) -> Self {
        Self {
            labels,
            id_generator,
        }
    }

    pub fn labels(&self) -> &ColumnLabels {
        &self.labels
    }

    /// 构建列模型
    ///
    /// # 参数
    /// - fields: 字段描述符（下标 0 为序号列）
    /// - meta: 目标单据类型元数据（仅读取命名规则）
    ///
    /// # 返回
    /// - Ok(Vec<Column>): 与描述符等长、同序的列
    /// - Err(NoFields): 描述符为空
    pub fn build(&self, fields: &[FieldDescriptor], meta: &DoctypeMeta) -> PreviewResult<Vec<Column>> {
        if fields.is_empty() {
            return Err(PreviewError::NoFields);
        }

        let naming_rule = meta.naming_rule();
        let mut used_ids: HashSet<String> = HashSet::with_capacity(fields.len());
        let mut columns = Vec::with_capacity(fields.len());

        for (i, df) in fields.iter().enumerate() {
            let header_index = i as i64 - 1;

            if df.skip_import {
                let id = self.fresh_id(&used_ids);
                used_ids.insert(id.clone());
                columns.push(Column {
                    id,
                    title: df.label.clone(),
                    header_index,
                    kind: ColumnKind::Skipped { serial: i == 0 },
                    editable: false,
                    focusable: false,
                    align: Align::Left,
                });
                continue;
            }

            let mut title = df.label.clone();
            if df.parent_type != meta.name {
                title = format!("{} ({})", df.label, df.parent_type);
            }
            if naming_rule
                .as_ref()
                .is_some_and(|rule| rule.binds_field(&df.fieldname))
            {
                title = format!("{} ({})", self.labels.identifier_marker, df.label);
            }

            let mut id = df.fieldname.clone();
            if used_ids.contains(&id) {
                // 同一字段被多列映射时追加后缀，保持 id 唯一
                let mut n = 2;
                while used_ids.contains(&format!("{}-{}", df.fieldname, n)) {
                    n += 1;
                }
                warn!(fieldname = %df.fieldname, header_index, "字段被重复映射");
                id = format!("{}-{}", df.fieldname, n);
            }
            used_ids.insert(id.clone());

            columns.push(Column {
                id,
                title,
                header_index,
                kind: ColumnKind::Mapped {
                    fieldname: df.fieldname.clone(),
                    parent_type: df.parent_type.clone(),
                },
                editable: true,
                focusable: true,
                align: Align::for_fieldtype(df.fieldtype.as_deref()),
            });
        }

        debug!(
            total = columns.len(),
            mapped = columns.iter().filter(|c| c.is_mapped()).count(),
            "列模型构建完成"
        );

        Ok(columns)
    }

    fn fresh_id(&self, used: &HashSet<String>) -> String {
        loop {
            let id = self.id_generator.next_id();
            if !used.contains(&id) {
                return id;
            }
            debug!(id = %id, "列 id 冲突，重新生成");
        }
    }
}
