// ==========================================
// 数据导入预览 - 预览控制器
// ==========================================
// 职责: 接收映射变更意图，更新列映射并触发整体刷新
// 说明: 仅内存持有映射，不做持久化
// 流程: 预览发出事件 → 控制器取走事件 → 更新映射 → 重新匹配表头 → 刷新
// ==========================================

use crate::app::preview::ImportPreview;
use crate::domain::field::SchemaRegistry;
use crate::domain::field_options::{field_options, resolve_field};
use crate::domain::import_log::ImportLogEntry;
use crate::domain::payload::{PreviewPayload, RawTable};
use crate::engine::column_builder::ColumnLabels;
use crate::engine::error::{PreviewError, PreviewResult};
use crate::engine::events::{PreviewEvent, RecordingEventSink};
use crate::importer::header_matcher::{ColumnMapping, HeaderMatcher, MappingOverrides};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub labels: ColumnLabels,
    pub header_match_case_sensitive: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            labels: ColumnLabels::default(),
            header_match_case_sensitive: false,
        }
    }
}

pub struct PreviewController {
    registry: SchemaRegistry,
    doctype: String,
    table: RawTable,
    overrides: MappingOverrides,
    options: ControllerOptions,
    sink: RecordingEventSink,
    preview: ImportPreview,
}

impl PreviewController {
    /// 创建控制器并生成首个预览
    ///
    /// # 返回
    /// - Err(UnknownDoctype): 目标单据类型未加载
    /// - Err(NoFields): 表格无任何列
    #[instrument(skip(registry, table, import_log, options))]
    pub fn new(
        registry: SchemaRegistry,
        doctype: &str,
        table: RawTable,
        import_log: Vec<ImportLogEntry>,
        options: ControllerOptions,
    ) -> PreviewResult<Self> {
        let meta = registry
            .get(doctype)
            .ok_or_else(|| PreviewError::UnknownDoctype(doctype.to_string()))?;
        let overrides = MappingOverrides::new();
        let payload = build_payload(&registry, doctype, &table, &overrides, &options)?;

        let sink = RecordingEventSink::new();
        let preview = ImportPreview::new(
            meta.clone(),
            payload,
            import_log,
            options.labels.clone(),
            Box::new(sink.clone()),
        )?
        .with_field_options(field_options(meta, &registry));

        info!(doctype, headers = table.header_row.len(), rows = table.rows.len(), "预览控制器已创建");

        Ok(Self {
            registry,
            doctype: doctype.to_string(),
            table,
            overrides,
            options,
            sink,
            preview,
        })
    }

    pub fn preview(&self) -> &ImportPreview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut ImportPreview {
        &mut self.preview
    }

    pub fn overrides(&self) -> &MappingOverrides {
        &self.overrides
    }

    /// 应用单个意图到列映射（不刷新）
    pub fn apply(&mut self, event: &PreviewEvent) -> PreviewResult<()> {
        let header_index = event.header_index();
        let index = usize::try_from(header_index)
            .ok()
            .filter(|i| *i < self.table.header_row.len())
            .ok_or(PreviewError::UnknownColumn { header_index })?;

        let mapping = match event {
            PreviewEvent::RemapColumn { fieldname, .. } => {
                let meta = self
                    .registry
                    .get(&self.doctype)
                    .ok_or_else(|| PreviewError::UnknownDoctype(self.doctype.clone()))?;
                if resolve_field(meta, &self.registry, fieldname).is_none() {
                    return Err(PreviewError::UnknownField {
                        doctype: self.doctype.clone(),
                        fieldname: fieldname.clone(),
                    });
                }
                ColumnMapping::Field(fieldname.clone())
            }
            PreviewEvent::SkipImport { .. } => ColumnMapping::Skip,
        };

        self.overrides.insert(index, mapping);
        Ok(())
    }

    /// 处理预览发出的全部待处理意图，有变更时整体刷新
    ///
    /// # 返回
    /// - 成功应用的意图数量
    #[instrument(skip(self), fields(doctype = %self.doctype))]
    pub fn process_events(&mut self) -> PreviewResult<usize> {
        let events = self.sink.drain();
        let mut applied = 0;
        for event in &events {
            match self.apply(event) {
                Ok(()) => applied += 1,
                Err(e) => warn!(event = event.as_str(), error = %e, "映射变更未应用"),
            }
        }

        if applied > 0 {
            self.refresh()?;
        }
        info!(received = events.len(), applied, "映射变更处理完成");
        Ok(applied)
    }

    /// 按当前映射重新生成载荷并刷新预览
    pub fn refresh(&mut self) -> PreviewResult<()> {
        let payload = build_payload(
            &self.registry,
            &self.doctype,
            &self.table,
            &self.overrides,
            &self.options,
        )?;
        self.preview.refresh(payload)
    }

    /// 替换原始表格（新文件上传）；已有映射保持不变
    pub fn replace_table(&mut self, table: RawTable) -> PreviewResult<()> {
        self.table = table;
        self.refresh()
    }
}

fn build_payload(
    registry: &SchemaRegistry,
    doctype: &str,
    table: &RawTable,
    overrides: &MappingOverrides,
    options: &ControllerOptions,
) -> PreviewResult<PreviewPayload> {
    let meta = registry
        .get(doctype)
        .ok_or_else(|| PreviewError::UnknownDoctype(doctype.to_string()))?;
    let matched = HeaderMatcher::new(meta, registry)
        .serial_label(options.labels.serial_label.clone())
        .case_sensitive(options.header_match_case_sensitive)
        .match_headers(&table.header_row, overrides);
    Ok(PreviewPayload::from_table(table, matched.fields, matched.warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::{DocField, DoctypeMeta};
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new().with(
            DoctypeMeta::new("Item")
                .with_field(DocField::new("item_code", "Item Code"))
                .with_field(DocField::new("item_name", "Item Name")),
        )
    }

    fn table() -> RawTable {
        RawTable {
            header_row: vec!["Item Code".to_string(), "Title".to_string()],
            rows: vec![vec![json!("A-001"), json!("Bolt")]],
        }
    }

    #[test]
    fn test_unknown_doctype() {
        let result = PreviewController::new(
            registry(),
            "Customer",
            table(),
            Vec::new(),
            ControllerOptions::default(),
        );
        assert!(matches!(result, Err(PreviewError::UnknownDoctype(dt)) if dt == "Customer"));
    }

    #[test]
    fn test_remap_round_trip() {
        let mut controller =
            PreviewController::new(registry(), "Item", table(), Vec::new(), ControllerOptions::default())
                .unwrap();
        assert!(!controller.preview().columns()[2].is_mapped());

        controller.preview().remap_column(1, Some("item_name")).unwrap();
        assert_eq!(controller.process_events().unwrap(), 1);

        let column = &controller.preview().columns()[2];
        assert!(column.is_mapped());
        assert_eq!(column.id, "item_name");
        assert_eq!(controller.preview().generation(), 2);
    }

    #[test]
    fn test_skip_round_trip() {
        let mut controller =
            PreviewController::new(registry(), "Item", table(), Vec::new(), ControllerOptions::default())
                .unwrap();
        controller.preview().skip_import(0).unwrap();
        controller.process_events().unwrap();

        assert!(!controller.preview().columns()[1].is_mapped());
        assert_eq!(controller.overrides().get(&0), Some(&ColumnMapping::Skip));
    }

    #[test]
    fn test_unknown_field_is_not_applied() {
        let mut controller =
            PreviewController::new(registry(), "Item", table(), Vec::new(), ControllerOptions::default())
                .unwrap();
        let result = controller.apply(&PreviewEvent::RemapColumn {
            header_index: 1,
            fieldname: "missing".to_string(),
        });
        assert!(matches!(result, Err(PreviewError::UnknownField { .. })));

        controller.preview().remap_column(1, Some("missing")).unwrap();
        assert_eq!(controller.process_events().unwrap(), 0);
        assert_eq!(controller.preview().generation(), 1);
    }
}
