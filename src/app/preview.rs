// ==========================================
// 数据导入预览 - 预览上下文
// ==========================================
// 职责: 持有一次预览的全部状态，并把界面事件路由到引擎组件
// 生命周期: 每次 refresh 整体重建列模型/行/导入索引，本地编辑随之丢弃
// 说明: 显式上下文对象，替代全局"当前预览实例"
// ==========================================

use crate::domain::column::{find_by_header_index, Column};
use crate::domain::field::{DoctypeMeta, SchemaRegistry};
use crate::domain::field_options::{field_options, FieldOption};
use crate::domain::import_log::ImportLogEntry;
use crate::domain::payload::{PreviewPayload, Row};
use crate::engine::column_builder::{ColumnLabels, ColumnModelBuilder};
use crate::engine::error::{PreviewError, PreviewResult};
use crate::engine::events::{PreviewEvent, PreviewEventSink};
use crate::engine::export;
use crate::engine::mutation::MutationHandler;
use crate::engine::row_annotator::{ImportedIndex, RowAnnotator};
use crate::engine::styling::{self, CellView, ColumnStyle};
use crate::engine::warnings::WarningPanel;
use crate::i18n::t_with_args;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// RemapDialog - 重映射对话框票据
// ==========================================
// 打开时记录刷新代次，确认时据此校验是否过期
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapDialog {
    pub header_index: i64,
    pub generation: u64,
    pub title: String,
    pub options: Vec<FieldOption>,
}

// ==========================================
// ImportPreview - 预览上下文
// ==========================================
pub struct ImportPreview {
    meta: DoctypeMeta,
    builder: ColumnModelBuilder,
    import_log: Vec<ImportLogEntry>,
    imported: ImportedIndex,
    header_row: Vec<String>,
    columns: Vec<Column>,
    rows: Vec<Row>,
    warnings: WarningPanel,
    field_options: Vec<FieldOption>,
    generation: u64,
    refreshed_at: DateTime<Utc>,
    /// 表格组件需要重绘（由 take_render_request 取走）
    render_pending: bool,
    events: Box<dyn PreviewEventSink>,
}

impl ImportPreview {
    /// 创建预览并执行首次刷新
    ///
    /// # 返回
    /// - Err(NoFields): 载荷没有字段描述符
    pub fn new(
        meta: DoctypeMeta,
        payload: PreviewPayload,
        import_log: Vec<ImportLogEntry>,
        labels: ColumnLabels,
        events: Box<dyn PreviewEventSink>,
    ) -> PreviewResult<Self> {
        let field_options = field_options(&meta, &SchemaRegistry::new());
        let imported = ImportedIndex::build(&import_log);
        let mut preview = Self {
            meta,
            builder: ColumnModelBuilder::new(labels),
            import_log,
            imported,
            header_row: Vec::new(),
            columns: Vec::new(),
            rows: Vec::new(),
            warnings: WarningPanel::default(),
            field_options,
            generation: 0,
            refreshed_at: Utc::now(),
            render_pending: false,
            events,
        };
        preview.refresh(payload)?;
        Ok(preview)
    }

    /// 替换重映射候选字段（默认仅含本单据字段）
    pub fn with_field_options(mut self, options: Vec<FieldOption>) -> Self {
        self.field_options = options;
        self
    }

    // ==========================================
    // 刷新
    // ==========================================

    /// 以新载荷整体重建预览
    ///
    /// 校验先于任何状态变更；失败时保留上一次的预览
    #[instrument(skip_all, fields(doctype = %self.meta.name))]
    pub fn refresh(&mut self, payload: PreviewPayload) -> PreviewResult<()> {
        let columns = self.builder.build(&payload.fields, &self.meta).map_err(|e| {
            warn!(error = %e, "预览刷新被拒绝");
            e
        })?;

        self.columns = columns;
        self.rows = RowAnnotator::normalize(payload.data);
        self.header_row = payload.header_row;
        self.warnings = WarningPanel::aggregate(payload.warnings);
        self.generation += 1;
        self.refreshed_at = Utc::now();
        self.render_pending = true;

        info!(
            generation = self.generation,
            columns = self.columns.len(),
            rows = self.rows.len(),
            warnings = self.warnings.lines().len(),
            "预览刷新完成"
        );
        Ok(())
    }

    /// 替换导入日志并重建成功索引
    pub fn set_import_log(&mut self, import_log: Vec<ImportLogEntry>) {
        self.imported = ImportedIndex::build(&import_log);
        self.import_log = import_log;
        debug!(imported = self.imported.len(), "导入日志已更新");
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn doctype(&self) -> &DoctypeMeta {
        &self.meta
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn header_row(&self) -> &[String] {
        &self.header_row
    }

    pub fn warnings(&self) -> &WarningPanel {
        &self.warnings
    }

    pub fn import_log(&self) -> &[ImportLogEntry] {
        &self.import_log
    }

    pub fn field_options(&self) -> &[FieldOption] {
        &self.field_options
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    /// 行是否已被成功导入（按当前表格中的序号判断）
    pub fn is_row_imported(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| self.imported.contains(cells))
    }

    pub fn column_style(&self, col: usize) -> Option<ColumnStyle> {
        self.columns.get(col).map(styling::style_for)
    }

    pub fn render_cell(&self, row: usize, col: usize) -> PreviewResult<CellView> {
        let column = self
            .columns
            .get(col)
            .ok_or(PreviewError::CellOutOfRange { row, col })?;
        let cells = self
            .rows
            .get(row)
            .ok_or(PreviewError::CellOutOfRange { row, col })?;

        let empty = Value::String(String::new());
        let value = cells.get(col).unwrap_or(&empty);
        Ok(styling::render_cell(column, value, self.is_row_imported(row)))
    }

    // ==========================================
    // 表格编辑（来自表格组件）
    // ==========================================

    /// 就地编辑单元格；跳过列不可编辑
    pub fn edit_cell(&mut self, row: usize, col: usize, value: Value) -> PreviewResult<()> {
        let column = self
            .columns
            .get(col)
            .ok_or(PreviewError::CellOutOfRange { row, col })?;
        if !column.editable {
            return Err(PreviewError::CellNotEditable { col });
        }

        let cells = self
            .rows
            .get_mut(row)
            .ok_or(PreviewError::CellOutOfRange { row, col })?;
        if cells.len() <= col {
            cells.resize(col + 1, Value::String(String::new()));
        }
        cells[col] = RowAnnotator::normalize_cell(value);
        Ok(())
    }

    /// 追加一行空单元格（仅本地，下次刷新即丢弃）
    ///
    /// 追加后请求重绘，表格组件经 take_render_request 得知需重新读取 rows()
    ///
    /// # 返回
    /// - 新行下标
    pub fn add_row(&mut self) -> usize {
        MutationHandler::add_row(&mut self.rows, self.columns.len());
        self.render_pending = true;
        debug!(rows = self.rows.len(), "已追加空行，请求重绘");
        self.rows.len() - 1
    }

    /// 取走重绘请求（刷新或追加行之后为 true，取走后复位）
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_pending)
    }

    // ==========================================
    // 映射变更意图
    // ==========================================

    /// 发出重映射意图；未选择字段时不派发
    pub fn remap_column(
        &self,
        header_index: i64,
        fieldname: Option<&str>,
    ) -> PreviewResult<Option<PreviewEvent>> {
        let event = MutationHandler::remap_column(&self.columns, header_index, fieldname)
            .map_err(|e| {
                warn!(error = %e, "重映射被拒绝");
                e
            })?;
        if let Some(event) = &event {
            self.dispatch(event.clone());
        }
        Ok(event)
    }

    /// 发出跳过导入意图
    pub fn skip_import(&self, header_index: i64) -> PreviewResult<PreviewEvent> {
        let event = MutationHandler::skip_import(&self.columns, header_index).map_err(|e| {
            warn!(error = %e, "跳过导入被拒绝");
            e
        })?;
        self.dispatch(event.clone());
        Ok(event)
    }

    /// 打开重映射对话框
    pub fn open_remap_dialog(&self, header_index: i64) -> PreviewResult<RemapDialog> {
        let column = find_by_header_index(&self.columns, header_index)
            .ok_or(PreviewError::UnknownColumn { header_index })?;

        Ok(RemapDialog {
            header_index,
            generation: self.generation,
            title: t_with_args("preview.remap_title", &[("name", column.title.as_str())]),
            options: self.field_options.clone(),
        })
    }

    /// 确认对话框选择
    ///
    /// # 返回
    /// - Ok(Some(event)): 已派发
    /// - Ok(None): 未选择字段，对话框保持打开
    /// - Err(StaleReference): 对话框打开后预览已刷新
    pub fn confirm_remap(
        &self,
        dialog: &RemapDialog,
        fieldname: Option<&str>,
    ) -> PreviewResult<Option<PreviewEvent>> {
        if dialog.generation != self.generation {
            warn!(
                opened_at = dialog.generation,
                current = self.generation,
                "重映射对话框已过期"
            );
            return Err(PreviewError::StaleReference {
                opened_at: dialog.generation,
                current: self.generation,
            });
        }
        self.remap_column(dialog.header_index, fieldname)
    }

    /// 取消对话框（不产生任何变更）
    pub fn cancel_remap(&self, dialog: RemapDialog) {
        debug!(header_index = dialog.header_index, "重映射已取消");
    }

    // ==========================================
    // 导出
    // ==========================================

    pub fn to_flat_rows(&self) -> Vec<Vec<Value>> {
        export::to_flat_rows(&self.rows)
    }

    fn dispatch(&self, event: PreviewEvent) {
        info!(
            event = event.as_str(),
            header_index = event.header_index(),
            "发出映射变更意图"
        );
        if let Err(e) = self.events.publish(event) {
            error!(error = %e, "事件发布失败");
        }
    }
}
