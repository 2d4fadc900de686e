// ==========================================
// 数据导入预览 - 控制器事件发布
// ==========================================
// 职责: 定义重映射/跳过导入意图及其发布 trait
// 说明: 引擎只发出意图，映射的持久化与下一次刷新由控制器负责
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// 预览事件
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PreviewEvent {
    /// 将表头列重新映射到目标字段
    RemapColumn { header_index: i64, fieldname: String },
    /// 跳过表头列的导入
    SkipImport { header_index: i64 },
}

impl PreviewEvent {
    /// 事件名（与控制器约定一致）
    pub fn as_str(&self) -> &str {
        match self {
            PreviewEvent::RemapColumn { .. } => "remap_column",
            PreviewEvent::SkipImport { .. } => "skip_import",
        }
    }

    pub fn header_index(&self) -> i64 {
        match self {
            PreviewEvent::RemapColumn { header_index, .. }
            | PreviewEvent::SkipImport { header_index } => *header_index,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 预览事件接收者
///
/// 由外围控制器实现；引擎不关心事件之后如何落地
pub trait PreviewEventSink: Send + Sync {
    fn publish(&self, event: PreviewEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作接收者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventSink;

impl PreviewEventSink for NoOpEventSink {
    fn publish(&self, event: PreviewEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventSink: 跳过事件发布 - event={}, header_index={}",
            event.as_str(),
            event.header_index()
        );
        Ok(())
    }
}

/// 记录型接收者
///
/// 克隆后共享同一队列，控制器通过 `drain` 取走待处理事件
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<PreviewEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取走全部已记录事件
    pub fn drain(&self) -> Vec<PreviewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn snapshot(&self) -> Vec<PreviewEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreviewEventSink for RecordingEventSink {
    fn publish(&self, event: PreviewEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut events = self
            .events
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;
        events.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let remap = PreviewEvent::RemapColumn {
            header_index: 2,
            fieldname: "item_name".to_string(),
        };
        assert_eq!(remap.as_str(), "remap_column");
        assert_eq!(remap.header_index(), 2);
        assert_eq!(PreviewEvent::SkipImport { header_index: 0 }.as_str(), "skip_import");
    }

    #[test]
    fn test_recording_sink_shares_queue() {
        let sink = RecordingEventSink::new();
        let handle = sink.clone();
        sink.publish(PreviewEvent::SkipImport { header_index: 1 }).unwrap();

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.drain(), vec![PreviewEvent::SkipImport { header_index: 1 }]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(PreviewEvent::SkipImport { header_index: 3 }).unwrap();
        assert_eq!(json["event"], "skip_import");
        assert_eq!(json["header_index"], 3);
    }
}
