use crate::classify::{Entity, Interface, Layer, Link, Route};
use crate::model::MessageId;
use crate::playback::{LayerHighlight, Phase, Warning};
use crate::topo::{BroadcastTarget, Coordinates};
use serde::{Deserialize, Serialize};

/// 回放事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayEventKind {
    /// 画布元信息（作为 t=0 的第一条事件）
    Meta {
        entities: Vec<EntityInfo>,
        viewport_width: f64,
        total_messages: usize,
        speed: f64,
    },
    /// 阶段或游标变化
    State {
        phase: Phase,
        current_index: usize,
        absolute_index: usize,
    },
    /// 一条消息被渲染
    Render {
        message_id: MessageId,
        protocol: String,
        message_type: String,
        sequence_index: usize,
        absolute_index: usize,
        layers: Vec<Layer>,
        link: Link,
        route: Option<Route>,
        rule: String,
        /// 例如 `#28a745`
        color: String,
        coords: Coordinates,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        broadcast: Vec<BroadcastTarget>,
        #[serde(skip_serializing_if = "Option::is_none")]
        interface: Option<Interface>,
        explanation: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        highlights: Vec<LayerHighlight>,
    },
    /// 告警（`reason` 为可读文本）
    Warning {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<MessageId>,
    },
    /// 画布元素到期移除
    Expire { message_id: MessageId },
}

impl ReplayEventKind {
    pub fn warning(w: &Warning) -> Self {
        ReplayEventKind::Warning {
            reason: w.to_string(),
            message_id: w.message_id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub name: String,
    pub entity: Entity,
    pub x: f64,
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEvent {
    /// 虚拟时钟（毫秒，和 `SimTime.0` 同口径）
    pub t_ms: u64,
    #[serde(flatten)]
    pub kind: ReplayEventKind,
}
