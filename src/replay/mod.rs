//! 回放事件记录（用于离线 HTML 回放）
//!
//! `ReplayLog` 是一个观察者：把状态变化、渲染指令、告警和元素到期按虚拟时间
//! 记成 JSON 事件。可以克隆，一份交给引擎，一份留给调用方在结束后读取。

mod types;

pub use types::{EntityInfo, ReplayEvent, ReplayEventKind};

use crate::classify::Entity;
use crate::model::{Message, MessageId};
use crate::playback::{PlaybackObserver, RenderCommand, StateChange, Warning};
use crate::sim::SimTime;
use crate::topo::Topology;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct ReplayLog {
    events: Arc<Mutex<Vec<ReplayEvent>>>,
}

impl ReplayLog {
    pub fn push(&self, t: SimTime, kind: ReplayEventKind) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ReplayEvent {
                t_ms: t.as_millis(),
                kind,
            });
    }

    /// 记录画布元信息（三个实体的横坐标等）
    pub fn record_meta(&self, at: SimTime, topo: &Topology, total_messages: usize, speed: f64) {
        let entities = Entity::ALL
            .iter()
            .map(|&e| EntityInfo {
                name: e.name().to_string(),
                entity: e,
                x: topo.x_of(e),
            })
            .collect();
        self.push(
            at,
            ReplayEventKind::Meta {
                entities,
                viewport_width: topo.viewport_width(),
                total_messages,
                speed,
            },
        );
    }

    pub fn snapshot(&self) -> Vec<ReplayEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}

impl PlaybackObserver for ReplayLog {
    fn on_state_change(&mut self, at: SimTime, change: &StateChange) {
        self.push(
            at,
            ReplayEventKind::State {
                phase: change.phase,
                current_index: change.current_index,
                absolute_index: change.absolute_index,
            },
        );
    }

    fn on_render_message(&mut self, at: SimTime, message: &Message, render: &RenderCommand) {
        let c = &render.classification;
        self.push(
            at,
            ReplayEventKind::Render {
                message_id: message.id,
                protocol: message.protocol.clone(),
                message_type: message.message_type.clone(),
                sequence_index: render.sequence_index,
                absolute_index: render.absolute_index,
                layers: c.layers.clone(),
                link: c.link,
                route: c.route,
                rule: c.rule.to_string(),
                color: render.color.hex().to_string(),
                coords: render.coords,
                broadcast: render.broadcast.clone(),
                interface: render.interface,
                explanation: render.explanation.clone(),
                highlights: render.highlights.clone(),
            },
        );
    }

    fn on_warning(&mut self, at: SimTime, warning: &Warning) {
        self.push(at, ReplayEventKind::warning(warning));
    }

    fn on_element_expired(&mut self, at: SimTime, message_id: MessageId) {
        self.push(at, ReplayEventKind::Expire { message_id });
    }
}
