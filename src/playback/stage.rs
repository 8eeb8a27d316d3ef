//! 画布元素登记表
//!
//! 每个已渲染元素带一个过期时间；按消息 id 索引，因此同一时刻同一条消息
//! 最多对应一个元素。`clear` 用于播放开始和重置。

use crate::model::MessageId;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Arrow,
    Broadcast,
    DirectionWarning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageElement {
    pub id: ElementId,
    pub message_id: MessageId,
    pub kind: ElementKind,
    pub created_at: SimTime,
    pub expires_at: SimTime,
}

#[derive(Debug, Default)]
pub struct Stage {
    next_id: u64,
    by_message: HashMap<MessageId, StageElement>,
}

impl Stage {
    /// 插入元素；同一消息已有的元素被替换。
    pub fn insert(
        &mut self,
        message_id: MessageId,
        kind: ElementKind,
        now: SimTime,
        ttl: SimTime,
    ) -> StageElement {
        let id = ElementId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let el = StageElement {
            id,
            message_id,
            kind,
            created_at: now,
            expires_at: now.after(ttl),
        };
        if let Some(old) = self.by_message.insert(message_id, el.clone()) {
            trace!(message = %message_id, old = old.id.0, new = id.0, "替换已有元素");
        }
        el
    }

    /// 到期移除：只有元素仍是 `id` 且已到期时才移除（被替换或清空的元素忽略）。
    pub fn expire(&mut self, message_id: MessageId, id: ElementId, now: SimTime) -> bool {
        let due = self
            .by_message
            .get(&message_id)
            .is_some_and(|el| el.id == id && el.expires_at <= now);
        if due {
            self.by_message.remove(&message_id);
        }
        due
    }

    pub fn clear(&mut self) -> usize {
        let n = self.by_message.len();
        self.by_message.clear();
        n
    }

    pub fn get(&self, message_id: MessageId) -> Option<&StageElement> {
        self.by_message.get(&message_id)
    }

    pub fn len(&self) -> usize {
        self.by_message.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_message.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageElement> {
        self.by_message.values()
    }
}
