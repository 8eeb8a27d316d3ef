//! 回放状态

use crate::model::Message;
use serde::{Deserialize, Serialize};

/// 回放阶段：`Idle → Playing ⇄ Paused → Completed`，`reset` 回到 `Idle`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Paused,
    Completed,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
        }
    }
}

/// 回放状态机唯一的可变状态。
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub phase: Phase,
    /// 当前队列：活动列表从 `start_index` 开始的后缀，整体替换，从不拼接
    pub messages: Vec<Message>,
    /// `0 <= current_index <= messages.len()`
    pub current_index: usize,
    /// 起点消息在完整列表中的位置（过滤时不同于活动列表中的位置）
    pub start_index: usize,
    pub speed: f64,
}

impl SimulationState {
    /// 展示用的绝对序号（1 起）
    pub fn absolute_index(&self) -> usize {
        self.start_index + self.current_index + 1
    }

    pub fn current_message(&self) -> Option<&Message> {
        self.messages.get(self.current_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.messages.len()
    }

    pub fn remaining(&self) -> usize {
        self.messages.len().saturating_sub(self.current_index)
    }
}
