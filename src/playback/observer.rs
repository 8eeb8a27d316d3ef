//! 回放对外输出
//!
//! 渲染方通过 `PlaybackObserver` 接收状态变化、渲染指令和告警。核心内部的
//! 异常一律以告警形式给出，不会向调用方返回错误。

use super::state::Phase;
use crate::classify::{ArrowColor, Classification, Entity, Interface, Layer};
use crate::model::{Message, MessageId};
use crate::sim::SimTime;
use crate::topo::{BroadcastTarget, Coordinates};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub phase: Phase,
    pub current_index: usize,
    pub absolute_index: usize,
}

/// 驱动一个可视元素所需的全部信息
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    /// 在当前队列中的位置（决定车道）
    pub sequence_index: usize,
    pub absolute_index: usize,
    pub classification: Classification,
    pub coords: Coordinates,
    pub color: ArrowColor,
    /// 仅 RRC 寻呼广播非空
    pub broadcast: Vec<BroadcastTarget>,
    pub interface: Option<Interface>,
    pub explanation: String,
    /// 协议栈高亮时间表，按 `delay_ms` 升序
    pub highlights: Vec<LayerHighlight>,
}

/// 协议栈高亮的一步：渲染后 `delay_ms` 在 `entity` 上点亮 `layer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerHighlight {
    pub layer: Layer,
    pub entity: Entity,
    pub delay_ms: u64,
    pub description: String,
}

/// 被忽略的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Pause,
    Step,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// 队列为空时请求播放/单步
    EmptyQueue,
    /// 消息方向未知：显示告警图标而不是箭头
    UnknownDirection {
        message_id: MessageId,
        sequence_index: usize,
    },
    /// 活动列表中没有 eNB–MME 相关消息
    NoEnbMmeMessages,
    /// 导航器记录的消息已不在活动列表中
    MessageNotInActiveList { message_id: MessageId },
    /// 当前阶段不接受该操作
    IgnoredCommand { command: Command, phase: Phase },
}

impl Warning {
    pub fn message_id(&self) -> Option<MessageId> {
        match self {
            Warning::UnknownDirection { message_id, .. }
            | Warning::MessageNotInActiveList { message_id } => Some(*message_id),
            _ => None,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptyQueue => f.write_str("no start message selected (queue is empty)"),
            Warning::UnknownDirection {
                message_id,
                sequence_index,
            } => write!(
                f,
                "message {message_id} at position {sequence_index} has unknown direction"
            ),
            Warning::NoEnbMmeMessages => f.write_str("no eNB-MME messages found"),
            Warning::MessageNotInActiveList { message_id } => {
                write!(f, "message {message_id} is not in the active list")
            }
            Warning::IgnoredCommand { command, phase } => {
                write!(f, "{command:?} ignored while {}", phase.label())
            }
        }
    }
}

pub trait PlaybackObserver: Send {
    /// 每次阶段或游标变化之后调用
    fn on_state_change(&mut self, at: SimTime, change: &StateChange);
    /// 每条被渲染的消息调用一次
    fn on_render_message(&mut self, at: SimTime, message: &Message, render: &RenderCommand);
    fn on_warning(&mut self, at: SimTime, warning: &Warning);
    /// 画布元素到期移除
    fn on_element_expired(&mut self, _at: SimTime, _message_id: MessageId) {}
}
