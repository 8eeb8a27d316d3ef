//! 解码后的协议消息
//!
//! 字段形状与分析服务上传接口返回的 JSON 一致；未知的顶层字段被忽略。
//! 回放核心只读消息，从不写回派生状态。

use super::direction::Direction;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 消息标识符（过滤前后保持不变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 消息参数：分类器读取的键是一等字段，其余键原样保留在 `extra` 中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(default)]
    pub direction: Direction,
    /// 自由文本内容（层识别的关键字来源）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// 仅用于展示的其它属性（rb_id、sysfn 等）
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default, alias = "messageType")]
    pub message_type: String,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default, alias = "rawContent")]
    pub raw_content: String,
    /// 解码器给出的 paging 标记
    #[serde(default)]
    pub is_paging: bool,
    #[serde(default)]
    pub pci: Option<u32>,
    #[serde(default)]
    pub earfcn: Option<u32>,
    #[serde(default, alias = "rrcTransactionId")]
    pub rrc_transaction_id: Option<u32>,
    #[serde(default)]
    pub rsrp: Option<f64>,
}

impl Message {
    pub fn new(id: u64, protocol: impl Into<String>, message_type: impl Into<String>) -> Self {
        Self {
            id: MessageId(id),
            timestamp: String::new(),
            protocol: protocol.into(),
            message_type: message_type.into(),
            parameters: Parameters::default(),
            raw_content: String::new(),
            is_paging: false,
            pci: None,
            earfcn: None,
            rrc_transaction_id: None,
            rsrp: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.parameters.direction = direction;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.parameters.content = Some(content.into());
        self
    }

    pub fn with_paging_flag(mut self) -> Self {
        self.is_paging = true;
        self
    }

    pub fn with_timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = ts.into();
        self
    }

    pub fn direction(&self) -> Direction {
        self.parameters.direction
    }

    pub fn content(&self) -> &str {
        self.parameters.content.as_deref().unwrap_or("")
    }
}
