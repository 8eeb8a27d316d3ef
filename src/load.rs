//! 消息文件读取
//!
//! 接受三种形状：裸数组、`{"messages": [...]}`、分析服务上传响应
//! `{"data": {"messages": [...]}}`。未知字段忽略。

use crate::model::{Message, MessageId};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse messages: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate message id {0}")]
    DuplicateId(MessageId),
    #[error("filtered message {0} is not in the full list")]
    UnknownFilteredId(MessageId),
}

#[derive(Deserialize)]
struct Wrapped {
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct Response {
    data: Wrapped,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MessageFile {
    Bare(Vec<Message>),
    Wrapped(Wrapped),
    Response(Response),
}

/// 解析 JSON 文本并检查 id 唯一
pub fn parse_messages(raw: &str) -> Result<Vec<Message>, LoadError> {
    let messages = match serde_json::from_str::<MessageFile>(raw) {
        Ok(MessageFile::Bare(m)) => m,
        Ok(MessageFile::Wrapped(w)) => w.messages,
        Ok(MessageFile::Response(r)) => r.data.messages,
        // untagged 的错误信息太笼统，按最常见的裸数组形状再解析一次给出具体位置
        Err(_) => serde_json::from_str::<Vec<Message>>(raw)?,
    };

    let mut seen = HashSet::with_capacity(messages.len());
    for m in &messages {
        if !seen.insert(m.id) {
            return Err(LoadError::DuplicateId(m.id));
        }
    }
    debug!(messages = messages.len(), "消息解析完成");
    Ok(messages)
}

pub fn load_messages(path: impl AsRef<Path>) -> Result<Vec<Message>, LoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let messages = parse_messages(&raw)?;
    info!(path = %path.display(), messages = messages.len(), "读取消息文件");
    Ok(messages)
}

/// 过滤结果必须是完整列表的子集
pub fn check_subset(full: &[Message], filtered: &[Message]) -> Result<(), LoadError> {
    let ids: HashSet<MessageId> = full.iter().map(|m| m.id).collect();
    match filtered.iter().find(|m| !ids.contains(&m.id)) {
        Some(m) => Err(LoadError::UnknownFilteredId(m.id)),
        None => Ok(()),
    }
}
