//! 消息模型
//!
//! 一条消息就是一个不可变的解码事件；只有数据，没有行为。

mod direction;
mod message;

pub use direction::Direction;
pub use message::{Message, MessageId, Parameters};
