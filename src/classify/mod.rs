//! 消息分类器
//!
//! 把一条消息映射为：涉及的协议层、UE/eNB/MME 之间的有向路径，以及
//! paging/NAS/S1-AP/失败/方向未知等标记。规则以有序表的形式给出（见 `rules`），
//! 优先级和兜底行为都可以单独审查和测试。

mod classifier;
mod explain;
mod layer;
mod path;
mod rules;

pub use classifier::{Classification, classify};
pub use explain::{ArrowColor, explain};
pub use layer::Layer;
pub use path::{Entity, Interface, Link, Route};
pub use rules::{Features, PATH_RULES, PathRule, first_match};
