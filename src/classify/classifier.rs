//! 消息分类
//!
//! 纯函数：同一条消息总是得到同一个结果，缺失的数据退化为文档化的默认值，
//! 永远不会失败。

use super::layer::{LAYER_RULES, Layer};
use super::path::{Link, Route};
use super::rules::{Features, first_match};
use crate::model::Message;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// 涉及的协议层（栈序）
    pub layers: Vec<Layer>,
    /// 命中的实体对；方向未知时也会给出
    pub link: Link,
    /// 有方向的路径；方向未知（且非广播）时为 None，调用方应显示告警而不是箭头
    pub route: Option<Route>,
    /// 命中的规则名
    pub rule: &'static str,
    pub is_paging: bool,
    pub is_nas: bool,
    pub is_s1ap: bool,
    pub is_failure: bool,
    pub is_unknown_direction: bool,
}

impl Classification {
    pub fn is_broadcast(&self) -> bool {
        self.route.is_some_and(|r| r.broadcast)
    }
}

pub(crate) fn detect_layers(f: &Features) -> Vec<Layer> {
    let mut layers = LAYER_RULES
        .iter()
        .filter(|r| {
            f.protocol.contains(r.tag)
                || f.message_type.contains(r.tag)
                || r.keywords.iter().any(|k| f.content.contains(k))
        })
        .map(|r| r.layer)
        .collect::<Vec<_>>();
    if layers.is_empty() {
        // 没有任何层命中时高亮 RRC
        layers.push(Layer::Rrc);
    }
    layers
}

pub fn classify(msg: &Message) -> Classification {
    let f = Features::of(msg);
    let rule = first_match(&f);
    let route = (rule.route)(&f);

    let is_unknown_direction = !f.direction.is_known() && !route.broadcast;
    Classification {
        layers: detect_layers(&f),
        link: rule.link,
        route: (!is_unknown_direction).then_some(route),
        rule: rule.name,
        is_paging: f.paging,
        is_nas: f.suggests_nas(),
        is_s1ap: f.suggests_s1ap(),
        is_failure: f.failure(),
        is_unknown_direction,
    }
}
