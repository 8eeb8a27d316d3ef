//! 路径规则表
//!
//! 每条规则是 (谓词, 路径解析)，按表中顺序求值，第一条命中的规则生效。
//! 最后一条规则恒真，因此分类总能得到一条路径。

use super::path::{Entity, Link, Route};
use crate::model::{Direction, Message};

/// 分类所需的归一化特征（全部小写）
#[derive(Debug, Clone)]
pub struct Features {
    pub protocol: String,
    pub message_type: String,
    pub content: String,
    pub direction: Direction,
    pub paging: bool,
}

impl Features {
    pub fn of(msg: &Message) -> Self {
        let message_type = msg.message_type.to_lowercase();
        let paging = msg.is_paging || message_type.contains("paging");
        Self {
            protocol: msg.protocol.to_lowercase(),
            message_type,
            content: msg.content().to_lowercase(),
            direction: msg.direction(),
            paging,
        }
    }

    fn service_request(&self) -> bool {
        self.message_type.contains("service request")
    }

    fn paging_like(&self) -> bool {
        self.paging || self.service_request()
    }

    fn downlink(&self) -> bool {
        self.direction == Direction::Downlink
    }

    fn uplink(&self) -> bool {
        self.direction == Direction::Uplink
    }

    /// protocol 或 messageType 指向 NAS
    pub fn suggests_nas(&self) -> bool {
        self.protocol.contains("nas")
            || ["service request", "attach", "authentication", "tracking area"]
                .iter()
                .any(|k| self.message_type.contains(k))
    }

    /// protocol 或 messageType 指向 S1-AP
    pub fn suggests_s1ap(&self) -> bool {
        self.protocol.contains("s1ap")
            || ["initial context", "ue context", "handover", "paging"]
                .iter()
                .any(|k| self.message_type.contains(k))
    }

    pub fn failure(&self) -> bool {
        ["failure", "reject", "error"]
            .iter()
            .any(|k| self.message_type.contains(k))
    }
}

pub struct PathRule {
    pub name: &'static str,
    pub link: Link,
    pub applies: fn(&Features) -> bool,
    pub route: fn(&Features) -> Route,
}

fn s1ap_paging(f: &Features) -> bool {
    f.paging_like() && f.protocol.contains("s1ap")
}

fn s1ap_paging_route(f: &Features) -> Route {
    if f.downlink() {
        Route::new(Entity::Mme, Entity::Enb)
    } else {
        Route::new(Entity::Enb, Entity::Mme)
    }
}

fn rrc_paging(f: &Features) -> bool {
    f.paging_like() && f.protocol.contains("rrc")
}

fn rrc_paging_route(f: &Features) -> Route {
    if f.downlink() {
        Route::broadcast(Entity::Enb, Entity::Ue)
    } else {
        Route::new(Entity::Ue, Entity::Enb)
    }
}

fn nas_service_request(f: &Features) -> bool {
    f.paging_like() && f.protocol.contains("nas") && f.service_request()
}

fn nas_service_request_route(_f: &Features) -> Route {
    Route::new(Entity::Ue, Entity::Mme)
}

fn nas(f: &Features) -> bool {
    f.suggests_nas()
}

fn nas_route(f: &Features) -> Route {
    if f.uplink() {
        Route::new(Entity::Ue, Entity::Mme)
    } else {
        Route::new(Entity::Mme, Entity::Ue)
    }
}

fn s1ap(f: &Features) -> bool {
    f.suggests_s1ap()
}

fn s1ap_route(f: &Features) -> Route {
    if f.uplink() {
        Route::new(Entity::Enb, Entity::Mme)
    } else {
        Route::new(Entity::Mme, Entity::Enb)
    }
}

fn always(_f: &Features) -> bool {
    true
}

fn rrc_route(f: &Features) -> Route {
    if f.uplink() {
        Route::new(Entity::Ue, Entity::Enb)
    } else {
        Route::new(Entity::Enb, Entity::Ue)
    }
}

/// 优先级从高到低。paging 类规则只在对应协议命中时生效，
/// 否则落入后面的 NAS/S1-AP/RRC 规则。
pub const PATH_RULES: &[PathRule] = &[
    PathRule {
        name: "s1ap-paging",
        link: Link::EnbMme,
        applies: s1ap_paging,
        route: s1ap_paging_route,
    },
    PathRule {
        name: "rrc-paging",
        link: Link::UeEnb,
        applies: rrc_paging,
        route: rrc_paging_route,
    },
    PathRule {
        name: "nas-service-request",
        link: Link::UeMme,
        applies: nas_service_request,
        route: nas_service_request_route,
    },
    PathRule {
        name: "nas",
        link: Link::UeMme,
        applies: nas,
        route: nas_route,
    },
    PathRule {
        name: "s1ap",
        link: Link::EnbMme,
        applies: s1ap,
        route: s1ap_route,
    },
    PathRule {
        name: "rrc",
        link: Link::UeEnb,
        applies: always,
        route: rrc_route,
    },
];

/// 返回第一条命中的规则
pub fn first_match(f: &Features) -> &'static PathRule {
    PATH_RULES
        .iter()
        .find(|r| (r.applies)(f))
        .unwrap_or(&PATH_RULES[PATH_RULES.len() - 1])
}
