//! 逻辑实体与消息路径

use serde::{Deserialize, Serialize};

/// 三个逻辑网元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Ue,
    Enb,
    Mme,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Ue, Entity::Enb, Entity::Mme];

    pub fn name(self) -> &'static str {
        match self {
            Entity::Ue => "UE",
            Entity::Enb => "eNB",
            Entity::Mme => "MME",
        }
    }
}

/// 路径所在的实体对（无方向）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
    UeEnb,
    EnbMme,
    UeMme,
}

/// 被动画点亮的物理接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interface {
    Air,
    S1,
}

impl Link {
    pub fn between(a: Entity, b: Entity) -> Link {
        match (a, b) {
            (Entity::Ue, Entity::Enb) | (Entity::Enb, Entity::Ue) => Link::UeEnb,
            (Entity::Enb, Entity::Mme) | (Entity::Mme, Entity::Enb) => Link::EnbMme,
            _ => Link::UeMme,
        }
    }

    /// UE↔MME 的 NAS 消息对 eNB 透明，不点亮任何接口。
    pub fn interface(self) -> Option<Interface> {
        match self {
            Link::UeEnb => Some(Interface::Air),
            Link::EnbMme => Some(Interface::S1),
            Link::UeMme => None,
        }
    }
}

/// 有方向的路径；`broadcast` 表示 eNB 在寻呼信道上的广播。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub source: Entity,
    pub target: Entity,
    #[serde(default)]
    pub broadcast: bool,
}

impl Route {
    pub fn new(source: Entity, target: Entity) -> Self {
        Self {
            source,
            target,
            broadcast: false,
        }
    }

    pub fn broadcast(source: Entity, target: Entity) -> Self {
        Self {
            source,
            target,
            broadcast: true,
        }
    }

    pub fn link(&self) -> Link {
        Link::between(self.source, self.target)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.source.name(), self.target.name())?;
        if self.broadcast {
            f.write_str(" (broadcast)")?;
        }
        Ok(())
    }
}
