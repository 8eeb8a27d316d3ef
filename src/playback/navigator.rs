//! eNB–MME 消息导航
//!
//! 记录活动列表中所有与 eNB–MME 交互相关的消息 id；每次 `advance` 跳到下一条
//! 并从它开始播放，到末尾后回绕。

use super::observer::Warning;
use super::player::Player;
use crate::classify::Features;
use crate::model::{Message, MessageId};
use crate::sim::Simulator;
use tracing::info;

const ENB_MME_PROCEDURES: [&str; 3] = ["initial context", "ue context", "handover"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorHit {
    /// 1 起
    pub ordinal: usize,
    pub total: usize,
    /// 在活动列表中的位置
    pub index: usize,
}

#[derive(Debug, Default, Clone)]
pub struct Navigator {
    hits: Vec<MessageId>,
    cursor: Option<usize>,
}

impl Navigator {
    /// S1-AP 协议、上下文/切换类过程，或方向已知的 NAS 消息
    pub fn is_enb_mme(msg: &Message) -> bool {
        let f = Features::of(msg);
        f.protocol.contains("s1ap")
            || ENB_MME_PROCEDURES
                .iter()
                .any(|k| f.message_type.contains(k))
            || (f.protocol.contains("nas") && f.direction.is_known())
    }

    /// 列表变化后重建命中列表，游标回到起点
    pub fn rebuild(&mut self, messages: &[Message]) {
        self.hits = messages
            .iter()
            .filter(|m| Self::is_enb_mme(m))
            .map(|m| m.id)
            .collect();
        self.cursor = None;
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn hits(&self) -> &[MessageId] {
        &self.hits
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// 跳到下一条 eNB–MME 消息并从它开始播放
    pub fn advance(&mut self, player: &mut Player, sim: &mut Simulator) -> Option<NavigatorHit> {
        if self.hits.is_empty() {
            player.warn(sim.now(), Warning::NoEnbMmeMessages);
            return None;
        }
        let next = self.cursor.map_or(0, |c| (c + 1) % self.hits.len());
        self.cursor = Some(next);
        let id = self.hits[next];

        let Some(index) = player.position_of(id) else {
            player.warn(sim.now(), Warning::MessageNotInActiveList { message_id: id });
            return None;
        };
        let hit = NavigatorHit {
            ordinal: next + 1,
            total: self.hits.len(),
            index,
        };
        info!(
            "🔎 eNB-MME 消息 {}/{}（列表位置 {}）",
            hit.ordinal, hit.total, index
        );
        player.select_start(index, sim);
        player.play(sim);
        Some(hit)
    }
}
