//! 三实体布局
//!
//! UE 在左边缘、eNB 居中、MME 在右边缘；横坐标随渲染方报告的画布宽度变化，
//! 纵坐标由车道分配器给出。布局是纯函数，与时钟无关。

use super::lanes::LaneAllocator;
use crate::classify::{Entity, Route};
use crate::config::LayoutConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 一个动画元素的起止坐标（px）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// 寻呼广播的次级目标（示意用的其它 UE）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastTarget {
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// 相对广播开始的释放延迟（毫秒）
    pub delay_ms: u64,
}

const BROADCAST_OFFSETS: [(&str, f64, f64); 4] = [
    ("UE1", -100.0, 0.0),
    ("UE2", 100.0, 0.0),
    ("UE3", 0.0, -60.0),
    ("UE4", 0.0, 60.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    width: f64,
    fallback_width: f64,
    margin: f64,
    lanes: LaneAllocator,
}

impl Topology {
    pub fn new(cfg: &LayoutConfig) -> Self {
        Self {
            width: cfg.viewport_width,
            fallback_width: cfg.viewport_width,
            margin: cfg.edge_margin,
            lanes: LaneAllocator::from_config(cfg),
        }
    }

    pub fn viewport_width(&self) -> f64 {
        self.width
    }

    pub fn lanes(&self) -> &LaneAllocator {
        &self.lanes
    }

    /// 渲染方报告的新宽度；非正数或非有限值回落到配置宽度。
    pub fn set_viewport_width(&mut self, width: f64) {
        self.width = if width.is_finite() && width > 0.0 {
            width
        } else {
            self.fallback_width
        };
        debug!(width = self.width, "画布宽度更新");
    }

    pub fn x_of(&self, entity: Entity) -> f64 {
        match entity {
            Entity::Ue => self.margin,
            Entity::Enb => self.width / 2.0,
            Entity::Mme => self.width - self.margin,
        }
    }

    /// 给定路径和队列中的位置，返回动画元素的坐标。
    pub fn place(&self, route: &Route, sequence_index: usize) -> Coordinates {
        let y = self.lanes.y_of(sequence_index);
        Coordinates {
            start_x: self.x_of(route.source),
            start_y: y,
            end_x: self.x_of(route.target),
            end_y: y,
        }
    }

    /// 以广播源所在车道点为中心的四个次级目标，按 `stagger_ms` 依次释放。
    pub fn broadcast_targets(&self, coords: &Coordinates, stagger_ms: u64) -> Vec<BroadcastTarget> {
        BROADCAST_OFFSETS
            .iter()
            .enumerate()
            .map(|(i, (label, dx, dy))| BroadcastTarget {
                label: (*label).to_string(),
                x: coords.start_x + dx,
                y: coords.start_y + dy,
                delay_ms: stagger_ms.saturating_mul(i as u64),
            })
            .collect()
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
