//! 行车道分配
//!
//! 第 i 条消息画在第 `i mod lane_count` 条车道上，车道循环使用以限制画布高度。

use crate::config::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneAllocator {
    top: f64,
    spacing: f64,
    lanes: usize,
}

impl LaneAllocator {
    pub fn new(top: f64, spacing: f64, lanes: usize) -> Self {
        Self {
            top,
            spacing,
            lanes: lanes.max(1),
        }
    }

    pub fn from_config(cfg: &LayoutConfig) -> Self {
        Self::new(cfg.lane_top, cfg.lane_spacing, cfg.lane_count)
    }

    pub fn lane_count(&self) -> usize {
        self.lanes
    }

    pub fn lane_of(&self, sequence_index: usize) -> usize {
        sequence_index % self.lanes
    }

    /// 车道的纵坐标：`top + lane * spacing`
    pub fn y_of(&self, sequence_index: usize) -> f64 {
        self.top + self.lane_of(sequence_index) as f64 * self.spacing
    }
}

impl Default for LaneAllocator {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}
