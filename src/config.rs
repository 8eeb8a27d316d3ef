//! 回放配置
//!
//! 速度范围、动画时长、元素存活期和画布布局都是显式配置项。JSON 中缺省的
//! 字段取默认值；`validate` 在引擎构造时检查边界。

use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("speed range is empty or not finite: min={min}, max={max}")]
    InvalidSpeedRange { min: f64, max: f64 },
    #[error("default speed {default} outside [{min}, {max}]")]
    DefaultOutOfRange { default: f64, min: f64, max: f64 },
    #[error("speed {max} gives a negative delay ({base_delay_ms} - {max} * {delay_step_ms})")]
    NegativeDelay {
        max: f64,
        base_delay_ms: u64,
        delay_step_ms: u64,
    },
    #[error("lane_count must be > 0")]
    NoLanes,
    #[error("{field} must be > 0 (got {value})")]
    NonPositive { field: &'static str, value: f64 },
}

/// 速度控制：`delay = base_delay_ms - clamp(speed) * delay_step_ms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub base_delay_ms: u64,
    pub delay_step_ms: u64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 10.0,
            default: 5.0,
            base_delay_ms: 2_000,
            delay_step_ms: 150,
        }
    }
}

impl SpeedConfig {
    /// 把速度限制在 [min, max]；非有限值回落到默认速度。
    pub fn clamp(&self, speed: f64) -> f64 {
        if !speed.is_finite() {
            return self.default;
        }
        speed.clamp(self.min, self.max)
    }

    /// 两条消息之间的等待时间
    pub fn delay_for(&self, speed: f64) -> SimTime {
        let speed = self.clamp(speed);
        let ms = self.base_delay_ms as f64 - speed * self.delay_step_ms as f64;
        SimTime::from_millis(ms.max(0.0).round() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// 单条消息动画的完成信号（毫秒）
    pub animation_ms: u64,
    /// 已渲染元素的存活期
    pub element_ttl_ms: u64,
    /// 方向未知告警图标的存活期
    pub warning_ttl_ms: u64,
    /// 广播效果中相邻目标的释放间隔
    pub broadcast_stagger_ms: u64,
    /// 协议栈高亮：命中层之下每一层依次延后的间隔
    pub layer_stagger_ms: u64,
    /// 协议栈高亮：目标实体上点亮命中层的延迟
    pub layer_target_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            animation_ms: 3_500,
            element_ttl_ms: 28_000,
            warning_ttl_ms: 3_000,
            broadcast_stagger_ms: 200,
            layer_stagger_ms: 200,
            layer_target_delay_ms: 500,
        }
    }
}

impl TimingConfig {
    pub fn animation(&self) -> SimTime {
        SimTime::from_millis(self.animation_ms)
    }

    pub fn element_ttl(&self) -> SimTime {
        SimTime::from_millis(self.element_ttl_ms)
    }

    pub fn warning_ttl(&self) -> SimTime {
        SimTime::from_millis(self.warning_ttl_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// 渲染方未报告宽度时使用的画布宽度（px）
    pub viewport_width: f64,
    /// UE/MME 距左右边缘的距离
    pub edge_margin: f64,
    pub lane_top: f64,
    pub lane_spacing: f64,
    pub lane_count: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: 600.0,
            edge_margin: 80.0,
            lane_top: 80.0,
            lane_spacing: 50.0,
            lane_count: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub speed: SpeedConfig,
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
}

impl PlaybackConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: PlaybackConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.speed;
        if !(s.min.is_finite() && s.max.is_finite()) || s.min < 0.0 || s.min > s.max {
            return Err(ConfigError::InvalidSpeedRange {
                min: s.min,
                max: s.max,
            });
        }
        if !(s.min..=s.max).contains(&s.default) {
            return Err(ConfigError::DefaultOutOfRange {
                default: s.default,
                min: s.min,
                max: s.max,
            });
        }
        if s.max * s.delay_step_ms as f64 > s.base_delay_ms as f64 {
            return Err(ConfigError::NegativeDelay {
                max: s.max,
                base_delay_ms: s.base_delay_ms,
                delay_step_ms: s.delay_step_ms,
            });
        }

        let l = &self.layout;
        if l.lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }
        for (field, value) in [
            ("viewport_width", l.viewport_width),
            ("edge_margin", l.edge_margin),
            ("lane_spacing", l.lane_spacing),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}
