//! 引擎外观：持有模拟器与回放世界，对外提供全部用户操作。

use super::navigator::{Navigator, NavigatorHit};
use super::observer::PlaybackObserver;
use super::player::Player;
use super::state::{Phase, SimulationState};
use super::world::CallFlowWorld;
use crate::config::{ConfigError, PlaybackConfig};
use crate::model::{Message, MessageId};
use crate::sim::{SimTime, Simulator};
use std::collections::HashMap;
use tracing::info;

pub struct CallFlowEngine {
    sim: Simulator,
    world: CallFlowWorld,
    full: Option<Vec<Message>>,
    filtered: Option<Vec<Message>>,
}

impl CallFlowEngine {
    pub fn new(
        cfg: PlaybackConfig,
        observer: impl PlaybackObserver + 'static,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            sim: Simulator::default(),
            world: CallFlowWorld {
                player: Player::new(cfg, Box::new(observer)),
                navigator: Navigator::default(),
            },
            full: None,
            filtered: None,
        })
    }

    /// 载入完整消息列表；之前的过滤结果失效。
    pub fn load_messages(&mut self, messages: Vec<Message>) {
        info!(messages = messages.len(), "载入消息");
        self.full = Some(messages);
        self.filtered = None;
        self.refresh();
    }

    /// 设置（或用 None 清除）过滤后的子集；过滤结果优先作为活动列表。
    pub fn apply_filter(&mut self, subset: Option<Vec<Message>>) {
        info!(
            filtered = subset.as_ref().map(Vec::len),
            "更新过滤结果"
        );
        self.filtered = subset;
        self.refresh();
    }

    pub fn active_messages(&self) -> &[Message] {
        self.filtered
            .as_deref()
            .or(self.full.as_deref())
            .unwrap_or(&[])
    }

    fn refresh(&mut self) {
        let active = self.active_messages().to_vec();
        self.world.navigator.rebuild(&active);
        match (&self.full, &self.filtered) {
            (Some(full), Some(_)) => {
                let index: HashMap<MessageId, usize> =
                    full.iter().enumerate().map(|(i, m)| (m.id, i)).collect();
                let positions = active
                    .iter()
                    .enumerate()
                    .map(|(i, m)| index.get(&m.id).copied().unwrap_or(i))
                    .collect();
                self.world
                    .player
                    .set_filtered_source(active, positions, &mut self.sim);
            }
            _ => self.world.player.set_source(active, &mut self.sim),
        }
    }

    pub fn select_start(&mut self, index: usize) {
        self.world.player.select_start(index, &mut self.sim);
    }

    pub fn play(&mut self) {
        self.world.player.play(&mut self.sim);
    }

    pub fn pause(&mut self) {
        self.world.player.pause(&mut self.sim);
    }

    pub fn resume(&mut self) {
        self.world.player.resume(&mut self.sim);
    }

    pub fn step(&mut self) {
        self.world.player.step(&mut self.sim);
    }

    pub fn reset(&mut self) {
        self.world.player.reset(&mut self.sim);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.world.player.set_speed(speed);
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.world.player.set_viewport_width(width);
    }

    pub fn next_enb_mme(&mut self) -> Option<NavigatorHit> {
        let CallFlowWorld { player, navigator } = &mut self.world;
        navigator.advance(player, &mut self.sim)
    }

    /// 推进虚拟时钟到 `until`（含）
    pub fn run_until(&mut self, until: SimTime) {
        self.sim.run_until(until, &mut self.world);
    }

    pub fn run_for(&mut self, d: SimTime) {
        let until = self.sim.now().after(d);
        self.run_until(until);
    }

    /// 执行到事件队列为空，返回执行的事件数
    pub fn run(&mut self) -> u64 {
        self.sim.run(&mut self.world)
    }

    pub fn now(&self) -> SimTime {
        self.sim.now()
    }

    pub fn phase(&self) -> Phase {
        self.world.player.phase()
    }

    pub fn state(&self) -> &SimulationState {
        self.world.player.state()
    }

    pub fn player(&self) -> &Player {
        &self.world.player
    }

    pub fn navigator(&self) -> &Navigator {
        &self.world.navigator
    }
}
