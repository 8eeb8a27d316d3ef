//! 回放状态机
//!
//! 顺序动画循环是一个逻辑任务，只在两个点挂起：
//! 1. 等待当前消息的动画完成信号（`AnimationDone`）；
//! 2. 消息之间的等待（`DelayElapsed`）。
//!
//! 两个挂起点都被建模为调度到未来的事件，并携带发起时的 `epoch`。
//! `pause`/`reset`/换队列会递增 epoch，过期事件到达时直接丢弃，因此任何时刻
//! 最多只有一个循环在推进游标。

use super::events::{AnimationDone, DelayElapsed, ExpireElement};
use super::observer::{
    Command, LayerHighlight, PlaybackObserver, RenderCommand, StateChange, Warning,
};
use super::stage::{ElementId, ElementKind, Stage};
use super::state::{Phase, SimulationState};
use crate::classify::{ArrowColor, Layer, Route, classify, explain};
use crate::config::{PlaybackConfig, TimingConfig};
use crate::model::{Message, MessageId};
use crate::sim::{SimTime, Simulator};
use crate::topo::Topology;
use tracing::{debug, info, trace, warn};

pub struct Player {
    cfg: PlaybackConfig,
    topo: Topology,
    state: SimulationState,
    /// 活动列表（过滤结果或完整列表）；None 表示尚未加载
    source: Option<Vec<Message>>,
    /// 活动列表中每条消息在完整列表中的位置（与 `source` 等长）
    positions: Vec<usize>,
    epoch: u64,
    stage: Stage,
    observer: Box<dyn PlaybackObserver>,
}

impl Player {
    pub fn new(cfg: PlaybackConfig, observer: Box<dyn PlaybackObserver>) -> Self {
        let topo = Topology::new(&cfg.layout);
        let state = SimulationState {
            speed: cfg.speed.default,
            ..SimulationState::default()
        };
        Self {
            cfg,
            topo,
            state,
            source: None,
            positions: Vec::new(),
            epoch: 0,
            stage: Stage::default(),
            observer,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn absolute_index(&self) -> usize {
        self.state.absolute_index()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn topology(&self) -> &Topology {
        &self.topo
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.cfg
    }

    pub fn source(&self) -> &[Message] {
        self.source.as_deref().unwrap_or(&[])
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.topo.set_viewport_width(width);
    }

    /// 设置速度（按配置范围截断）；下一次消息间隔开始生效。
    pub fn set_speed(&mut self, speed: f64) {
        self.state.speed = self.cfg.speed.clamp(speed);
        debug!(requested = speed, speed = self.state.speed, "速度更新");
    }

    /// 当前速度对应的消息间隔
    pub fn step_delay(&self) -> SimTime {
        self.cfg.speed.delay_for(self.state.speed)
    }

    /// 消息在活动列表中的位置
    pub fn position_of(&self, id: MessageId) -> Option<usize> {
        self.source.as_ref()?.iter().position(|m| m.id == id)
    }

    /// 整体替换活动列表（即完整列表本身）：停止循环、回到 Idle，并自动选择
    /// 第一条消息作为起点。
    pub fn set_source(&mut self, messages: Vec<Message>, sim: &mut Simulator) {
        let positions = (0..messages.len()).collect();
        self.set_filtered_source(messages, positions, sim);
    }

    /// 同 `set_source`，活动列表是过滤结果；`positions[i]` 是第 i 条在完整列表中的位置，
    /// 起点的绝对序号按它计算。
    pub fn set_filtered_source(
        &mut self,
        messages: Vec<Message>,
        positions: Vec<usize>,
        sim: &mut Simulator,
    ) {
        debug_assert_eq!(messages.len(), positions.len());
        self.halt();
        self.stage.clear();
        self.state.phase = Phase::Idle;
        info!(messages = messages.len(), "载入活动消息列表");
        self.source = Some(messages);
        self.positions = positions;
        self.select_start(0, sim);
    }

    /// 以活动列表中第 `index` 条消息为起点重建队列；不会自动播放。
    ///
    /// `start_index` 记录的是这条消息在完整列表中的位置；越界时退化为 `index`。
    /// 播放中调用时，正在进行的循环被作废，并从新队列开头继续。
    #[tracing::instrument(skip(self, sim))]
    pub fn select_start(&mut self, index: usize, sim: &mut Simulator) {
        let Some(source) = &self.source else {
            debug!("尚未加载消息列表，忽略起点选择");
            return;
        };
        self.state.messages = source
            .get(index..)
            .map(<[Message]>::to_vec)
            .unwrap_or_default();
        self.state.start_index = self.positions.get(index).copied().unwrap_or(index);
        self.state.current_index = 0;
        self.halt();
        self.stage.clear();
        debug!(queue = self.state.messages.len(), "起点已选择");
        self.emit_state(sim.now());

        if self.state.phase == Phase::Playing {
            self.drive(sim);
        }
    }

    /// 从当前游标开始顺序播放；已在播放时不做任何事。
    #[tracing::instrument(skip(self, sim), fields(from = self.state.current_index))]
    pub fn play(&mut self, sim: &mut Simulator) {
        let now = sim.now();
        if self.state.messages.is_empty() {
            self.warn(now, Warning::EmptyQueue);
            return;
        }
        if self.state.phase == Phase::Playing {
            debug!("已在播放，忽略重复的 play");
            return;
        }
        self.stage.clear();
        self.halt();
        self.state.phase = Phase::Playing;
        info!(remaining = self.state.remaining(), "▶️  开始播放");
        self.emit_state(now);
        self.drive(sim);
    }

    /// 与 `play` 相同：从冻结的游标继续，不会回到 0。
    pub fn resume(&mut self, sim: &mut Simulator) {
        self.play(sim);
    }

    /// 暂停：挂起中的信号作废；已经开始的动画元素保留在画布上。
    pub fn pause(&mut self, sim: &mut Simulator) {
        let now = sim.now();
        if self.state.phase != Phase::Playing {
            self.warn(
                now,
                Warning::IgnoredCommand {
                    command: Command::Pause,
                    phase: self.state.phase,
                },
            );
            return;
        }
        self.halt();
        self.state.phase = Phase::Paused;
        info!(at = self.state.current_index, "⏸️  暂停");
        self.emit_state(now);
    }

    /// 单步：渲染当前消息（不等待动画完成）并前移游标。
    pub fn step(&mut self, sim: &mut Simulator) {
        let now = sim.now();
        match self.state.phase {
            Phase::Idle | Phase::Paused => {}
            phase => {
                self.warn(
                    now,
                    Warning::IgnoredCommand {
                        command: Command::Step,
                        phase,
                    },
                );
                return;
            }
        }
        if self.state.messages.is_empty() {
            self.warn(now, Warning::EmptyQueue);
            return;
        }
        if self.state.is_exhausted() {
            // 暂停发生在最后一次间隔内
            self.complete(now);
            return;
        }

        self.render_current(sim);
        self.state.current_index += 1;
        if self.state.is_exhausted() {
            self.complete(now);
        } else {
            self.emit_state(now);
        }
    }

    /// 停止循环、游标归零、清空画布，回到 Idle。
    pub fn reset(&mut self, sim: &mut Simulator) {
        self.halt();
        let cleared = self.stage.clear();
        self.state.current_index = 0;
        self.state.phase = Phase::Idle;
        info!(cleared, "⏹️  重置");
        self.emit_state(sim.now());
    }

    pub(crate) fn on_animation_done(&mut self, epoch: u64, sim: &mut Simulator) {
        if !self.is_live(epoch) {
            trace!(epoch, current = self.epoch, "丢弃过期的动画完成信号");
            return;
        }
        self.state.current_index = (self.state.current_index + 1).min(self.state.messages.len());
        self.emit_state(sim.now());
        sim.schedule_in(self.step_delay(), DelayElapsed { epoch });
    }

    pub(crate) fn on_delay_elapsed(&mut self, epoch: u64, sim: &mut Simulator) {
        if !self.is_live(epoch) {
            trace!(epoch, current = self.epoch, "丢弃过期的消息间隔");
            return;
        }
        self.drive(sim);
    }

    pub(crate) fn on_element_expired(
        &mut self,
        message_id: MessageId,
        element: ElementId,
        now: SimTime,
    ) {
        if self.stage.expire(message_id, element, now) {
            trace!(message = %message_id, "元素到期移除");
            self.observer.on_element_expired(now, message_id);
        }
    }

    pub(crate) fn warn(&mut self, now: SimTime, warning: Warning) {
        warn!(%warning, "回放告警");
        self.observer.on_warning(now, &warning);
    }

    fn is_live(&self, epoch: u64) -> bool {
        epoch == self.epoch && self.state.phase == Phase::Playing
    }

    /// 作废所有挂起中的循环信号
    fn halt(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// 循环体：渲染当前消息并挂起到动画完成；队列耗尽时结束。
    fn drive(&mut self, sim: &mut Simulator) {
        if self.state.phase != Phase::Playing {
            return;
        }
        if self.state.is_exhausted() {
            self.complete(sim.now());
            return;
        }
        let hold = self.render_current(sim);
        sim.schedule_in(hold, AnimationDone { epoch: self.epoch });
    }

    fn complete(&mut self, now: SimTime) {
        self.halt();
        self.state.phase = Phase::Completed;
        info!(end = self.state.absolute_index(), "✅ 回放完成");
        self.emit_state(now);
    }

    fn emit_state(&mut self, now: SimTime) {
        let change = StateChange {
            phase: self.state.phase,
            current_index: self.state.current_index,
            absolute_index: self.state.absolute_index(),
        };
        trace!(?change, "状态变化");
        self.observer.on_state_change(now, &change);
    }

    /// 渲染游标处的消息，返回该消息动画的持续时间。
    ///
    /// 方向未知时不产生坐标：放置告警图标、发出告警，持续时间为 0。
    fn render_current(&mut self, sim: &mut Simulator) -> SimTime {
        let now = sim.now();
        let seq = self.state.current_index;
        let absolute_index = self.state.absolute_index();
        let Some(msg) = self.state.current_message() else {
            return SimTime::ZERO;
        };
        let classification = classify(msg);

        let Some(route) = classification.route else {
            let el = self.stage.insert(
                msg.id,
                ElementKind::DirectionWarning,
                now,
                self.cfg.timing.warning_ttl(),
            );
            sim.schedule(
                el.expires_at,
                ExpireElement {
                    message_id: el.message_id,
                    element: el.id,
                },
            );
            let warning = Warning::UnknownDirection {
                message_id: msg.id,
                sequence_index: seq,
            };
            warn!(%warning, message_type = %msg.message_type, "方向未知，显示告警图标");
            self.observer.on_warning(now, &warning);
            return SimTime::ZERO;
        };

        let coords = self.topo.place(&route, seq);
        let (kind, broadcast) = if route.broadcast {
            let targets = self
                .topo
                .broadcast_targets(&coords, self.cfg.timing.broadcast_stagger_ms);
            (ElementKind::Broadcast, targets)
        } else {
            (ElementKind::Arrow, Vec::new())
        };
        let render = RenderCommand {
            sequence_index: seq,
            absolute_index,
            color: ArrowColor::of(&classification, msg.direction()),
            coords,
            broadcast,
            interface: route.link().interface(),
            explanation: explain(msg),
            highlights: layer_highlights(&classification.layers, &route, &self.cfg.timing),
            classification,
        };

        let el = self
            .stage
            .insert(msg.id, kind, now, self.cfg.timing.element_ttl());
        sim.schedule(
            el.expires_at,
            ExpireElement {
                message_id: el.message_id,
                element: el.id,
            },
        );
        debug!(
            index = absolute_index,
            route = %route,
            message_type = %msg.message_type,
            "渲染消息"
        );
        self.observer.on_render_message(now, msg, &render);
        self.cfg.timing.animation()
    }
}

/// 协议栈高亮时间表：源实体上的命中层立即点亮，随后栈中更低的各层依次点亮，
/// 目标实体上的命中层在固定延迟后点亮。
fn layer_highlights(
    layers: &[Layer],
    route: &Route,
    timing: &TimingConfig,
) -> Vec<LayerHighlight> {
    let Some(&primary) = layers.first() else {
        return Vec::new();
    };
    let step = |layer: Layer, entity, delay_ms| LayerHighlight {
        layer,
        entity,
        delay_ms,
        description: layer.description().to_string(),
    };
    let mut out = vec![step(primary, route.source, 0)];
    out.extend(
        primary
            .below()
            .zip(1u64..)
            .map(|(layer, k)| step(layer, route.source, k * timing.layer_stagger_ms)),
    );
    out.push(step(primary, route.target, timing.layer_target_delay_ms));
    out.sort_by_key(|h| h.delay_ms);
    out
}
