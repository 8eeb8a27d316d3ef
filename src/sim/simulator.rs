//! 仿真器
//!
//! 单线程事件驱动：维护虚拟时钟与按 (时间, 序号) 排序的待执行事件。
//! 同一时刻调度的事件按调度顺序执行，保证回放的单写者语义。

use super::event::{Event, World};
use super::time::SimTime;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

struct Pending {
    at: SimTime,
    seq: u64,
    ev: Box<dyn Event>,
}

impl Pending {
    fn key(&self) -> (SimTime, u64) {
        (self.at, self.seq)
    }
}

// BinaryHeap 是 max-heap：反向比较得到最早事件优先。
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

/// 事件驱动仿真器。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    executed: u64,
    q: BinaryHeap<Pending>,
}

impl Simulator {
    /// 当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 已执行的事件总数
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// 下一个事件的时间（队列为空时为 None）
    pub fn next_event_at(&self) -> Option<SimTime> {
        self.q.peek().map(|p| p.at)
    }

    /// 在 `at` 调度事件；早于当前时间的请求按当前时间处理。
    #[tracing::instrument(skip(self, ev), fields(event = ev.name(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        let at = at.max(self.now);
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        trace!(now = ?self.now, seq, "调度事件");
        self.q.push(Pending {
            at,
            seq,
            ev: Box::new(ev),
        });
    }

    /// 在当前时间之后 `delay` 调度事件。
    pub fn schedule_in<E: Event>(&mut self, delay: SimTime, ev: E) {
        let at = self.now.after(delay);
        self.schedule(at, ev);
    }

    fn step_one(&mut self, world: &mut dyn World) -> bool {
        let Some(item) = self.q.pop() else {
            return false;
        };
        self.now = item.at;
        self.executed = self.executed.saturating_add(1);
        trace!(now = ?self.now, seq = item.seq, event = item.ev.name(), "执行事件");
        item.ev.execute(self, world);
        true
    }

    /// 执行所有 `at <= until` 的事件，然后把时钟推进到 `until`。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        while self.next_event_at().is_some_and(|at| at <= until) {
            self.step_one(world);
        }
        self.now = self.now.max(until);
    }

    /// 运行直到事件队列为空，返回本次执行的事件数。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) -> u64 {
        debug!(now = ?self.now, queue_size = self.q.len(), "开始运行");
        let mut count = 0_u64;
        while self.step_one(world) {
            count += 1;
        }
        info!(events = count, final_time = ?self.now, "✅ 事件队列已清空");
        count
    }
}
