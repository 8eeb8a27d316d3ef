//! 回放循环的挂起点与元素过期事件

use super::stage::ElementId;
use super::world::with_player;
use crate::model::MessageId;
use crate::sim::{Event, Simulator, World};

/// 当前消息的动画完成信号
#[derive(Debug)]
pub struct AnimationDone {
    pub epoch: u64,
}

impl Event for AnimationDone {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let AnimationDone { epoch } = *self;
        with_player(world, |player| player.on_animation_done(epoch, sim));
    }
}

/// 消息间隔结束
#[derive(Debug)]
pub struct DelayElapsed {
    pub epoch: u64,
}

impl Event for DelayElapsed {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let DelayElapsed { epoch } = *self;
        with_player(world, |player| player.on_delay_elapsed(epoch, sim));
    }
}

/// 画布元素到期；元素已被替换或清空时不做任何事
#[derive(Debug)]
pub struct ExpireElement {
    pub message_id: MessageId,
    pub element: ElementId,
}

impl Event for ExpireElement {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let ExpireElement {
            message_id,
            element,
        } = *self;
        let now = sim.now();
        with_player(world, |player| {
            player.on_element_expired(message_id, element, now)
        });
    }
}
