//! 回放世界：事件执行时访问的业务状态

use super::navigator::Navigator;
use super::player::Player;
use crate::sim::World;
use std::any::Any;
use tracing::warn;

pub struct CallFlowWorld {
    pub player: Player,
    pub navigator: Navigator,
}

impl World for CallFlowWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// 从事件拿到的 `dyn World` 中取出回放状态机。
pub(crate) fn with_player<F, R>(world: &mut dyn World, f: F) -> Option<R>
where
    F: FnOnce(&mut Player) -> R,
{
    let Some(w) = world.as_any_mut().downcast_mut::<CallFlowWorld>() else {
        warn!("world 不是 CallFlowWorld，忽略回放事件");
        return None;
    };
    Some(f(&mut w.player))
}
