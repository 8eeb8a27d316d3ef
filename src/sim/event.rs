//! 事件与世界 trait
//!
//! 回放循环的每个挂起点（动画完成、消息间隔）以及元素过期都是一个事件；
//! 事件执行时拿到仿真器和业务世界（`World`），由业务层自行 downcast。

use super::simulator::Simulator;
use std::any::Any;

/// 事件：可被调度执行。使用 `self: Box<Self>` 以支持所有权转移。
pub trait Event: Send + 'static {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World);

    /// 用于日志的事件名
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// 仿真世界：由业务层实现（例如回放状态机 + 导航器）。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
