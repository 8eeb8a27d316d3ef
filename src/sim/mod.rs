//! 仿真核心模块
//!
//! 回放引擎运行在一个单线程、事件驱动的虚拟时钟上：循环的挂起点被建模为
//! 调度到未来时刻的事件，暂停/重置只需让这些事件失效即可。

mod event;
mod simulator;
mod time;

pub use event::{Event, World};
pub use simulator::Simulator;
pub use time::SimTime;
