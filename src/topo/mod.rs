//! 画布拓扑
//!
//! 固定的 UE / eNB / MME 三列布局与循环车道。

mod lanes;
mod layout;

pub use lanes::LaneAllocator;
pub use layout::{BroadcastTarget, Coordinates, Topology};
