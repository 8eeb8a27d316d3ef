//! 回放：状态机、调度、画布元素与导航

mod engine;
mod events;
mod navigator;
mod observer;
mod player;
mod stage;
mod state;
mod world;

pub use engine::CallFlowEngine;
pub use events::{AnimationDone, DelayElapsed, ExpireElement};
pub use navigator::{Navigator, NavigatorHit};
pub use observer::{
    Command, LayerHighlight, PlaybackObserver, RenderCommand, StateChange, Warning,
};
pub use player::Player;
pub use stage::{ElementId, ElementKind, Stage, StageElement};
pub use state::{Phase, SimulationState};
pub use world::CallFlowWorld;
