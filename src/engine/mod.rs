//! 导航状态层
//!
//! 方向计算、单次访问状态与按身份分发的作答事件。

pub mod event;
pub mod navigator;
pub mod visit_state;

pub use event::{RespondingEvent, TaggedEvent};
pub use navigator::{compute_direction, Dispatch, Navigator, Transition};
pub use visit_state::{EditState, Validity, VisitState};
