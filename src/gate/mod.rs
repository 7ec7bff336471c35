pub mod actions;

pub use actions::{
    can_advance, on_advance, on_retreat, show_validation_hint, ActionsView, GateAction, Submission,
};
