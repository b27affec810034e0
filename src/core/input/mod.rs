//! Keyboard gestures: an instant display toggle and a hold-to-switch mode change.

mod controller;
mod gesture;

pub use controller::InputController;
pub use gesture::{
    ControlAction, DeferredTimer, GestureMachine, HoldGesture, HoldPhase, InputEvent,
};
