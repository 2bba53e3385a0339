//! # Input
//!
//! Translates winit keyboard, mouse button and mouse motion events into the
//! character's movement axes and its two actions: `Click` (primary action)
//! and `SwitchSelectedHand`.

pub mod bindings;
pub mod controller;

pub use bindings::{AxisKey, InputAction, InputAxis, InputBindings, Trigger};
pub use controller::InputState;
