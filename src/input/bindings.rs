use std::collections::HashMap;

use winit::{event::MouseButton, keyboard::KeyCode};

/// Continuous inputs sampled every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    MoveForward,
    MoveRight,
    Turn,
    LookUp,
}

/// Discrete inputs fired once per press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Click,
    SwitchSelectedHand,
}

/// Physical control an action is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// A key contributing `scale` to an axis while held
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisKey {
    pub axis: InputAxis,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct InputBindings {
    axis_keys: HashMap<KeyCode, AxisKey>,
    actions: HashMap<Trigger, InputAction>,
    /// Degrees of view rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Invert the mouse Y axis for `LookUp`
    pub invert_look: bool,
}

impl InputBindings {
    /// Bindings with nothing mapped
    pub fn empty() -> Self {
        Self {
            axis_keys: HashMap::new(),
            actions: HashMap::new(),
            mouse_sensitivity: 0.2,
            invert_look: false,
        }
    }

    pub fn bind_axis(mut self, key: KeyCode, axis: InputAxis, scale: f32) -> Self {
        self.axis_keys.insert(key, AxisKey { axis, scale });
        self
    }

    pub fn bind_action(mut self, trigger: Trigger, action: InputAction) -> Self {
        self.actions.insert(trigger, action);
        self
    }

    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    pub fn axis_for(&self, key: KeyCode) -> Option<AxisKey> {
        self.axis_keys.get(&key).copied()
    }

    pub fn action_for(&self, trigger: Trigger) -> Option<InputAction> {
        self.actions.get(&trigger).copied()
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::empty()
            .bind_axis(KeyCode::KeyW, InputAxis::MoveForward, 1.0)
            .bind_axis(KeyCode::ArrowUp, InputAxis::MoveForward, 1.0)
            .bind_axis(KeyCode::KeyS, InputAxis::MoveForward, -1.0)
            .bind_axis(KeyCode::ArrowDown, InputAxis::MoveForward, -1.0)
            .bind_axis(KeyCode::KeyD, InputAxis::MoveRight, 1.0)
            .bind_axis(KeyCode::ArrowRight, InputAxis::MoveRight, 1.0)
            .bind_axis(KeyCode::KeyA, InputAxis::MoveRight, -1.0)
            .bind_axis(KeyCode::ArrowLeft, InputAxis::MoveRight, -1.0)
            .bind_action(Trigger::Mouse(MouseButton::Left), InputAction::Click)
            .bind_action(Trigger::Key(KeyCode::Tab), InputAction::SwitchSelectedHand)
    }
}
