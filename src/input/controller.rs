use std::collections::{HashSet, VecDeque};

use winit::{
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
};

use super::bindings::{InputAction, InputAxis, InputBindings, Trigger};

/// Raw input gathered between two ticks.
///
/// Movement axes follow the held keys. Mouse motion accumulates until
/// [`InputState::take_look`] is called, and actions queue on the press edge
/// in arrival order.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub bindings: InputBindings,
    held: HashSet<KeyCode>,
    pending: VecDeque<InputAction>,
    look: (f32, f32),
}

impl InputState {
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn process_keyed_event(&mut self, event: &KeyEvent) -> bool {
        match event.physical_key {
            PhysicalKey::Code(code) => self.handle_key(code, event.state, event.repeat),
            PhysicalKey::Unidentified(_) => false,
        }
    }

    pub fn process_device_event(&mut self, event: &DeviceEvent) -> bool {
        match event {
            DeviceEvent::MouseMotion { delta } => {
                self.handle_mouse_motion(delta.0, delta.1);
                true
            }
            _ => false,
        }
    }

    /// Returns whether the key is bound to anything
    pub fn handle_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) -> bool {
        let mut consumed = false;

        if self.bindings.axis_for(code).is_some() {
            match state {
                ElementState::Pressed => self.held.insert(code),
                ElementState::Released => self.held.remove(&code),
            };
            consumed = true;
        }

        if let Some(action) = self.bindings.action_for(Trigger::Key(code)) {
            if state == ElementState::Pressed && !repeat {
                self.pending.push_back(action);
            }
            consumed = true;
        }

        consumed
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) -> bool {
        let Some(action) = self.bindings.action_for(Trigger::Mouse(button)) else {
            return false;
        };
        if state == ElementState::Pressed {
            self.pending.push_back(action);
        }
        true
    }

    pub fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        let sensitivity = self.bindings.mouse_sensitivity;
        // Screen Y grows downwards; moving the mouse up looks up
        let pitch_sign = if self.bindings.invert_look { 1.0 } else { -1.0 };
        self.look.0 += dx as f32 * sensitivity;
        self.look.1 += dy as f32 * sensitivity * pitch_sign;
    }

    /// Current value of an axis.
    ///
    /// Key axes are the clamped sum of their held keys. `Turn` and `LookUp`
    /// report the mouse look accumulated so far, in degrees.
    pub fn axis(&self, axis: InputAxis) -> f32 {
        match axis {
            InputAxis::Turn => self.look.0,
            InputAxis::LookUp => self.look.1,
            InputAxis::MoveForward | InputAxis::MoveRight => self
                .held
                .iter()
                .filter_map(|code| self.bindings.axis_for(*code))
                .filter(|key| key.axis == axis)
                .map(|key| key.scale)
                .sum::<f32>()
                .clamp(-1.0, 1.0),
        }
    }

    /// Accumulated (yaw, pitch) degrees since the last call
    pub fn take_look(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.look)
    }

    /// Queued actions in the order they were pressed
    pub fn drain_actions(&mut self) -> Vec<InputAction> {
        self.pending.drain(..).collect()
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Forgets held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::default();
        input.handle_key(KeyCode::KeyW, ElementState::Pressed, false);
        assert_eq!(input.axis(InputAxis::MoveForward), 1.0);

        input.handle_key(KeyCode::KeyS, ElementState::Pressed, false);
        assert_eq!(input.axis(InputAxis::MoveForward), 0.0);

        input.handle_key(KeyCode::KeyW, ElementState::Released, false);
        assert_eq!(input.axis(InputAxis::MoveForward), -1.0);
    }

    #[test]
    fn test_axis_is_clamped() {
        let mut input = InputState::default();
        input.handle_key(KeyCode::KeyD, ElementState::Pressed, false);
        input.handle_key(KeyCode::ArrowRight, ElementState::Pressed, false);
        assert_eq!(input.axis(InputAxis::MoveRight), 1.0);
    }

    #[test]
    fn test_actions_fire_on_press_only() {
        let mut input = InputState::default();
        input.handle_key(KeyCode::Tab, ElementState::Pressed, false);
        input.handle_key(KeyCode::Tab, ElementState::Pressed, true);
        input.handle_key(KeyCode::Tab, ElementState::Released, false);
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.handle_mouse_button(MouseButton::Left, ElementState::Released);

        assert_eq!(
            input.drain_actions(),
            vec![InputAction::SwitchSelectedHand, InputAction::Click]
        );
        assert!(!input.has_pending_actions());
    }

    #[test]
    fn test_unbound_input_is_not_consumed() {
        let mut input = InputState::default();
        assert!(!input.handle_key(KeyCode::KeyQ, ElementState::Pressed, false));
        assert!(!input.handle_mouse_button(MouseButton::Middle, ElementState::Pressed));
        assert!(input.drain_actions().is_empty());
    }

    #[test]
    fn test_mouse_motion_accumulates_until_taken() {
        let mut input = InputState::default();
        input.process_device_event(&DeviceEvent::MouseMotion { delta: (10.0, 5.0) });
        input.handle_mouse_motion(10.0, 5.0);

        assert!((input.axis(InputAxis::Turn) - 4.0).abs() < 1e-5);
        assert!((input.axis(InputAxis::LookUp) + 2.0).abs() < 1e-5);

        let (yaw, pitch) = input.take_look();
        assert!((yaw - 4.0).abs() < 1e-5);
        assert!((pitch + 2.0).abs() < 1e-5);
        assert_eq!(input.take_look(), (0.0, 0.0));
    }

    #[test]
    fn test_release_all_stops_movement() {
        let mut input = InputState::default();
        input.handle_key(KeyCode::KeyA, ElementState::Pressed, false);
        input.release_all();
        assert_eq!(input.axis(InputAxis::MoveRight), 0.0);
    }
}
