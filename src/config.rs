//! Tunables for the kitchen character.
//!
//! Defaults mirror the values the prototype shipped with; use the `with_*`
//! setters to adjust individual values.

use cgmath::Vector3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KitchenConfig {
    /// Per-axis impulse used to open and close drawers and doors
    pub applied_force: Vector3<f32>,
    /// Furthest hit distance at which the character can interact
    pub max_grasp_length: f32,
    /// Length of the forward selection ray
    pub trace_length: f32,
    /// Multiple of `applied_force` used to settle drawers shut at level start
    pub settle_factor: f32,
    /// Degrees per second of yaw for a full-scale turn input
    pub base_turn_rate: f32,
    /// Degrees per second of pitch for a full-scale look input
    pub base_look_up_rate: f32,
    /// Scale applied to the raw movement axes
    pub movement_scale: f32,
    /// Units per second at full movement input
    pub walk_speed: f32,
    /// Camera height above the character's feet
    pub eye_height: f32,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            applied_force: Vector3::new(1000.0, 1000.0, 1000.0),
            max_grasp_length: 300.0,
            trace_length: 1000.0,
            settle_factor: -6.0,
            base_turn_rate: 45.0,
            base_look_up_rate: 45.0,
            movement_scale: 0.5,
            walk_speed: 600.0,
            eye_height: 64.0,
        }
    }
}

impl KitchenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_applied_force(mut self, force: Vector3<f32>) -> Self {
        self.applied_force = force;
        self
    }

    pub fn with_max_grasp_length(mut self, length: f32) -> Self {
        self.max_grasp_length = length;
        self
    }

    pub fn with_trace_length(mut self, length: f32) -> Self {
        self.trace_length = length;
        self
    }

    pub fn with_settle_factor(mut self, factor: f32) -> Self {
        self.settle_factor = factor;
        self
    }

    pub fn with_turn_rates(mut self, turn: f32, look_up: f32) -> Self {
        self.base_turn_rate = turn;
        self.base_look_up_rate = look_up;
        self
    }

    pub fn with_walk_speed(mut self, speed: f32) -> Self {
        self.walk_speed = speed;
        self
    }

    /// Whether a hit at `distance` is close enough to interact with
    pub fn within_grasp(&self, distance: f32) -> bool {
        distance <= self.max_grasp_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grasp_boundary_is_inclusive() {
        let config = KitchenConfig::default();
        assert!(config.within_grasp(300.0));
        assert!(!config.within_grasp(300.1));
    }

    #[test]
    fn test_builder_overrides() {
        let config = KitchenConfig::new()
            .with_max_grasp_length(150.0)
            .with_settle_factor(-2.0);
        assert_eq!(config.max_grasp_length, 150.0);
        assert_eq!(config.settle_factor, -2.0);
        assert_eq!(config.trace_length, 1000.0);
    }
}
