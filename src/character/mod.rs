//! # First-Person Character
//!
//! Walks on the ground plane and looks around with a yaw/pitch controller.
//! The eye sits `eye_height` above the actor location and is where the
//! forward selection ray starts.
//!
//! Coordinates are Z-up. A yaw of 0 faces +X and right is +Y.

use cgmath::{InnerSpace, Vector3, Zero};

use crate::config::KitchenConfig;
use crate::world::ObjectId;

/// Collision capsule of the character body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub radius: f32,
    pub half_height: f32,
}

impl Default for Capsule {
    fn default() -> Self {
        Self {
            radius: 5.0,
            half_height: 80.0,
        }
    }
}

/// Limits on the view rotation, in degrees
#[derive(Debug, Clone, Copy)]
pub struct ViewBounds {
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self {
            min_pitch: -89.0,
            max_pitch: 89.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Character {
    pub location: Vector3<f32>,
    /// Control yaw in degrees
    pub yaw: f32,
    /// Control pitch in degrees, positive looks up
    pub pitch: f32,
    pub eye_height: f32,
    pub capsule: Capsule,
    pub bounds: ViewBounds,
    /// Scene object standing in for the body, skipped by the selection ray
    pub body: Option<ObjectId>,
    movement_scale: f32,
    walk_speed: f32,
    base_turn_rate: f32,
    base_look_up_rate: f32,
}

impl Character {
    pub fn new(config: &KitchenConfig) -> Self {
        Self {
            location: Vector3::zero(),
            yaw: 0.0,
            pitch: 0.0,
            eye_height: config.eye_height,
            capsule: Capsule::default(),
            bounds: ViewBounds::default(),
            body: None,
            movement_scale: config.movement_scale,
            walk_speed: config.walk_speed,
            base_turn_rate: config.base_turn_rate,
            base_look_up_rate: config.base_look_up_rate,
        }
    }

    pub fn at(mut self, location: Vector3<f32>) -> Self {
        self.location = location;
        self
    }

    pub fn facing(mut self, yaw: f32) -> Self {
        self.set_yaw(yaw);
        self
    }

    pub fn with_body(mut self, body: ObjectId) -> Self {
        self.body = Some(body);
        self
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw.rem_euclid(360.0);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
    }

    /// Adds raw yaw in degrees (mouse look)
    pub fn add_controller_yaw(&mut self, degrees: f32) {
        self.set_yaw(self.yaw + degrees);
    }

    /// Adds raw pitch in degrees (mouse look)
    pub fn add_controller_pitch(&mut self, degrees: f32) {
        self.set_pitch(self.pitch + degrees);
    }

    /// Turns at `rate` (1.0 is the full base turn rate) for `dt` seconds
    pub fn add_yaw_input(&mut self, rate: f32, dt: f32) {
        self.add_controller_yaw(rate * self.base_turn_rate * dt);
    }

    /// Looks up at `rate` (1.0 is the full base look rate) for `dt` seconds
    pub fn add_pitch_input(&mut self, rate: f32, dt: f32) {
        self.add_controller_pitch(rate * self.base_look_up_rate * dt);
    }

    pub fn move_forward(&mut self, value: f32, dt: f32) {
        self.walk(self.ground_forward(), value, dt);
    }

    pub fn move_right(&mut self, value: f32, dt: f32) {
        self.walk(self.ground_right(), value, dt);
    }

    fn walk(&mut self, direction: Vector3<f32>, value: f32, dt: f32) {
        if value == 0.0 {
            return;
        }
        self.location += direction * (value * self.movement_scale * self.walk_speed * dt);
    }

    /// Yaw-only forward, parallel to the ground
    pub fn ground_forward(&self) -> Vector3<f32> {
        let yaw = self.yaw.to_radians();
        Vector3::new(yaw.cos(), yaw.sin(), 0.0)
    }

    pub fn ground_right(&self) -> Vector3<f32> {
        let yaw = self.yaw.to_radians();
        Vector3::new(-yaw.sin(), yaw.cos(), 0.0)
    }

    /// View direction including pitch
    pub fn view_forward(&self) -> Vector3<f32> {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vector3::new(
            yaw.cos() * pitch.cos(),
            yaw.sin() * pitch.cos(),
            pitch.sin(),
        )
        .normalize()
    }

    pub fn eye_location(&self) -> Vector3<f32> {
        self.location + Vector3::unit_z() * self.eye_height
    }

    /// Eye location and view direction the selection ray is cast from
    pub fn viewpoint(&self) -> (Vector3<f32>, Vector3<f32>) {
        (self.eye_location(), self.view_forward())
    }
}
