use cgmath::Vector3;

use crate::config::KitchenConfig;
use crate::world::{Hit, ObjectId, Ray, TraceParams, World};

/// Casts the forward selection ray once per tick
#[derive(Debug, Clone)]
pub struct HitResolver {
    pub trace_length: f32,
    pub params: TraceParams,
}

impl HitResolver {
    pub fn new(trace_length: f32) -> Self {
        Self {
            trace_length,
            params: TraceParams::default(),
        }
    }

    pub fn from_config(config: &KitchenConfig) -> Self {
        Self::new(config.trace_length)
    }

    /// Excludes an object (typically the character's own body) from the trace
    pub fn ignore(mut self, id: ObjectId) -> Self {
        self.params.ignored.push(id);
        self
    }

    /// Nearest blocking object in front of the viewpoint, if any
    pub fn resolve(
        &self,
        world: &dyn World,
        origin: Vector3<f32>,
        forward: Vector3<f32>,
    ) -> Option<Hit> {
        let ray = Ray::new(origin, forward);
        world.line_trace(&ray, self.trace_length, &self.params)
    }
}

impl Default for HitResolver {
    fn default() -> Self {
        Self::from_config(&KitchenConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{KitchenScene, ObjectBuilder, AABB};

    fn scene_with_counter(at: f32) -> (KitchenScene, ObjectId) {
        let mut scene = KitchenScene::new();
        let counter = scene.spawn(
            ObjectBuilder::new("Counter")
                .at(Vector3::new(at, 0.0, 0.0))
                .mesh(AABB::from_half_extents(Vector3::new(50.0, 50.0, 50.0)))
                .build(),
        );
        (scene, counter)
    }

    #[test]
    fn test_resolves_object_in_front() {
        let (scene, counter) = scene_with_counter(250.0);
        let hit = HitResolver::default()
            .resolve(&scene, Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(hit.object, counter);
        assert_eq!(hit.distance, 200.0);
    }

    #[test]
    fn test_nothing_beyond_trace_length() {
        let (scene, _) = scene_with_counter(1200.0);
        let hit = HitResolver::default().resolve(
            &scene,
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_ignored_objects_are_transparent() {
        let (scene, counter) = scene_with_counter(250.0);
        let hit = HitResolver::default().ignore(counter).resolve(
            &scene,
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_looking_away_misses() {
        let (scene, _) = scene_with_counter(250.0);
        let hit = HitResolver::default().resolve(
            &scene,
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
        );
        assert!(hit.is_none());
    }
}
