//! One-time classification of a freshly loaded level.
//!
//! Handles mark their parent body as openable (and nudge sliding drawers
//! shut), tagged items become portable. Everything else is scenery.

use std::collections::HashMap;

use cgmath::ElementWise;

use crate::config::KitchenConfig;
use crate::world::{Capabilities, ObjectId, World};

/// Open/closed state of a drawer or door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetState {
    Closed,
    Open,
    /// Reserved; classification never produces it
    Unknown,
}

/// Kind of portable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemType {
    #[default]
    GeneralItem,
    Cup,
    Plate,
    Mug,
    Pan,
    Spatula,
    Spoon,
}

pub type AssetStateMap = HashMap<ObjectId, AssetState>;
pub type ItemMap = HashMap<ObjectId, ItemType>;

/// Interactive objects of a level, keyed by object id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub asset_states: AssetStateMap,
    pub items: ItemMap,
}

impl Classification {
    pub fn is_openable(&self, id: ObjectId) -> bool {
        self.asset_states.contains_key(&id)
    }

    pub fn is_portable(&self, id: ObjectId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn is_interactive(&self, id: ObjectId) -> bool {
        self.is_openable(id) || self.is_portable(id)
    }

    pub fn state(&self, id: ObjectId) -> Option<AssetState> {
        self.asset_states.get(&id).copied()
    }
}

/// Scans every object once and builds the openable and portable maps.
///
/// Sliding drawers receive a settle impulse against their handle's forward
/// vector so they start shut; hinged bodies are left where they were placed.
pub fn classify(world: &mut dyn World, config: &KitchenConfig) -> Classification {
    let mut classification = Classification::default();

    for id in world.object_ids() {
        let caps = world.capabilities(id);

        if caps.contains(Capabilities::HANDLE) {
            classify_handle(world, config, id, caps, &mut classification);
        } else if caps.contains(Capabilities::ITEM) {
            classification.items.insert(id, ItemType::GeneralItem);
        }
    }

    log::info!(
        "Classified level: {} openable, {} portable",
        classification.asset_states.len(),
        classification.items.len()
    );

    classification
}

fn classify_handle(
    world: &mut dyn World,
    config: &KitchenConfig,
    handle: ObjectId,
    caps: Capabilities,
    classification: &mut Classification,
) {
    let name = world.name(handle).unwrap_or_default().to_owned();

    if !world.has_mesh(handle) {
        log::warn!("Handle {} ({}) has no static mesh; leaving it inert", handle, name);
        return;
    }

    let Some(body) = world.attach_parent(handle) else {
        log::warn!("Handle {} ({}) is not attached to anything; leaving it inert", handle, name);
        return;
    };

    let hinged = caps.contains(Capabilities::HINGED)
        || world.capabilities(body).contains(Capabilities::HINGED);

    if !hinged {
        match world.forward_vector(handle) {
            Ok(forward) => {
                let impulse = config.applied_force.mul_element_wise(forward) * config.settle_factor;
                if let Err(err) = world.add_impulse(handle, impulse) {
                    log::warn!("Could not settle drawer behind handle {}: {}", handle, err);
                }
            }
            Err(err) => log::warn!("Could not settle drawer behind handle {}: {}", handle, err),
        }
    }

    log::debug!("{} opens {} (hinged: {})", name, body, hinged);
    classification.asset_states.insert(body, AssetState::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{KitchenScene, ObjectBuilder, AABB};
    use cgmath::Vector3;

    fn mesh() -> AABB {
        AABB::from_half_extents(Vector3::new(5.0, 5.0, 5.0))
    }

    fn kitchen() -> KitchenScene {
        let mut scene = KitchenScene::new();
        let drawer = scene.spawn(ObjectBuilder::new("Drawer1").mesh(mesh()).build());
        scene.spawn(
            ObjectBuilder::new("Drawer1_Handle")
                .mesh(mesh())
                .attached_to(drawer)
                .build(),
        );
        let door = scene.spawn(ObjectBuilder::new("FridgeDoor").mesh(mesh()).build());
        scene.spawn(
            ObjectBuilder::new("Fridge_Handle")
                .mesh(mesh())
                .attached_to(door)
                .build(),
        );
        scene.spawn(ObjectBuilder::new("Cup1").mesh(mesh()).tag("Item").build());
        scene.spawn(ObjectBuilder::new("Table").mesh(mesh()).build());
        scene
    }

    #[test]
    fn test_handles_and_items_are_classified() {
        let mut scene = kitchen();
        let classification = classify(&mut scene, &KitchenConfig::default());

        let drawer = scene.find_by_name("Drawer1").unwrap();
        let door = scene.find_by_name("FridgeDoor").unwrap();
        let cup = scene.find_by_name("Cup1").unwrap();
        let table = scene.find_by_name("Table").unwrap();

        assert_eq!(classification.state(drawer), Some(AssetState::Closed));
        assert_eq!(classification.state(door), Some(AssetState::Closed));
        assert_eq!(classification.items.get(&cup), Some(&ItemType::GeneralItem));
        assert!(!classification.is_interactive(table));
        assert_eq!(classification.asset_states.len(), 2);
        assert_eq!(classification.items.len(), 1);
    }

    #[test]
    fn test_only_sliding_drawers_get_settled() {
        let mut scene = kitchen();
        classify(&mut scene, &KitchenConfig::default());

        let drawer_handle = scene.find_by_name("Drawer1_Handle").unwrap();
        let door_handle = scene.find_by_name("Fridge_Handle").unwrap();

        // Default handle faces +X
        assert_eq!(
            scene.impulses(drawer_handle),
            &[Vector3::new(-6000.0, 0.0, 0.0)]
        );
        assert!(scene.impulses(door_handle).is_empty());
    }

    #[test]
    fn test_handle_without_mesh_is_skipped() {
        let mut scene = KitchenScene::new();
        let drawer = scene.spawn(ObjectBuilder::new("Drawer2").mesh(mesh()).build());
        scene.spawn(ObjectBuilder::new("Drawer2_Handle").attached_to(drawer).build());

        let classification = classify(&mut scene, &KitchenConfig::default());
        assert!(classification.asset_states.is_empty());
        assert!(scene.impulses(drawer).is_empty());
    }

    #[test]
    fn test_tagged_handle_is_not_an_item() {
        let mut scene = KitchenScene::new();
        let drawer = scene.spawn(ObjectBuilder::new("Drawer3").mesh(mesh()).build());
        let handle = scene.spawn(
            ObjectBuilder::new("Drawer3_Handle")
                .mesh(mesh())
                .tag("Item")
                .attached_to(drawer)
                .build(),
        );

        let classification = classify(&mut scene, &KitchenConfig::default());
        assert!(classification.is_openable(drawer));
        assert!(!classification.is_portable(handle));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let mut scene = kitchen();
        let first = classify(&mut scene, &KitchenConfig::default());
        let second = classify(&mut scene, &KitchenConfig::default());
        assert_eq!(first, second);
    }
}
