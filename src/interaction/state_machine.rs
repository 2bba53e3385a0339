//! # Interaction State Machine
//!
//! Maps the hit under the crosshair to exactly one behaviour per click:
//! drop what the selected hand holds, open or close a drawer/door, pick up an
//! item, or nothing. Every tick it also keeps the outline highlight on the
//! object the character could interact with.
//!
//! ## Click resolution
//!
//! 1. No blocking hit -> [`ActionOutcome::NoTarget`]
//! 2. Hit beyond grasp range -> [`ActionOutcome::TooFar`]
//! 3. Hit is an object already in a hand -> [`ActionOutcome::Ignored`]
//! 4. Selected hand full -> drop onto the clicked surface
//! 5. Handle or body of an openable -> toggle open/closed with one impulse
//! 6. Portable item -> pick up into the selected hand
//! 7. Anything else -> [`ActionOutcome::Ignored`]

use cgmath::{ElementWise, Vector3};

use super::{
    classifier::{AssetState, Classification},
    error::InteractionError,
    inventory::{Hand, HandSlots},
};
use crate::config::KitchenConfig;
use crate::world::{Capabilities, Hit, ObjectId, World, AABB};

/// What a primary action did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    /// Nothing blocking under the crosshair
    NoTarget,
    /// Hit too far away to reach
    TooFar { object: ObjectId, distance: f32 },
    /// Drawer or door kicked into a new state
    Toggled {
        object: ObjectId,
        state: AssetState,
        impulse: Vector3<f32>,
    },
    PickedUp { object: ObjectId, hand: Hand },
    Dropped {
        object: ObjectId,
        hand: Hand,
        location: Vector3<f32>,
    },
    /// Target is neither openable nor portable
    Ignored { object: ObjectId },
}

/// Per-character interaction state: classified maps, hand slots and highlight
#[derive(Debug, Clone)]
pub struct Interactor {
    config: KitchenConfig,
    classification: Classification,
    hands: HandSlots,
    highlighted: Option<ObjectId>,
}

impl Interactor {
    pub fn new(config: KitchenConfig, classification: Classification) -> Self {
        Self {
            config,
            classification,
            hands: HandSlots::new(),
            highlighted: None,
        }
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn hands(&self) -> &HandSlots {
        &self.hands
    }

    pub fn highlighted(&self) -> Option<ObjectId> {
        self.highlighted
    }

    pub fn asset_state(&self, id: ObjectId) -> Option<AssetState> {
        self.classification.state(id)
    }

    /// Handles resolve to the drawer or door they are attached to
    pub fn effective_target(&self, world: &dyn World, id: ObjectId) -> ObjectId {
        if world.capabilities(id).contains(Capabilities::HANDLE) {
            world.attach_parent(id).unwrap_or(id)
        } else {
            id
        }
    }

    /// Resolves one click against the hit under the crosshair.
    ///
    /// The hand slots are read once at the start; a click never both drops
    /// and picks up.
    pub fn primary_action(
        &mut self,
        world: &mut dyn World,
        hit: Option<&Hit>,
    ) -> Result<ActionOutcome, InteractionError> {
        let Some(hit) = hit else {
            log::warn!("Not a valid action!");
            return Ok(ActionOutcome::NoTarget);
        };

        if !self.config.within_grasp(hit.distance) {
            log::warn!(
                "Target {} is too far away ({:.1} > {:.1})",
                hit.object,
                hit.distance,
                self.config.max_grasp_length
            );
            return Ok(ActionOutcome::TooFar {
                object: hit.object,
                distance: hit.distance,
            });
        }

        if self.hands.contains(hit.object) {
            log::warn!("{} is already held; ignoring stale hit", hit.object);
            return Ok(ActionOutcome::Ignored { object: hit.object });
        }

        if let Some(held) = self.hands.selected_item() {
            return self.drop_held(world, held, hit);
        }

        let target = self.effective_target(world, hit.object);

        if self.classification.is_openable(target) {
            self.toggle(world, target)
        } else if self.classification.is_portable(target) {
            self.pick_up(world, target)
        } else {
            Ok(ActionOutcome::Ignored { object: target })
        }
    }

    /// Keeps the outline on the interactive object under the crosshair.
    ///
    /// Nothing is highlighted while the selected hand holds something.
    pub fn update_highlight(
        &mut self,
        world: &mut dyn World,
        hit: Option<&Hit>,
    ) -> Result<(), InteractionError> {
        if self.hands.selected_item().is_some() {
            return self.clear_highlight(world);
        }

        let candidate = {
            let view: &dyn World = &*world;
            hit.filter(|hit| self.config.within_grasp(hit.distance))
                .map(|hit| self.effective_target(view, hit.object))
                .filter(|target| self.classification.is_interactive(*target))
                .filter(|target| view.has_mesh(*target))
        };

        if candidate == self.highlighted {
            return Ok(());
        }

        self.clear_highlight(world)?;

        if let Some(target) = candidate {
            world.set_highlighted(target, true)?;
            self.highlighted = Some(target);
        }
        Ok(())
    }

    /// Selects the other hand for the next pick-up or drop
    pub fn switch_hand(&mut self) -> Hand {
        let hand = self.hands.switch();
        log::info!("Next action will be performed with the {} hand", hand);
        hand
    }

    fn clear_highlight(&mut self, world: &mut dyn World) -> Result<(), InteractionError> {
        if let Some(previous) = self.highlighted.take() {
            world.set_highlighted(previous, false)?;
        }
        Ok(())
    }

    fn toggle(
        &mut self,
        world: &mut dyn World,
        target: ObjectId,
    ) -> Result<ActionOutcome, InteractionError> {
        let Some(state) = self.classification.state(target) else {
            return Ok(ActionOutcome::Ignored { object: target });
        };

        let kick = self
            .config
            .applied_force
            .mul_element_wise(world.forward_vector(target)?);

        let (impulse, next) = match state {
            AssetState::Closed => (kick, AssetState::Open),
            AssetState::Open => (-kick, AssetState::Closed),
            AssetState::Unknown => {
                log::warn!("{} is in an unknown state; not toggling", target);
                return Ok(ActionOutcome::Ignored { object: target });
            }
        };

        world.add_impulse(target, impulse).inspect_err(|err| {
            log::error!("Cannot toggle {}: {}", target, err);
        })?;
        self.classification.asset_states.insert(target, next);
        log::debug!("{} {:?} -> {:?}", target, state, next);

        Ok(ActionOutcome::Toggled {
            object: target,
            state: next,
            impulse,
        })
    }

    fn pick_up(
        &mut self,
        world: &mut dyn World,
        target: ObjectId,
    ) -> Result<ActionOutcome, InteractionError> {
        let Some(hand) = self.hands.stow(target) else {
            return Ok(ActionOutcome::Ignored { object: target });
        };
        if let Err(err) = world.set_hidden(target, true) {
            self.hands.take(hand);
            return Err(err.into());
        }
        if self.highlighted == Some(target) {
            self.clear_highlight(world)?;
        }
        log::debug!("Picked up {} with the {} hand", target, hand);

        Ok(ActionOutcome::PickedUp {
            object: target,
            hand,
        })
    }

    fn drop_held(
        &mut self,
        world: &mut dyn World,
        held: ObjectId,
        surface: &Hit,
    ) -> Result<ActionOutcome, InteractionError> {
        let bounds = world.local_bounds(held).inspect_err(|err| {
            log::error!("Cannot drop {}: {}", held, err);
        })?;
        let scale = world.component_scale(held)?;
        let location = surface.location + resting_offset(&bounds, scale, surface.normal);

        // Move while still hidden so a failure leaves the item in hand, unseen
        world.set_world_location(held, location)?;
        world.set_hidden(held, false)?;

        let hand = self.hands.selected();
        self.hands.take(hand);
        log::debug!("Dropped {} from the {} hand at {:?}", held, hand, location);

        Ok(ActionOutcome::Dropped {
            object: held,
            hand,
            location,
        })
    }
}

/// Offset from a surface point to an object's pivot so that the bounding box
/// face turned towards the surface rests on it.
///
/// Along each axis the object is pushed out in the direction of the surface
/// normal by the scaled distance from its pivot to that face.
pub fn resting_offset(bounds: &AABB, scale: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    let face = Vector3::new(
        facing_extent(bounds.min.x, bounds.max.x, normal.x),
        facing_extent(bounds.min.y, bounds.max.y, normal.y),
        facing_extent(bounds.min.z, bounds.max.z, normal.z),
    );
    normal.mul_element_wise(face.mul_element_wise(scale))
}

fn facing_extent(min: f32, max: f32, normal: f32) -> f32 {
    if normal >= 0.0 {
        -min
    } else {
        max
    }
}
