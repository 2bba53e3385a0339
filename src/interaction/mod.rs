//! # Interaction Core
//!
//! The kitchen interaction logic, independent of any particular engine:
//!
//! - [`classifier`] - one-time scan that finds openables and portables
//! - [`hit_resolver`] - forward selection ray cast every tick
//! - [`state_machine`] - click resolution (toggle, pick up, drop) and highlight
//! - [`inventory`] - the two hand slots and the selected hand
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use kitchen::config::KitchenConfig;
//! use kitchen::interaction::{classify, ActionOutcome, HitResolver, Interactor};
//! use kitchen::world::{KitchenScene, ObjectBuilder, AABB};
//!
//! let mut scene = KitchenScene::new();
//! scene.spawn(
//!     ObjectBuilder::new("Cup1")
//!         .at(Vector3::new(100.0, 0.0, 0.0))
//!         .mesh(AABB::from_half_extents(Vector3::new(5.0, 5.0, 5.0)))
//!         .tag("Item")
//!         .build(),
//! );
//!
//! let config = KitchenConfig::default();
//! let classification = classify(&mut scene, &config);
//! let mut interactor = Interactor::new(config, classification);
//!
//! let hit = HitResolver::default().resolve(
//!     &scene,
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//! );
//! let outcome = interactor.primary_action(&mut scene, hit.as_ref()).unwrap();
//! assert!(matches!(outcome, ActionOutcome::PickedUp { .. }));
//! ```

pub mod classifier;
pub mod error;
pub mod hit_resolver;
pub mod inventory;
pub mod state_machine;


// Re-export main types
pub use classifier::{classify, AssetState, AssetStateMap, Classification, ItemMap, ItemType};
pub use error::InteractionError;
pub use hit_resolver::HitResolver;
pub use inventory::{Hand, HandSlots};
pub use state_machine::{resting_offset, ActionOutcome, Interactor};
