//! # Kitchen Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use kitchen::prelude::*;
//!
//! let mut scene = KitchenScene::new();
//! let cup = scene.spawn(
//!     ObjectBuilder::new("Cup1")
//!         .at(Vector3::new(150.0, 0.0, 64.0))
//!         .mesh(AABB::from_half_extents(Vector3::new(5.0, 5.0, 5.0)))
//!         .tag("Item")
//!         .build(),
//! );
//!
//! let mut app = KitchenApp::new(scene, KitchenConfig::default());
//! app.begin_play();
//! app.tick(0.016);
//! assert_eq!(app.last_hit().map(|hit| hit.object), Some(cup));
//! ```

// Re-export core application types
pub use crate::app::{KitchenApp, TickReport};
pub use crate::character::Character;
pub use crate::config::KitchenConfig;

// Re-export world boundary types
pub use crate::world::{
    Capabilities, Hit, KitchenScene, ObjectBuilder, ObjectId, World, WorldError, AABB,
};

// Re-export interaction types
pub use crate::interaction::{
    classify, ActionOutcome, AssetState, Hand, HitResolver, InteractionError, Interactor, ItemType,
};

// Re-export input types
pub use crate::input::{InputAction, InputAxis, InputBindings, InputState};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
