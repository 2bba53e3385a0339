//! Kitchen interaction core
//!
//! First-person interaction with a kitchen level: a one-time scan finds
//! drawers, doors and portable items, a forward ray picks what the character
//! looks at, and clicks open/close, pick up or drop with a two-hand inventory.
//! Rendering and physics stay with the host engine behind the [`world::World`]
//! trait.

pub mod app;
pub mod character;
pub mod config;
pub mod input;
pub mod interaction;
pub mod prelude;
pub mod world;

// Re-export main types for convenience
pub use app::{KitchenApp, TickReport};
pub use config::KitchenConfig;
pub use world::KitchenScene;

/// Creates an app over an empty in-process scene with default tunables
pub fn default() -> KitchenApp<KitchenScene> {
    KitchenApp::new(KitchenScene::new(), KitchenConfig::default())
}
