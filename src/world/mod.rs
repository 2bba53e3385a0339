//! # World Boundary
//!
//! Everything the interaction core needs from the host engine goes through the
//! [`World`] trait: enumerating objects, reading names/tags/capabilities,
//! following attachment parents, applying impulses, moving and hiding objects,
//! toggling the outline highlight and casting rays.
//!
//! ## Key Components
//!
//! - [`ObjectId`] - Stable arena key for an engine entity
//! - [`Capabilities`] - Declared interaction roles (handle, item, hinged)
//! - [`Hit`] / [`TraceParams`] - Line trace result and configuration
//! - [`KitchenScene`] - In-process implementation used by tests and the demo
//!
//! The core never creates or destroys entities. It only reads them and asks
//! the world to mutate them.

pub mod object;
pub mod picking;
pub mod scene;

use std::fmt;

use bitflags::bitflags;
use cgmath::Vector3;

pub use object::{MeshComponent, ObjectBuilder, SceneObject, Transform};
pub use picking::{Ray, SurfaceHit, AABB};
pub use scene::KitchenScene;

/// Exact tag legacy content uses to mark portable objects.
pub const ITEM_TAG: &str = "Item";
/// Name fragment legacy content uses for drawer and door handles.
pub const HANDLE_MARKER: &str = "Handle";
/// Name fragment legacy content uses for hinged bodies.
pub const DOOR_MARKER: &str = "Door";

/// Opaque, stable identifier of an engine entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Interaction roles an object declares at authoring or load time.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Clickable proxy for the drawer or door it is attached to.
        const HANDLE = 1 << 0;
        /// Can be picked up into a hand slot.
        const ITEM   = 1 << 1;
        /// Door-like body that already rests closed; skips the settle impulse.
        const HINGED = 1 << 2;
    }
}

impl Capabilities {
    /// Capabilities of content authored with the old naming scheme.
    ///
    /// Substring matches on the display name, exact match on the tag.
    pub fn from_legacy_naming(name: &str, has_item_tag: bool) -> Self {
        let mut caps = Self::empty();
        if name.contains(HANDLE_MARKER) {
            caps |= Self::HANDLE;
        }
        if name.contains(DOOR_MARKER) {
            caps |= Self::HINGED;
        }
        if has_item_tag {
            caps |= Self::ITEM;
        }
        caps
    }
}

/// Result of a blocking line trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub object: ObjectId,
    /// Distance from the trace origin to the impact point
    pub distance: f32,
    /// World space impact point
    pub location: Vector3<f32>,
    /// Outward surface normal at the impact point
    pub normal: Vector3<f32>,
}

/// Line trace configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TraceParams {
    pub tag: &'static str,
    /// Trace against per-triangle collision rather than simplified hulls
    pub trace_complex: bool,
    pub return_physical_material: bool,
    /// Objects the trace passes through (usually the character itself)
    pub ignored: Vec<ObjectId>,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            tag: "Trace",
            trace_complex: true,
            return_physical_material: false,
            ignored: Vec::new(),
        }
    }
}

/// Failures reported by the host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("object {0} does not exist in this level")]
    UnknownObject(ObjectId),
    #[error("object {0} has no static mesh component")]
    MissingMesh(ObjectId),
}

/// Narrow view of the host engine consumed by the interaction core.
pub trait World {
    /// All live objects in the current level
    fn object_ids(&self) -> Vec<ObjectId>;

    fn name(&self, id: ObjectId) -> Option<&str>;

    fn has_tag(&self, id: ObjectId, tag: &str) -> bool;

    /// Interaction roles of an object.
    ///
    /// Defaults to the legacy naming scheme; hosts with authored metadata
    /// override this.
    fn capabilities(&self, id: ObjectId) -> Capabilities {
        match self.name(id) {
            Some(name) => Capabilities::from_legacy_naming(name, self.has_tag(id, ITEM_TAG)),
            None => Capabilities::empty(),
        }
    }

    /// The object this one is attached to (handle -> drawer/door body)
    fn attach_parent(&self, id: ObjectId) -> Option<ObjectId>;

    fn forward_vector(&self, id: ObjectId) -> Result<Vector3<f32>, WorldError>;

    /// Whether the object has a rigid-body mesh that impulses and bounds apply to
    fn has_mesh(&self, id: ObjectId) -> bool;

    /// Instantaneous impulse on the object's mesh; the engine integrates the motion
    fn add_impulse(&mut self, id: ObjectId, impulse: Vector3<f32>) -> Result<(), WorldError>;

    fn local_bounds(&self, id: ObjectId) -> Result<AABB, WorldError>;

    fn component_scale(&self, id: ObjectId) -> Result<Vector3<f32>, WorldError>;

    fn set_world_location(
        &mut self,
        id: ObjectId,
        location: Vector3<f32>,
    ) -> Result<(), WorldError>;

    /// Hidden objects are neither rendered nor traced
    fn set_hidden(&mut self, id: ObjectId, hidden: bool) -> Result<(), WorldError>;

    /// Outline effect on the object's mesh
    fn set_highlighted(&mut self, id: ObjectId, highlighted: bool) -> Result<(), WorldError>;

    /// Nearest blocking hit along the ray within `max_length`
    fn line_trace(&self, ray: &Ray, max_length: f32, params: &TraceParams) -> Option<Hit>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_naming_matches_substrings() {
        assert_eq!(
            Capabilities::from_legacy_naming("Drawer1_Handle", false),
            Capabilities::HANDLE
        );
        assert_eq!(
            Capabilities::from_legacy_naming("FridgeDoor_Handle2", false),
            Capabilities::HANDLE | Capabilities::HINGED
        );
        assert_eq!(
            Capabilities::from_legacy_naming("Cup1", true),
            Capabilities::ITEM
        );
        assert!(Capabilities::from_legacy_naming("Table", false).is_empty());
        // Matching is case sensitive
        assert!(Capabilities::from_legacy_naming("drawer_handle", false).is_empty());
    }

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId(7).to_string(), "#7");
    }
}
