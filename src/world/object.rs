use cgmath::{Deg, Matrix4, One, Quaternion, Rotation, Rotation3, Vector3};

use super::{picking::AABB, Capabilities, ObjectId};

/// World transform of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// Set rotation around the vertical (Z) axis
    pub fn set_yaw(&mut self, angle: Deg<f32>) {
        self.rotation = Quaternion::from_angle_z(angle);
    }

    /// Facing direction; +X is forward in object space
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation.rotate_vector(Vector3::unit_x())
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.translation);
        let r = Matrix4::from(self.rotation);
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }
}

/// Rigid-body mesh attached to an object.
///
/// Impulses are only recorded here; integrating them into motion is the
/// physics engine's business.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub local_bounds: AABB,
    /// Custom-depth outline enabled
    pub highlighted: bool,
    pub impulses: Vec<Vector3<f32>>,
}

impl MeshComponent {
    pub fn new(local_bounds: AABB) -> Self {
        Self {
            local_bounds,
            highlighted: false,
            impulses: Vec::new(),
        }
    }

    pub fn net_impulse(&self) -> Vector3<f32> {
        self.impulses
            .iter()
            .fold(Vector3::new(0.0, 0.0, 0.0), |acc, impulse| acc + *impulse)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub tags: Vec<String>,
    pub parent: Option<ObjectId>,
    pub transform: Transform,
    pub mesh: Option<MeshComponent>,
    pub visible: bool,
    /// Authored capabilities; `None` falls back to the legacy naming scheme
    pub capabilities: Option<Capabilities>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            parent: None,
            transform: Transform::default(),
            mesh: None,
            visible: true,
            capabilities: None,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Set translation
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform.translation = translation;
    }

    /// World-space bounds, if the object has a mesh
    pub fn world_bounds(&self) -> Option<AABB> {
        self.mesh
            .as_ref()
            .map(|mesh| mesh.local_bounds.transform(&self.transform.matrix()))
    }
}

/// Builder pattern for configuring scene objects
pub struct ObjectBuilder {
    object: SceneObject,
}

impl ObjectBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            object: SceneObject::new(name),
        }
    }

    pub fn at(mut self, translation: Vector3<f32>) -> Self {
        self.object.transform.translation = translation;
        self
    }

    pub fn facing(mut self, yaw: Deg<f32>) -> Self {
        self.object.transform.set_yaw(yaw);
        self
    }

    pub fn scale(mut self, scale: Vector3<f32>) -> Self {
        self.object.transform.scale = scale;
        self
    }

    /// Give the object a static mesh with the given local bounds
    pub fn mesh(mut self, local_bounds: AABB) -> Self {
        self.object.mesh = Some(MeshComponent::new(local_bounds));
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.object.tags.push(tag.into());
        self
    }

    pub fn attached_to(mut self, parent: ObjectId) -> Self {
        self.object.parent = Some(parent);
        self
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.object.capabilities = Some(capabilities);
        self
    }

    pub fn build(self) -> SceneObject {
        self.object
    }
}
