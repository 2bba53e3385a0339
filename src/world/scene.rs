use cgmath::Vector3;

use super::{
    object::{MeshComponent, SceneObject},
    picking::{Ray, AABB},
    Capabilities, Hit, ObjectId, TraceParams, World, WorldError,
};

/// In-process level: an arena of scene objects addressed by [`ObjectId`].
///
/// Transforms are stored in world space; the attachment parent is a relation
/// only and does not propagate transforms.
#[derive(Debug, Default)]
pub struct KitchenScene {
    pub objects: Vec<SceneObject>,
}

impl KitchenScene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Adds an object and returns its stable id
    pub fn spawn(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    /// Gets immutable reference to an object by id
    pub fn get_object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0 as usize)
    }

    /// Gets mutable reference to an object by id
    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0 as usize)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|obj| obj.name == name)
            .map(|index| ObjectId(index as u32))
    }

    /// Impulses applied to the object's mesh, oldest first
    pub fn impulses(&self, id: ObjectId) -> &[Vector3<f32>] {
        self.get_object(id)
            .and_then(|obj| obj.mesh.as_ref())
            .map(|mesh| mesh.impulses.as_slice())
            .unwrap_or(&[])
    }

    pub fn net_impulse(&self, id: ObjectId) -> Vector3<f32> {
        self.get_object(id)
            .and_then(|obj| obj.mesh.as_ref())
            .map(MeshComponent::net_impulse)
            .unwrap_or(Vector3::new(0.0, 0.0, 0.0))
    }

    pub fn is_highlighted(&self, id: ObjectId) -> bool {
        self.get_object(id)
            .and_then(|obj| obj.mesh.as_ref())
            .is_some_and(|mesh| mesh.highlighted)
    }

    /// Objects whose outline effect is currently on
    pub fn highlighted_objects(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, obj)| obj.mesh.as_ref().is_some_and(|mesh| mesh.highlighted))
            .map(|(index, _)| ObjectId(index as u32))
            .collect()
    }

    pub fn is_visible(&self, id: ObjectId) -> bool {
        self.get_object(id).is_some_and(|obj| obj.visible)
    }

    fn object(&self, id: ObjectId) -> Result<&SceneObject, WorldError> {
        self.get_object(id).ok_or(WorldError::UnknownObject(id))
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject, WorldError> {
        self.get_object_mut(id).ok_or(WorldError::UnknownObject(id))
    }

    fn mesh(&self, id: ObjectId) -> Result<&MeshComponent, WorldError> {
        self.object(id)?
            .mesh
            .as_ref()
            .ok_or(WorldError::MissingMesh(id))
    }

    fn mesh_mut(&mut self, id: ObjectId) -> Result<&mut MeshComponent, WorldError> {
        self.object_mut(id)?
            .mesh
            .as_mut()
            .ok_or(WorldError::MissingMesh(id))
    }
}

impl World for KitchenScene {
    fn object_ids(&self) -> Vec<ObjectId> {
        (0..self.objects.len() as u32).map(ObjectId).collect()
    }

    fn name(&self, id: ObjectId) -> Option<&str> {
        self.get_object(id).map(|obj| obj.name.as_str())
    }

    fn has_tag(&self, id: ObjectId, tag: &str) -> bool {
        self.get_object(id).is_some_and(|obj| obj.has_tag(tag))
    }

    fn capabilities(&self, id: ObjectId) -> Capabilities {
        match self.get_object(id) {
            Some(SceneObject {
                capabilities: Some(caps),
                ..
            }) => *caps,
            Some(obj) => Capabilities::from_legacy_naming(&obj.name, obj.has_tag(super::ITEM_TAG)),
            None => Capabilities::empty(),
        }
    }

    fn attach_parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.get_object(id).and_then(|obj| obj.parent)
    }

    fn forward_vector(&self, id: ObjectId) -> Result<Vector3<f32>, WorldError> {
        Ok(self.object(id)?.transform.forward())
    }

    fn has_mesh(&self, id: ObjectId) -> bool {
        self.mesh(id).is_ok()
    }

    fn add_impulse(&mut self, id: ObjectId, impulse: Vector3<f32>) -> Result<(), WorldError> {
        self.mesh_mut(id)?.impulses.push(impulse);
        Ok(())
    }

    fn local_bounds(&self, id: ObjectId) -> Result<AABB, WorldError> {
        Ok(self.mesh(id)?.local_bounds)
    }

    fn component_scale(&self, id: ObjectId) -> Result<Vector3<f32>, WorldError> {
        self.mesh(id)?;
        Ok(self.object(id)?.transform.scale)
    }

    fn set_world_location(
        &mut self,
        id: ObjectId,
        location: Vector3<f32>,
    ) -> Result<(), WorldError> {
        self.object_mut(id)?.set_translation(location);
        Ok(())
    }

    fn set_hidden(&mut self, id: ObjectId, hidden: bool) -> Result<(), WorldError> {
        self.object_mut(id)?.visible = !hidden;
        Ok(())
    }

    fn set_highlighted(&mut self, id: ObjectId, highlighted: bool) -> Result<(), WorldError> {
        self.mesh_mut(id)?.highlighted = highlighted;
        Ok(())
    }

    fn line_trace(&self, ray: &Ray, max_length: f32, params: &TraceParams) -> Option<Hit> {
        let mut closest: Option<Hit> = None;

        for (index, object) in self.objects.iter().enumerate() {
            let id = ObjectId(index as u32);
            if !object.visible || params.ignored.contains(&id) {
                continue;
            }

            let Some(bounds) = object.world_bounds() else {
                continue;
            };

            let Some(surface) = bounds.intersect_ray_with_normal(ray) else {
                continue;
            };

            if surface.distance > max_length {
                continue;
            }

            // Keep the closest intersection
            if closest
                .as_ref()
                .map_or(true, |hit| surface.distance < hit.distance)
            {
                closest = Some(Hit {
                    object: id,
                    distance: surface.distance,
                    location: ray.point_at(surface.distance),
                    normal: surface.normal,
                });
            }
        }

        closest
    }
}
