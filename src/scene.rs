//! Host scene state.
//!
//! A [`Scene`] holds objects, remembers which one is active, and tracks the
//! interaction mode. Operations that read or write mesh data check this
//! state up front and refuse to run when it does not fit.

use std::fmt;

use nalgebra::{Matrix4, Point3};

use crate::mesh::PolyMesh;

/// What the user is currently doing in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionMode {
    /// Whole-object manipulation. Mesh data is in sync.
    #[default]
    Object,
    /// Mesh editing. Mesh data is owned by the editor until it exits.
    Edit,
    /// Sculpting.
    Sculpt,
    /// Painting vertex colors.
    VertexPaint,
    /// Painting vertex group weights.
    WeightPaint,
    /// Painting textures.
    TexturePaint,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InteractionMode::Object => "object",
            InteractionMode::Edit => "edit",
            InteractionMode::Sculpt => "sculpt",
            InteractionMode::VertexPaint => "vertex paint",
            InteractionMode::WeightPaint => "weight paint",
            InteractionMode::TexturePaint => "texture paint",
        };
        f.write_str(name)
    }
}

/// Data carried by an object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectData {
    /// Polygon mesh.
    Mesh(PolyMesh),
    /// Curve; opaque here.
    Curve,
    /// Camera; opaque here.
    Camera,
    /// Light; opaque here.
    Light,
    /// No data.
    Empty,
}

impl ObjectData {
    /// Short name of the data kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectData::Mesh(_) => "mesh",
            ObjectData::Curve => "curve",
            ObjectData::Camera => "camera",
            ObjectData::Light => "light",
            ObjectData::Empty => "empty",
        }
    }
}

/// A named object placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Object name.
    pub name: String,
    /// Object data.
    pub data: ObjectData,
    /// Object-to-world transform.
    pub world: Matrix4<f64>,
}

impl SceneObject {
    /// A mesh object at the origin.
    pub fn mesh(name: impl Into<String>, mesh: PolyMesh) -> Self {
        Self::new(name, ObjectData::Mesh(mesh))
    }

    /// An object at the origin.
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            data,
            world: Matrix4::identity(),
        }
    }

    /// Set the object-to-world transform.
    pub fn with_world(mut self, world: Matrix4<f64>) -> Self {
        self.world = world;
        self
    }

    /// The mesh, if this is a mesh object.
    pub fn as_mesh(&self) -> Option<&PolyMesh> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// The mesh, mutably, if this is a mesh object.
    pub fn as_mesh_mut(&mut self) -> Option<&mut PolyMesh> {
        match &mut self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Map an object-space point to world space.
    #[inline]
    pub fn to_world(&self, p: &Point3<f64>) -> Point3<f64> {
        self.world.transform_point(p)
    }
}

/// Handle to an object in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Objects, the active object, and the interaction mode.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    active: Option<ObjectId>,
    mode: InteractionMode,
}

impl Scene {
    /// An empty scene in object mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its handle.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    /// Get an object.
    pub fn object(&self, id: ObjectId) -> &SceneObject {
        &self.objects[id.0]
    }

    /// Get an object mutably.
    pub fn object_mut(&mut self, id: ObjectId) -> &mut SceneObject {
        &mut self.objects[id.0]
    }

    /// Find an object by name.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name).map(ObjectId)
    }

    /// Make an object active, or clear the active object.
    pub fn set_active(&mut self, id: Option<ObjectId>) {
        self.active = id;
    }

    /// The active object.
    pub fn active(&self) -> Option<&SceneObject> {
        self.active.map(|id| &self.objects[id.0])
    }

    /// The active object, mutably.
    pub fn active_mut(&mut self) -> Option<&mut SceneObject> {
        self.active.map(|id| &mut self.objects[id.0])
    }

    /// The interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Switch interaction mode.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }
}
