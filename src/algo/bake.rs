//! Window UV baking on the active scene object.
//!
//! This is the boundary between the host scene and the pure packer:
//!
//! 1. check that the scene is in a state where mesh data can be read
//!    (object mode, an active mesh object, the vertex group present and
//!    selecting at least one face);
//! 2. turn every face lying fully inside the vertex group into a
//!    world-space [`Polygon`];
//! 3. run [`pack_with_layout`] and write the result into a UV layer in one
//!    pass.
//!
//! Any failure in steps 1 and 2 leaves the scene untouched.

use nalgebra::Point3;

use crate::error::{PackError, Result};
use crate::mesh::{newell_normal, LoopId, PolyMesh};
use crate::scene::{InteractionMode, Scene, SceneObject};

use super::pack::{pack_with_layout, Corner, FrameKind, LayoutRng, PackOptions, Polygon};

/// Which faces to bake and where the UVs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakeOptions {
    /// Vertex group tagging the window faces.
    pub group: String,

    /// UV layer to write; created if the mesh does not have it.
    pub uv_layer: String,
}

impl Default for BakeOptions {
    fn default() -> Self {
        Self {
            group: "Windows".to_string(),
            uv_layer: "UVMap".to_string(),
        }
    }
}

impl BakeOptions {
    /// Set the vertex group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the target UV layer.
    pub fn with_uv_layer(mut self, layer: impl Into<String>) -> Self {
        self.uv_layer = layer.into();
        self
    }
}

/// Summary of a finished bake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakeReport {
    /// Name of the baked object.
    pub object: String,
    /// Faces packed.
    pub faces: usize,
    /// Loops written.
    pub loops: usize,
    /// Grid cells that received at least one face.
    pub occupied_cells: usize,
    /// Faces that needed the top-down projection.
    pub top_down_faces: usize,
    /// UV layer written.
    pub uv_layer: String,
}

/// The active object and its mesh, if the scene allows reading it.
fn active_mesh(scene: &Scene) -> Result<(&SceneObject, &PolyMesh)> {
    if scene.mode() != InteractionMode::Object {
        return Err(PackError::WrongMode {
            expected: InteractionMode::Object,
            found: scene.mode(),
        });
    }
    let object = scene.active().ok_or(PackError::NoActiveObject)?;
    let mesh = object.as_mesh().ok_or_else(|| PackError::NotAMesh {
        name: object.name.clone(),
        kind: object.data.kind(),
    })?;
    Ok((object, mesh))
}

/// Collect the faces of the active object's `group` as world-space polygons.
///
/// Loop indices are the mesh's own loop ids, so the packer output can be
/// written straight back into a UV layer.
///
/// # Errors
///
/// Precondition errors, checked in this order: [`PackError::WrongMode`],
/// [`PackError::NoActiveObject`], [`PackError::NotAMesh`],
/// [`PackError::MissingVertexGroup`], [`PackError::EmptySelection`].
pub fn collect_group_polygons(scene: &Scene, group: &str) -> Result<Vec<Polygon>> {
    let (object, mesh) = active_mesh(scene)?;

    let vertex_group = mesh
        .vertex_group(group)
        .ok_or_else(|| PackError::MissingVertexGroup {
            object: object.name.clone(),
            group: group.to_string(),
        })?;

    let faces = mesh.faces_in_group(vertex_group);
    if faces.is_empty() {
        return Err(PackError::EmptySelection {
            object: object.name.clone(),
            group: group.to_string(),
        });
    }

    let polygons = faces
        .into_iter()
        .map(|f| {
            let corners: Vec<Corner> = mesh
                .face_loops(f)
                .map(|l| Corner::new(l.raw(), object.to_world(mesh.position(mesh.loop_vertex(l)))))
                .collect();
            let positions: Vec<Point3<f64>> = corners.iter().map(|c| c.position).collect();
            Polygon::new(newell_normal(&positions), corners)
        })
        .collect();

    Ok(polygons)
}

/// Re-pack the UVs of the active object's window faces.
///
/// Loops outside the group keep whatever UV they had.
///
/// # Example
///
/// ```
/// use tessera::algo::bake::{bake_window_uvs, BakeOptions};
/// use tessera::algo::pack::PackOptions;
/// use tessera::mesh::{PolyMesh, VertexId};
/// use tessera::scene::{Scene, SceneObject};
/// use nalgebra::Point3;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 2.0),
///     Point3::new(0.0, 0.0, 2.0),
/// ];
/// let mut mesh = PolyMesh::from_polygons(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
/// mesh.vertex_group_mut("Windows").assign_all((0..4).map(VertexId::new), 1.0);
///
/// let mut scene = Scene::new();
/// let id = scene.add(SceneObject::mesh("Facade", mesh));
/// scene.set_active(Some(id));
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let (bake, options) = (BakeOptions::default(), PackOptions::default());
/// let report = bake_window_uvs(&mut scene, &bake, &options, &mut rng).unwrap();
/// assert_eq!(report.loops, 4);
/// ```
pub fn bake_window_uvs<R: LayoutRng + ?Sized>(
    scene: &mut Scene,
    bake: &BakeOptions,
    options: &PackOptions,
    rng: &mut R,
) -> Result<BakeReport> {
    let polygons = collect_group_polygons(scene, &bake.group)?;
    let output = pack_with_layout(&polygons, options, rng)?;

    let object = scene.active_mut().ok_or(PackError::NoActiveObject)?;
    let name = object.name.clone();
    let kind = object.data.kind();
    let mesh = object.as_mesh_mut().ok_or_else(|| PackError::NotAMesh {
        name: name.clone(),
        kind,
    })?;

    let layer = mesh.uv_layer_mut(&bake.uv_layer);
    for (l, uv) in output.uvs.iter() {
        layer.set(LoopId::new(l as usize), uv);
    }

    let report = BakeReport {
        object: name,
        faces: polygons.len(),
        loops: output.uvs.len(),
        occupied_cells: output.occupied_cells(),
        top_down_faces: output
            .placements
            .iter()
            .filter(|p| p.frame == FrameKind::TopDown)
            .count(),
        uv_layer: bake.uv_layer.clone(),
    };

    log::info!(
        "baked {} window faces of '{}' into {} cells of layer '{}'",
        report.faces,
        report.object,
        report.occupied_cells,
        report.uv_layer
    );

    Ok(report)
}
