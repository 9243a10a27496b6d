//! Polygon mesh with per-corner loops.
//!
//! Faces are stored as contiguous runs of loops. Each loop points at one
//! vertex, so a vertex shared by several faces has one loop per face and can
//! carry a different UV on each.

use std::ops::Range;

use nalgebra::{Point3, Vector3};

use super::index::{FaceId, LoopId, VertexId};
use super::layers::{UvLayer, VertexGroup};
use crate::error::{PackError, Result};

/// An n-gon mesh with vertex groups and UV layers.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyMesh {
    positions: Vec<Point3<f64>>,
    /// Loop start of each face, plus one trailing entry.
    face_starts: Vec<u32>,
    loop_vertices: Vec<VertexId>,
    groups: Vec<VertexGroup>,
    uv_layers: Vec<UvLayer>,
}

impl PolyMesh {
    /// Build a mesh from vertex positions and polygon faces.
    ///
    /// Loops are numbered in face order, so face `f`'s corners get
    /// consecutive loop ids.
    ///
    /// # Errors
    /// Returns an error if a face has fewer than three corners or references
    /// a vertex that does not exist.
    ///
    /// # Example
    /// ```
    /// use tessera::mesh::{FaceId, PolyMesh};
    /// use nalgebra::Point3;
    ///
    /// let vertices = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 1.0),
    ///     Point3::new(0.0, 0.0, 1.0),
    /// ];
    /// let mesh = PolyMesh::from_polygons(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
    /// assert_eq!(mesh.num_loops(), 4);
    /// assert_eq!(mesh.face_loops(FaceId::new(0)).count(), 4);
    /// ```
    pub fn from_polygons(vertices: &[Point3<f64>], faces: &[Vec<usize>]) -> Result<Self> {
        let mut face_starts = Vec::with_capacity(faces.len() + 1);
        let mut loop_vertices = Vec::new();

        for (fi, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(PackError::InvalidFace {
                    face: fi,
                    corners: face.len(),
                });
            }
            face_starts.push(loop_vertices.len() as u32);
            for &vi in face {
                if vi >= vertices.len() {
                    return Err(PackError::InvalidVertexIndex { face: fi, vertex: vi });
                }
                loop_vertices.push(VertexId::new(vi));
            }
        }
        face_starts.push(loop_vertices.len() as u32);

        Ok(Self {
            positions: vertices.to_vec(),
            face_starts,
            loop_vertices,
            groups: Vec::new(),
            uv_layers: Vec::new(),
        })
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.face_starts.len() - 1
    }

    /// Number of loops (face corners).
    pub fn num_loops(&self) -> usize {
        self.loop_vertices.len()
    }

    /// Vertex position in object space.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// Iterate over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> {
        (0..self.num_faces()).map(FaceId::new)
    }

    fn loop_range(&self, f: FaceId) -> Range<usize> {
        self.face_starts[f.index()] as usize..self.face_starts[f.index() + 1] as usize
    }

    /// Loops of a face in winding order.
    pub fn face_loops(&self, f: FaceId) -> impl Iterator<Item = LoopId> {
        self.loop_range(f).map(LoopId::new)
    }

    /// Vertices of a face in winding order.
    pub fn face_vertices(&self, f: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        self.loop_vertices[self.loop_range(f)].iter().copied()
    }

    /// The vertex a loop belongs to.
    #[inline]
    pub fn loop_vertex(&self, l: LoopId) -> VertexId {
        self.loop_vertices[l.index()]
    }

    /// Unit face normal in object space (zero for a degenerate face).
    pub fn face_normal(&self, f: FaceId) -> Vector3<f64> {
        let points: Vec<Point3<f64>> = self.face_vertices(f).map(|v| *self.position(v)).collect();
        newell_normal(&points)
    }

    // ---- vertex groups ----

    /// All vertex groups.
    pub fn vertex_groups(&self) -> &[VertexGroup] {
        &self.groups
    }

    /// Look up a vertex group by name.
    pub fn vertex_group(&self, name: &str) -> Option<&VertexGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Get a group by name, creating it if needed.
    pub fn vertex_group_mut(&mut self, name: &str) -> &mut VertexGroup {
        let index = match self.groups.iter().position(|g| g.name() == name) {
            Some(i) => i,
            None => {
                self.groups.push(VertexGroup::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// Faces whose every vertex belongs to `group`, in face order.
    pub fn faces_in_group(&self, group: &VertexGroup) -> Vec<FaceId> {
        self.face_ids()
            .filter(|&f| self.face_vertices(f).all(|v| group.contains(v)))
            .collect()
    }

    // ---- uv layers ----

    /// All UV layers.
    pub fn uv_layers(&self) -> &[UvLayer] {
        &self.uv_layers
    }

    /// Look up a UV layer by name.
    pub fn uv_layer(&self, name: &str) -> Option<&UvLayer> {
        self.uv_layers.iter().find(|l| l.name() == name)
    }

    /// Get a UV layer by name, creating it (all zeros) if needed.
    pub fn uv_layer_mut(&mut self, name: &str) -> &mut UvLayer {
        let index = match self.uv_layers.iter().position(|l| l.name() == name) {
            Some(i) => i,
            None => {
                self.uv_layers.push(UvLayer::new(name, self.num_loops()));
                self.uv_layers.len() - 1
            }
        };
        &mut self.uv_layers[index]
    }
}

/// Polygon normal by Newell's method, normalized.
///
/// Works for non-planar and concave polygons. Returns zero when the polygon
/// has no area.
pub fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut n = Vector3::zeros();
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n.try_normalize(1e-300).unwrap_or_else(Vector3::zeros)
}
