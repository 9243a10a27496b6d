//! Per-vertex and per-loop data layers: vertex groups and UV layers.

use std::collections::BTreeMap;

use nalgebra::Point2;

use super::index::{LoopId, VertexId};

/// A named set of vertices with weights.
///
/// Only membership matters for face selection; the weight is carried along
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexGroup {
    name: String,
    weights: BTreeMap<VertexId, f32>,
}

impl VertexGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weights: BTreeMap::new(),
        }
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a vertex (or update its weight).
    pub fn assign(&mut self, vertex: VertexId, weight: f32) {
        self.weights.insert(vertex, weight);
    }

    /// Add several vertices with the same weight.
    pub fn assign_all<I: IntoIterator<Item = VertexId>>(&mut self, vertices: I, weight: f32) {
        for v in vertices {
            self.assign(v, weight);
        }
    }

    /// Remove a vertex from the group.
    pub fn remove(&mut self, vertex: VertexId) -> Option<f32> {
        self.weights.remove(&vertex)
    }

    /// Whether the vertex belongs to the group.
    #[inline]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.weights.contains_key(&vertex)
    }

    /// The vertex weight, if it belongs to the group.
    pub fn weight(&self, vertex: VertexId) -> Option<f32> {
        self.weights.get(&vertex).copied()
    }

    /// Number of member vertices.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// A named set of UV coordinates, one per loop.
#[derive(Debug, Clone, PartialEq)]
pub struct UvLayer {
    name: String,
    coords: Vec<Point2<f64>>,
}

impl UvLayer {
    /// Create a layer with every loop at the origin.
    pub fn new(name: impl Into<String>, num_loops: usize) -> Self {
        Self {
            name: name.into(),
            coords: vec![Point2::origin(); num_loops],
        }
    }

    /// The layer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the UV of a loop.
    #[inline]
    pub fn get(&self, l: LoopId) -> Point2<f64> {
        self.coords[l.index()]
    }

    /// Set the UV of a loop.
    #[inline]
    pub fn set(&mut self, l: LoopId, uv: Point2<f64>) {
        self.coords[l.index()] = uv;
    }

    /// Number of loops.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Get the raw coordinates slice.
    pub fn as_slice(&self) -> &[Point2<f64>] {
        &self.coords
    }
}
