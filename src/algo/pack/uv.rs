//! Per-loop UV storage.
//!
//! This module provides the [`LoopUvMap`] type, the packer's only output.

use std::collections::BTreeMap;

use nalgebra::Point2;

use super::LoopIndex;

/// UV coordinates keyed by loop index.
///
/// Loops are the per-corner vertex instances of a polygon, so a vertex shared
/// by two faces may carry two different UVs. Iteration is always in ascending
/// loop order, which keeps serialized output stable across runs.
///
/// # Example
///
/// ```
/// use tessera::algo::pack::LoopUvMap;
/// use nalgebra::Point2;
///
/// let mut uvs = LoopUvMap::new();
/// uvs.insert(7, Point2::new(0.25, 0.5));
/// assert_eq!(uvs.get(7), Some(Point2::new(0.25, 0.5)));
/// assert_eq!(uvs.get(8), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopUvMap {
    coords: BTreeMap<LoopIndex, Point2<f64>>,
}

impl LoopUvMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the UV for a loop, returning the previous value if there was one.
    #[inline]
    pub fn insert(&mut self, loop_index: LoopIndex, uv: Point2<f64>) -> Option<Point2<f64>> {
        self.coords.insert(loop_index, uv)
    }

    /// Get the UV for a loop.
    #[inline]
    pub fn get(&self, loop_index: LoopIndex) -> Option<Point2<f64>> {
        self.coords.get(&loop_index).copied()
    }

    /// Check whether a loop has a UV.
    #[inline]
    pub fn contains(&self, loop_index: LoopIndex) -> bool {
        self.coords.contains_key(&loop_index)
    }

    /// Number of loops with a UV.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterate over `(loop, uv)` pairs in ascending loop order.
    pub fn iter(&self) -> impl Iterator<Item = (LoopIndex, Point2<f64>)> + '_ {
        self.coords.iter().map(|(&l, &uv)| (l, uv))
    }

    /// Iterate over the loop indices in ascending order.
    pub fn loop_indices(&self) -> impl Iterator<Item = LoopIndex> + '_ {
        self.coords.keys().copied()
    }

    /// Compute the bounding box of the UV coordinates.
    ///
    /// Returns `None` if the map is empty.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let mut iter = self.coords.values();
        let first = *iter.next()?;
        let (mut min, mut max) = (first, first);

        for uv in iter {
            min.x = min.x.min(uv.x);
            min.y = min.y.min(uv.y);
            max.x = max.x.max(uv.x);
            max.y = max.y.max(uv.y);
        }

        Some((min, max))
    }
}

impl FromIterator<(LoopIndex, Point2<f64>)> for LoopUvMap {
    fn from_iter<T: IntoIterator<Item = (LoopIndex, Point2<f64>)>>(iter: T) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}
