//! Randomized grid UV packing.
//!
//! Repeating a facade texture across many windows produces an obviously
//! periodic look. The packer breaks that up by scattering the selected faces
//! over a grid of atlas cells at random:
//!
//! 1. **Assignment** ([`assign_cells`]): shuffle the faces, then drop each one
//!    into a uniformly random cell. Cells may stay empty or fill up.
//! 2. **Sub-tiling** ([`CellLayout`]): a cell with `n` faces is split into
//!    `ceil(sqrt(n))²` sub-cells, filled row-major.
//! 3. **Projection** ([`project_polygon`], [`fit_into_slot`]): each face is
//!    flattened into a tangent frame around world up and scaled into its
//!    sub-cell, keeping its aspect ratio.
//!
//! All randomness comes from the caller, so a seeded generator gives the same
//! layout every time.
//!
//! # Example
//!
//! ```
//! use tessera::algo::pack::{pack, Corner, PackOptions, Polygon};
//! use nalgebra::{Point3, Vector3};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let window = Polygon::new(
//!     Vector3::new(0.0, -1.0, 0.0),
//!     vec![
//!         Corner::new(0, Point3::new(0.0, 0.0, 0.0)),
//!         Corner::new(1, Point3::new(1.0, 0.0, 0.0)),
//!         Corner::new(2, Point3::new(1.0, 0.0, 2.0)),
//!         Corner::new(3, Point3::new(0.0, 0.0, 2.0)),
//!     ],
//! );
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(3);
//! let uvs = pack(&[window], &PackOptions::default(), &mut rng).unwrap();
//! assert_eq!(uvs.len(), 4);
//! ```

mod assign;
mod project;
mod tiling;
mod uv;

use std::collections::HashSet;

use nalgebra::{Point2, Point3, Vector2, Vector3};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PackError, Result};

pub use assign::{assign_cells, CellGrid};
pub use project::{
    aspect_footprint, fit_into_slot, project_polygon, FrameKind, Projected, TangentFrame,
};
pub use tiling::{layout_cells, slot_position, subdivision, CellLayout, SubcellSlot};
pub use uv::LoopUvMap;

/// Identifier of a polygon corner (a mesh loop).
pub type LoopIndex = u32;

/// One corner of a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Where the UV for this corner is written.
    pub loop_index: LoopIndex,
    /// World-space position.
    pub position: Point3<f64>,
}

impl Corner {
    /// Create a corner.
    pub fn new(loop_index: LoopIndex, position: Point3<f64>) -> Self {
        Self {
            loop_index,
            position,
        }
    }
}

/// A face to be packed.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Face normal; need not be unit length.
    pub normal: Vector3<f64>,
    /// Corners in winding order.
    pub corners: Vec<Corner>,
}

impl Polygon {
    /// Create a polygon.
    pub fn new(normal: Vector3<f64>, corners: Vec<Corner>) -> Self {
        Self { normal, corners }
    }
}

/// Largest grid, in cells, that [`PackOptions::validate`] accepts.
pub const MAX_CELLS: usize = 1 << 20;

/// Options for grid packing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackOptions {
    /// Grid rows.
    pub rows: usize,

    /// Grid columns.
    pub cols: usize,

    /// Edge length of one grid cell in UV space.
    pub scale_uv: f64,

    /// Fraction of a cell given up as margin before sub-division.
    pub cell_padding: f64,

    /// Fraction of each sub-cell given up as margin.
    pub subcell_padding: f64,

    /// Whether to project polygons in parallel (default: true).
    ///
    /// Output is identical either way.
    pub parallel: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            scale_uv: 0.2,
            cell_padding: 0.02,
            subcell_padding: 0.05,
            parallel: true,
        }
    }
}

impl PackOptions {
    /// Set the grid dimensions.
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Set the cell edge length.
    pub fn with_scale_uv(mut self, scale_uv: f64) -> Self {
        self.scale_uv = scale_uv;
        self
    }

    /// Set the per-cell padding fraction.
    pub fn with_cell_padding(mut self, padding: f64) -> Self {
        self.cell_padding = padding;
        self
    }

    /// Set the per-sub-cell padding fraction.
    pub fn with_subcell_padding(mut self, padding: f64) -> Self {
        self.subcell_padding = padding;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Number of cells in the grid, saturating on overflow.
    pub fn num_cells(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// The UV rectangle covered by the whole grid, as `(width, height)`.
    pub fn grid_extent(&self) -> Vector2<f64> {
        Vector2::new(
            self.cols as f64 * self.scale_uv,
            self.rows as f64 * self.scale_uv,
        )
    }

    /// Check that the options describe a usable grid.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(PackError::invalid_param("rows", self.rows, "must be at least 1"));
        }
        if self.cols == 0 {
            return Err(PackError::invalid_param("cols", self.cols, "must be at least 1"));
        }
        match self.rows.checked_mul(self.cols) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(PackError::invalid_param(
                    "rows * cols",
                    format!("{} * {}", self.rows, self.cols),
                    "grid exceeds MAX_CELLS cells",
                ));
            }
        }
        if !(self.scale_uv.is_finite() && self.scale_uv > 0.0) {
            return Err(PackError::invalid_param(
                "scale_uv",
                self.scale_uv,
                "must be positive and finite",
            ));
        }
        for (name, value) in [
            ("cell_padding", self.cell_padding),
            ("subcell_padding", self.subcell_padding),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(PackError::invalid_param(name, value, "must be in [0, 1)"));
            }
        }
        Ok(())
    }
}

/// Source of randomness for cell assignment.
///
/// Implemented for every [`rand::Rng`]. Tests may implement it directly to
/// script an exact layout.
pub trait LayoutRng {
    /// Permute `order` in place.
    fn shuffle_order(&mut self, order: &mut [usize]);

    /// Uniform integer in `[0, bound)`. `bound` is never zero.
    fn pick(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> LayoutRng for R {
    fn shuffle_order(&mut self, order: &mut [usize]) {
        order.shuffle(self);
    }

    fn pick(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Where one polygon ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Index of the polygon in the input list.
    pub polygon: usize,
    /// The sub-cell it was given.
    pub slot: SubcellSlot,
    /// Size of its UV footprint (`eff_x`, `eff_y`).
    pub footprint: Vector2<f64>,
    /// The projection used.
    pub frame: FrameKind,
}

/// Result of [`pack_with_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct PackOutput {
    /// UV per input loop.
    pub uvs: LoopUvMap,
    /// One placement per input polygon, in input order.
    pub placements: Vec<Placement>,
}

impl PackOutput {
    /// Number of grid cells that received at least one polygon.
    pub fn occupied_cells(&self) -> usize {
        self.placements
            .iter()
            .map(|p| p.slot.cell)
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Pack polygons into a randomized grid and return a UV per loop.
///
/// # Errors
///
/// Returns an error if:
/// - the options are invalid ([`PackOptions::validate`])
/// - a polygon has no corners
/// - a loop index appears more than once
///
/// Nothing is computed before these checks pass.
pub fn pack<R: LayoutRng + ?Sized>(
    polygons: &[Polygon],
    options: &PackOptions,
    rng: &mut R,
) -> Result<LoopUvMap> {
    pack_with_layout(polygons, options, rng).map(|out| out.uvs)
}

/// Like [`pack`], also reporting where each polygon was placed.
pub fn pack_with_layout<R: LayoutRng + ?Sized>(
    polygons: &[Polygon],
    options: &PackOptions,
    rng: &mut R,
) -> Result<PackOutput> {
    options.validate()?;
    check_polygons(polygons)?;

    let grid = assign_cells(polygons.len(), options.rows, options.cols, rng);
    let slots = layout_cells(&grid, options);

    let fit_one = |&(index, slot): &(usize, SubcellSlot)| {
        let projected = project_polygon(&polygons[index]);
        let (uvs, footprint) = fit_into_slot(&projected, &slot);
        let placement = Placement {
            polygon: index,
            slot,
            footprint,
            frame: projected.kind,
        };
        (placement, uvs)
    };

    let fitted: Vec<(Placement, Vec<Point2<f64>>)> = if options.parallel {
        slots.par_iter().map(fit_one).collect()
    } else {
        slots.iter().map(fit_one).collect()
    };

    let mut uvs = LoopUvMap::new();
    let mut placements = Vec::with_capacity(fitted.len());
    for (placement, coords) in fitted {
        if placement.frame == FrameKind::TopDown {
            log::warn!(
                "polygon {} has a vertical or zero normal, projecting top-down",
                placement.polygon
            );
        }
        for (corner, uv) in polygons[placement.polygon].corners.iter().zip(coords) {
            uvs.insert(corner.loop_index, uv);
        }
        placements.push(placement);
    }

    log::debug!(
        "packed {} polygons ({} loops) into {} of {} cells",
        polygons.len(),
        uvs.len(),
        grid.num_occupied(),
        options.num_cells()
    );

    Ok(PackOutput { uvs, placements })
}

/// Reject input that would leave loops unwritten or written twice.
fn check_polygons(polygons: &[Polygon]) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, polygon) in polygons.iter().enumerate() {
        if polygon.corners.is_empty() {
            return Err(PackError::EmptyPolygon { polygon: index });
        }
        for corner in &polygon.corners {
            if !seen.insert(corner.loop_index) {
                return Err(PackError::DuplicateLoop {
                    loop_index: corner.loop_index,
                    polygon: index,
                });
            }
        }
    }
    Ok(())
}
