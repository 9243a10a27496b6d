//! Sub-tiling of crowded cells.
//!
//! A cell holding `n` polygons is split into the smallest square grid of
//! `subdiv × subdiv` sub-cells with `subdiv² ≥ n`. Polygons fill sub-cells in
//! row-major order; trailing sub-cells stay empty.
//!
//! The cell padding is scaled by `1 / subdiv` and carved out of the first
//! sub-cell's slot. This is an approximation of a true per-cell margin and is
//! kept as-is so existing atlases line up.

use nalgebra::Point2;

use super::assign::CellGrid;
use super::PackOptions;

/// Smallest `s` with `s * s >= n`.
///
/// Equivalent to `ceil(sqrt(n))` without floating point.
///
/// ```
/// use tessera::algo::pack::subdivision;
///
/// assert_eq!(subdivision(1), 1);
/// assert_eq!(subdivision(4), 2);
/// assert_eq!(subdivision(7), 3);
/// ```
pub fn subdivision(n: usize) -> usize {
    let mut s = 0;
    while s * s < n {
        s += 1;
    }
    s
}

/// Sub-cell `(row, col)` for the `index`-th polygon of a cell.
#[inline]
pub fn slot_position(index: usize, subdiv: usize) -> (usize, usize) {
    (index / subdiv, index % subdiv)
}

/// The sub-cell a polygon was given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubcellSlot {
    /// Grid cell `(row, col)`.
    pub cell: (usize, usize),
    /// Sub-cell `(row, col)` inside the cell.
    pub slot: (usize, usize),
    /// Sub-cells per side in this cell.
    pub subdiv: usize,
    /// Lower-left UV corner of the usable area.
    pub origin: Point2<f64>,
    /// Edge length of the usable area.
    pub size: f64,
}

/// Geometry of one occupied cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    /// Grid cell `(row, col)`.
    pub cell: (usize, usize),
    /// Sub-cells per side.
    pub subdiv: usize,
    /// Step between neighbouring sub-cells.
    pub subcell_size: f64,
    /// UV offset of the first sub-cell, padding included.
    pub offset: Point2<f64>,
    subcell_padding: f64,
}

impl CellLayout {
    /// Lay out cell `(row, col)` for `count` polygons.
    pub fn new(row: usize, col: usize, count: usize, options: &PackOptions) -> Self {
        let subdiv = subdivision(count).max(1);
        let step = options.scale_uv / subdiv as f64;
        let margin = step * options.cell_padding / 2.0;

        Self {
            cell: (row, col),
            subdiv,
            subcell_size: step * (1.0 - options.cell_padding),
            offset: Point2::new(
                col as f64 * options.scale_uv + margin,
                row as f64 * options.scale_uv + margin,
            ),
            subcell_padding: options.subcell_padding,
        }
    }

    /// Edge length left for a polygon once the sub-cell padding is removed.
    #[inline]
    pub fn effective_size(&self) -> f64 {
        self.subcell_size * (1.0 - self.subcell_padding)
    }

    /// The slot for the `index`-th polygon of this cell.
    pub fn slot(&self, index: usize) -> SubcellSlot {
        let (row, col) = slot_position(index, self.subdiv);
        let inset = self.subcell_size * self.subcell_padding / 2.0;

        SubcellSlot {
            cell: self.cell,
            slot: (row, col),
            subdiv: self.subdiv,
            origin: Point2::new(
                self.offset.x + col as f64 * self.subcell_size + inset,
                self.offset.y + row as f64 * self.subcell_size + inset,
            ),
            size: self.effective_size(),
        }
    }
}

/// Give every assigned polygon its sub-cell.
///
/// Returns `(polygon, slot)` pairs sorted by polygon index.
pub fn layout_cells(grid: &CellGrid, options: &PackOptions) -> Vec<(usize, SubcellSlot)> {
    let mut slots = Vec::with_capacity(grid.num_polygons());

    for ((row, col), polygons) in grid.occupied() {
        let layout = CellLayout::new(row, col, polygons.len(), options);
        for (index, &polygon) in polygons.iter().enumerate() {
            slots.push((polygon, layout.slot(index)));
        }
    }

    slots.sort_unstable_by_key(|&(polygon, _)| polygon);
    slots
}
