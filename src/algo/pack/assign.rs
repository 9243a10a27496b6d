//! Random cell assignment.
//!
//! Every polygon is dropped into a uniformly random cell of the grid, one at
//! a time, after the input order has been shuffled. There is no balancing:
//! crowded and empty cells are part of the intended look.

use super::LayoutRng;

/// A `rows × cols` grid of cells, each holding polygon indices in the order
/// they were assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<usize>>,
}

impl CellGrid {
    /// Create an empty grid.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows. [`PackOptions::validate`] keeps
    /// packer grids far below that.
    ///
    /// [`PackOptions::validate`]: super::PackOptions::validate
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("grid {rows} x {cols} overflows"));
        Self {
            rows,
            cols,
            cells: vec![Vec::new(); len],
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Append a polygon to cell `(row, col)`.
    ///
    /// # Panics
    /// Panics if the cell is outside the grid.
    pub fn push(&mut self, row: usize, col: usize, polygon: usize) {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) outside grid");
        self.cells[row * self.cols + col].push(polygon);
    }

    /// Polygons assigned to cell `(row, col)`, in assignment order.
    ///
    /// # Panics
    /// Panics if the cell is outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> &[usize] {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) outside grid");
        &self.cells[row * self.cols + col]
    }

    /// Iterate over non-empty cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = ((usize, usize), &[usize])> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, polys)| !polys.is_empty())
            .map(move |(i, polys)| ((i / self.cols, i % self.cols), polys.as_slice()))
    }

    /// Number of non-empty cells.
    pub fn num_occupied(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Total number of assigned polygons.
    pub fn num_polygons(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

/// Shuffle `count` polygon indices and scatter them over a `rows × cols` grid.
///
/// For every polygon (in shuffled order) a row is drawn first, then a column.
///
/// # Example
///
/// ```
/// use tessera::algo::pack::assign_cells;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let grid = assign_cells(12, 5, 5, &mut rng);
/// assert_eq!(grid.num_polygons(), 12);
/// ```
pub fn assign_cells<R: LayoutRng + ?Sized>(
    count: usize,
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> CellGrid {
    let mut order: Vec<usize> = (0..count).collect();
    rng.shuffle_order(&mut order);

    let mut grid = CellGrid::new(rows, cols);
    for polygon in order {
        let row = rng.pick(rows);
        let col = rng.pick(cols);
        grid.push(row, col, polygon);
    }
    grid
}
