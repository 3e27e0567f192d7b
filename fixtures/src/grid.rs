//! Grid accumulation fixtures
//!
//! A nested loop whose per-cell work is a single increment. The call to the
//! helper costs more than the work it does, which makes this the stress
//! case for call-overhead amortization.

/// Default number of rows and columns in the grid.
pub const DEFAULT_GRID_SIDE: usize = 200;

/// Row and column counts for a grid pass.
///
/// Iteration is always row-major: `i` over rows outside, `j` over columns
/// inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub rows: usize,
    pub cols: usize,
}

impl GridBounds {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Square grid with `side` rows and columns.
    pub const fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// Number of cells visited by a pass; `None` if it overflows `usize`.
    pub const fn cells(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Whether the total of a pass over these bounds fits in `i64`.
    pub fn fits(&self) -> bool {
        grid_closed_form(*self).is_some()
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIDE)
    }
}

/// Add one. Never inlined, so each grid cell pays a real call.
#[inline(never)]
pub fn increment(a: i64) -> i64 {
    a + 1
}

/// Add one. Always inlined; the counterpart to [`increment`].
#[inline(always)]
pub fn increment_inline(a: i64) -> i64 {
    a + 1
}

/// Sum `cell(i * j)` over the grid in row-major order.
///
/// Bounds are expected to satisfy [`GridBounds::fits`]. Larger grids
/// overflow the `i64` total.
#[inline(never)]
pub fn grid_accumulate_with<F>(bounds: GridBounds, cell: F) -> i64
where
    F: Fn(i64) -> i64,
{
    let rows = i64::try_from(bounds.rows).unwrap_or(i64::MAX);
    let cols = i64::try_from(bounds.cols).unwrap_or(i64::MAX);

    let mut total: i64 = 0;
    for i in 0..rows {
        for j in 0..cols {
            total += cell(i * j);
        }
    }
    total
}

/// Sum `increment(i * j)` over the grid.
///
/// # Test Cases
/// - grid_accumulate(0x0) = 0
/// - grid_accumulate(1x1) = 1
/// - grid_accumulate(2x3) = 9
pub fn grid_accumulate(bounds: GridBounds) -> i64 {
    grid_accumulate_with(bounds, increment)
}

/// The fixed 200x200 grid pass.
///
/// # Test Cases
/// - process_data_grid() = 396050000
pub fn process_data_grid() -> i64 {
    grid_accumulate(GridBounds::default())
}

/// Closed form of [`grid_accumulate`]: `(sum i) * (sum j) + rows * cols`.
///
/// Returns `None` when the total does not fit in `i64`.
pub fn grid_closed_form(bounds: GridBounds) -> Option<i64> {
    let tri = |n: u128| n * n.saturating_sub(1) / 2;
    let rows = bounds.rows as u128;
    let cols = bounds.cols as u128;
    let total = tri(rows)
        .checked_mul(tri(cols))?
        .checked_add(rows.checked_mul(cols)?)?;
    i64::try_from(total).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        assert_eq!(process_data_grid(), 396_050_000);
        assert_eq!(process_data_grid(), process_data_grid());
    }

    #[test]
    fn test_small_grids() {
        assert_eq!(grid_accumulate(GridBounds::square(0)), 0);
        assert_eq!(grid_accumulate(GridBounds::square(1)), 1);
        // products: 0 0 0 / 0 1 2 -> 3 + 6 cells
        assert_eq!(grid_accumulate(GridBounds::new(2, 3)), 9);
        assert_eq!(grid_accumulate(GridBounds::new(5, 0)), 0);
    }

    #[test]
    fn test_closed_form_matches() {
        for (rows, cols) in [(0, 4), (1, 1), (3, 7), (17, 9), (200, 200)] {
            let bounds = GridBounds::new(rows, cols);
            assert_eq!(Some(grid_accumulate(bounds)), grid_closed_form(bounds));
        }
    }

    #[test]
    fn test_inline_helper_same_result() {
        let bounds = GridBounds::new(31, 44);
        assert_eq!(
            grid_accumulate_with(bounds, increment),
            grid_accumulate_with(bounds, increment_inline)
        );
    }

    #[test]
    fn test_cells() {
        assert_eq!(GridBounds::default().cells(), Some(40_000));
        assert_eq!(GridBounds::new(usize::MAX, 2).cells(), None);
    }

    #[test]
    fn test_oversized_bounds_do_not_fit() {
        assert!(GridBounds::default().fits());
        assert!(GridBounds::new(usize::MAX, 0).fits());
        assert!(!GridBounds::new(usize::MAX, 3).fits());
        assert!(!GridBounds::square(4_000_000_000).fits());
        assert_eq!(grid_closed_form(GridBounds::new(usize::MAX, usize::MAX)), None);
    }

    #[test]
    fn test_fit_boundary() {
        // 1 x n is just n cells of value 1
        assert_eq!(
            grid_closed_form(GridBounds::new(1, i64::MAX as usize)),
            Some(i64::MAX)
        );
        assert_eq!(grid_closed_form(GridBounds::new(1, i64::MAX as usize + 1)), None);
    }
}
