use derive_more::Deref;
use glam::UVec2;

/// Cells per sheet, `x` columns by `y` rows
pub const SHEET_CELLS: UVec2 = UVec2::new(4, 4);

/// The fixed cell layout of a sprite sheet.
///
/// `x` counts columns and `y` counts rows, so pixel math stays in the
/// horizontal, vertical order used everywhere else in the crate.
#[derive(Deref, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid(pub UVec2);

impl Default for Grid {
    fn default() -> Self {
        return Grid(SHEET_CELLS);
    }
}

impl Grid {
    /// Size of one tile. Remainder pixels on the right and bottom edges are
    /// dropped.
    pub fn tile_size(&self, sheet_dims: UVec2) -> UVec2 {
        return sheet_dims / self.0;
    }

    /// Pixel offset of the top left corner of the cell at `row`, `col`.
    /// `None` when the offset does not fit in a `u32`.
    pub fn offset(tile_size: UVec2, row: u32, col: u32) -> Option<UVec2> {
        return Some(UVec2 {
            x: col.checked_mul(tile_size.x)?,
            y: row.checked_mul(tile_size.y)?,
        });
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        return row < self.y && col < self.x;
    }

    /// Cells in row major order, as `(col, row)`
    pub fn iter_cells(&self) -> impl Iterator<Item = UVec2> {
        let dims = self.0;
        (0..dims.y).flat_map(move |y| (0..dims.x).map(move |x| UVec2 { x, y }))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tile_size_floors() {
        let grid = Grid::default();
        assert_eq!(grid.tile_size(UVec2::new(800, 800)), UVec2::new(200, 200));
        assert_eq!(grid.tile_size(UVec2::new(803, 606)), UVec2::new(200, 151));
        assert_eq!(grid.tile_size(UVec2::new(3, 3)), UVec2::ZERO);
    }

    #[test]
    fn offset_is_col_by_width_and_row_by_height() {
        let tile = UVec2::new(200, 150);
        assert_eq!(Grid::offset(tile, 0, 0), Some(UVec2::ZERO));
        assert_eq!(Grid::offset(tile, 1, 2), Some(UVec2::new(400, 150)));
        assert_eq!(Grid::offset(tile, 3, 3), Some(UVec2::new(600, 450)));
    }

    #[test]
    fn offset_overflow_is_none() {
        let tile = UVec2::new(200, 150);
        assert_eq!(Grid::offset(tile, u32::MAX, 0), None);
        assert_eq!(Grid::offset(tile, 0, u32::MAX), None);
        // past the grid but still representable
        assert_eq!(Grid::offset(tile, 7, 0), Some(UVec2::new(0, 1050)));
        assert_eq!(Grid::offset(UVec2::ZERO, u32::MAX, u32::MAX), Some(UVec2::ZERO));
    }

    #[test]
    fn cells() {
        let grid = Grid::default();
        let cells: Vec<UVec2> = grid.iter_cells().collect();
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0], UVec2::new(0, 0));
        assert_eq!(cells[1], UVec2::new(1, 0));
        assert_eq!(cells[4], UVec2::new(0, 1));
        assert!(grid.contains(3, 3));
        assert!(!grid.contains(4, 0));
        assert!(!grid.contains(0, 4));
    }
}
