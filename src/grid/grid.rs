use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

/// Brush intensity of a single cell.
///
/// Variants are ordered so that `max` raises a cell toward `Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Intensity {
    #[default]
    Off,
    Half,
    Full,
}

impl Intensity {
    /// Continuous value of the cell: 0, 0.5 or 1.
    pub fn value(self) -> f64 {
        match self {
            Intensity::Off  => 0.0,
            Intensity::Half => 0.5,
            Intensity::Full => 1.0,
        }
    }

    /// 8-bit pixel value the prediction service expects.
    pub fn pixel(self) -> u8 {
        match self {
            Intensity::Off  => 0,
            Intensity::Half => 128,
            Intensity::Full => 255,
        }
    }
}

/// Square drawing surface of `size × size` cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Intensity>,
}

impl Grid {
    /// Creates a zero-filled grid.
    pub fn new(size: usize) -> Grid {
        Grid { size, cells: vec![Intensity::Off; size * size] }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Intensity {
        self.cells[row * self.size + col]
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Intensity] {
        &self.cells
    }

    /// Paints one brush dab centred on `(row, col)`.
    ///
    /// The centre becomes `Full`; the four axis-aligned neighbours that lie
    /// inside the grid are raised to at least `Half`. No cell is ever lowered
    /// and diagonal neighbours are left alone.
    ///
    /// # Panics
    /// Panics if `(row, col)` lies outside the grid. Callers check
    /// [`Grid::contains`] first.
    pub fn apply_brush(&mut self, row: usize, col: usize) {
        assert!(self.contains(row, col), "brush at ({}, {}) outside {}x{} grid", row, col, self.size, self.size);

        self.raise(row, col, Intensity::Full);
        if row > 0 {
            self.raise(row - 1, col, Intensity::Half);
        }
        if row + 1 < self.size {
            self.raise(row + 1, col, Intensity::Half);
        }
        if col > 0 {
            self.raise(row, col - 1, Intensity::Half);
        }
        if col + 1 < self.size {
            self.raise(row, col + 1, Intensity::Half);
        }
    }

    fn raise(&mut self, row: usize, col: usize, to: Intensity) {
        let cell = &mut self.cells[row * self.size + col];
        *cell = (*cell).max(to);
    }

    /// Clears every cell back to `Off`.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Intensity::Off);
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == Intensity::Off)
    }

    /// Flattens the grid row-major and maps `1 → 255`, `0.5 → 128`, `0 → 0`.
    pub fn quantize(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.pixel()).collect()
    }

    /// Encodes the quantized grid as an 8-bit grayscale PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let pixels = self.quantize();
        let side = self.size as u32;
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(&pixels, side, side, ColorType::L8)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_sets_centre_and_axis_neighbours() {
        let mut grid = Grid::new(28);
        grid.apply_brush(5, 5);

        assert_eq!(grid.get(5, 5), Intensity::Full);
        for (r, c) in [(4, 5), (6, 5), (5, 4), (5, 6)] {
            assert_eq!(grid.get(r, c), Intensity::Half, "neighbour ({}, {})", r, c);
        }
        for (r, c) in [(4, 4), (4, 6), (6, 4), (6, 6)] {
            assert_eq!(grid.get(r, c), Intensity::Off, "diagonal ({}, {})", r, c);
        }
        let lit = grid.cells().iter().filter(|&&c| c != Intensity::Off).count();
        assert_eq!(lit, 5);
    }

    #[test]
    fn brush_in_corner_stays_in_bounds() {
        let mut grid = Grid::new(28);
        grid.apply_brush(0, 0);
        grid.apply_brush(27, 27);

        assert_eq!(grid.get(0, 0), Intensity::Full);
        assert_eq!(grid.get(0, 1), Intensity::Half);
        assert_eq!(grid.get(1, 0), Intensity::Half);
        assert_eq!(grid.get(27, 27), Intensity::Full);
        assert_eq!(grid.get(26, 27), Intensity::Half);
        assert_eq!(grid.get(27, 26), Intensity::Half);
        let lit = grid.cells().iter().filter(|&&c| c != Intensity::Off).count();
        assert_eq!(lit, 6);
    }

    #[test]
    fn brush_never_lowers_a_cell() {
        let mut grid = Grid::new(28);
        grid.apply_brush(10, 10);
        // (10, 11) is Full now; painting next to it must not drop it to Half.
        grid.apply_brush(10, 11);
        grid.apply_brush(10, 12);

        assert_eq!(grid.get(10, 10), Intensity::Full);
        assert_eq!(grid.get(10, 11), Intensity::Full);
        assert_eq!(grid.get(10, 12), Intensity::Full);
        assert_eq!(grid.get(10, 13), Intensity::Half);
    }

    #[test]
    fn strokes_are_monotonic() {
        let mut grid = Grid::new(8);
        let strokes = [(0, 0), (3, 4), (3, 5), (7, 7), (4, 4), (0, 1), (3, 4)];
        for &(r, c) in &strokes {
            let before = grid.clone();
            grid.apply_brush(r, c);
            for (b, a) in before.cells().iter().zip(grid.cells()) {
                assert!(a >= b);
            }
        }
    }

    #[test]
    #[should_panic]
    fn brush_outside_grid_panics() {
        let mut grid = Grid::new(4);
        grid.apply_brush(4, 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut grid = Grid::new(28);
        for i in 0..28 {
            grid.apply_brush(i, i);
        }
        assert!(!grid.is_blank());
        grid.reset();
        assert!(grid.is_blank());
        assert_eq!(grid, Grid::new(28));
    }

    #[test]
    fn quantize_matches_single_dab() {
        let mut grid = Grid::new(28);
        grid.apply_brush(5, 5);
        let pixels = grid.quantize();

        assert_eq!(pixels.len(), 784);
        assert_eq!(pixels[145], 255);
        for idx in [117, 173, 144, 146] {
            assert_eq!(pixels[idx], 128, "index {}", idx);
        }
        assert_eq!(pixels.iter().filter(|&&p| p == 0).count(), 779);
    }

    #[test]
    fn png_export_decodes_to_quantized_pixels() {
        let mut grid = Grid::new(28);
        grid.apply_brush(14, 3);
        let png = grid.to_png().unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), (28, 28));
        assert_eq!(decoded.into_raw(), grid.quantize());
    }
}
