//! Pixel grid - the editor canvas.
//!
//! A row-major grid of optional colours. `None` is an unpainted
//! (transparent) cell; painted cells are always opaque.

use crate::types::Rgb;

/// Default canvas width and height in cells.
pub const DEFAULT_GRID_SIZE: usize = 32;

/// Default on-screen/export size of one cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 16;

/// An editable grid of optional colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    /// Pixels per cell when exported or displayed.
    cell_size: u32,
    /// Cells (row-major: cells[row * width + col]).
    cells: Vec<Option<Rgb>>,
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

impl PixelGrid {
    /// Create an empty grid with the default cell size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cell_size: DEFAULT_CELL_SIZE,
            cells: vec![None; width * height],
        }
    }

    /// Builder-style cell size override. Zero is treated as one.
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size.max(1);
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.cell_size = cell_size.max(1);
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// Whether (row, col) lies on the canvas.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some()
    }

    /// Current value of a cell; `None` for empty or out-of-range cells.
    pub fn sample(&self, row: usize, col: usize) -> Option<Rgb> {
        self.index(row, col).and_then(|i| self.cells[i])
    }

    fn set(&mut self, row: usize, col: usize, value: Option<Rgb>) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = value;
        }
    }

    /// Paint a cell. Out-of-range coordinates are ignored.
    pub fn paint(&mut self, row: usize, col: usize, colour: Rgb) {
        self.set(row, col, Some(colour));
    }

    /// Clear a cell back to transparent. Out-of-range coordinates are ignored.
    pub fn erase(&mut self, row: usize, col: usize) {
        self.set(row, col, None);
    }

    /// Erase every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Change the grid dimensions, keeping cells that still fit.
    ///
    /// Cells outside the new bounds are dropped; new cells start empty.
    pub fn resize(&mut self, width: usize, height: usize) {
        let mut cells = vec![None; width * height];
        for row in 0..height.min(self.height) {
            for col in 0..width.min(self.width) {
                cells[row * width + col] = self.cells[row * self.width + col];
            }
        }
        self.width = width;
        self.height = height;
        self.cells = cells;
    }

    /// Map a pointer position in canvas pixels to a (row, col) cell.
    pub fn cell_at(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let size = self.cell_size as i64;
        let (row, col) = ((y / size) as usize, (x / size) as usize);
        self.contains(row, col).then_some((row, col))
    }

    /// Iterate rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Rgb>]> {
        // chunks() panics on zero; an empty grid has no rows either way.
        self.cells.chunks(self.width.max(1))
    }

    /// Number of painted cells.
    pub fn painted(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Recolour the 4-connected region around (row, col).
    ///
    /// Every cell reachable through up/down/left/right steps whose value
    /// equals the seed's original value becomes `colour`. Returns the number
    /// of cells recoloured; a seed already holding `colour`, or one off the
    /// canvas, changes nothing.
    pub fn flood_fill(&mut self, row: usize, col: usize, colour: Rgb) -> usize {
        let Some(seed) = self.index(row, col) else {
            return 0;
        };

        let target = self.cells[seed];
        let fill = Some(colour);
        if target == fill {
            return 0;
        }

        let mut filled = 0;
        let mut stack = vec![(row, col)];
        while let Some((r, c)) = stack.pop() {
            let Some(i) = self.index(r, c) else {
                continue;
            };
            if self.cells[i] != target {
                continue;
            }

            self.cells[i] = fill;
            filled += 1;

            if r > 0 {
                stack.push((r - 1, c));
            }
            stack.push((r + 1, c));
            if c > 0 {
                stack.push((r, c - 1));
            }
            stack.push((r, c + 1));
        }

        filled
    }
}
