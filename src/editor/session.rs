//! Editor session state.
//!
//! Holds the canvas together with the active tool, the drawing colour and
//! the recent-colour history, and applies tools to cells the way pointer
//! input does.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SheetError};
use crate::render::{load_image, save_image, OutputFormat};
use crate::types::Rgb;

use super::bridge::{grid_from_raster, grid_to_raster};
use super::grid::PixelGrid;
use super::history::ColourHistory;

/// Editing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Fill,
    Eyedropper,
}

impl FromStr for Tool {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pen" => Ok(Tool::Pen),
            "eraser" => Ok(Tool::Eraser),
            "fill" => Ok(Tool::Fill),
            "eyedropper" => Ok(Tool::Eyedropper),
            other => Err(SheetError::Parse {
                message: format!("Unknown tool: {}", other),
                help: Some("Expected one of: pen, eraser, fill, eyedropper".to_string()),
            }),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Fill => "fill",
            Tool::Eyedropper => "eyedropper",
        };
        f.write_str(name)
    }
}

/// What applying a tool did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The coordinates were off the canvas.
    Ignored,
    Painted,
    Erased,
    /// Flood fill recoloured this many cells.
    Filled(usize),
    /// The eyedropper picked this colour.
    Picked(Rgb),
    /// The eyedropper landed on an empty cell.
    PickedNothing,
}

/// The pixel editor's state.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    pub grid: PixelGrid,
    tool: Tool,
    colour: Rgb,
    history: ColourHistory,
}

impl Editor {
    /// Default 32x32 canvas, pen tool, black.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing grid.
    pub fn with_grid(grid: PixelGrid) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn colour(&self) -> Rgb {
        self.colour
    }

    pub fn history(&self) -> &ColourHistory {
        &self.history
    }

    /// Pick a new drawing colour and record it in the history.
    pub fn choose_colour(&mut self, colour: Rgb) {
        self.colour = colour;
        self.history.push(colour);
    }

    /// Switch to a colour from the history without reordering it.
    pub fn use_colour(&mut self, colour: Rgb) {
        self.colour = colour;
    }

    /// Apply the active tool at (row, col).
    pub fn apply(&mut self, row: usize, col: usize) -> ToolOutcome {
        if !self.grid.contains(row, col) {
            return ToolOutcome::Ignored;
        }

        match self.tool {
            Tool::Pen => {
                self.grid.paint(row, col, self.colour);
                ToolOutcome::Painted
            }
            Tool::Eraser => {
                self.grid.erase(row, col);
                ToolOutcome::Erased
            }
            Tool::Fill => ToolOutcome::Filled(self.grid.flood_fill(row, col, self.colour)),
            Tool::Eyedropper => match self.grid.sample(row, col) {
                Some(picked) => {
                    self.choose_colour(picked);
                    ToolOutcome::Picked(picked)
                }
                None => ToolOutcome::PickedNothing,
            },
        }
    }

    /// Apply the active tool at a pointer position in canvas pixels.
    pub fn apply_at_point(&mut self, x: i64, y: i64) -> ToolOutcome {
        match self.grid.cell_at(x, y) {
            Some((row, col)) => self.apply(row, col),
            None => ToolOutcome::Ignored,
        }
    }

    /// Eyedropper preview: the colour under the pointer, if any.
    pub fn hover(&self, x: i64, y: i64) -> Option<Rgb> {
        if self.tool != Tool::Eyedropper {
            return None;
        }
        let (row, col) = self.grid.cell_at(x, y)?;
        self.grid.sample(row, col)
    }

    /// Replace the canvas with an empty one.
    pub fn new_canvas(&mut self, width: usize, height: usize, cell_size: u32) -> Result<()> {
        if width == 0 || height == 0 || cell_size == 0 {
            return Err(SheetError::InvalidNumericInput {
                message: format!(
                    "Canvas {}x{} with cell size {} is not valid",
                    width, height, cell_size
                ),
                help: Some("Width, height and cell size must all be at least 1".to_string()),
            });
        }
        self.grid = PixelGrid::new(width, height).with_cell_size(cell_size);
        Ok(())
    }

    /// Erase every cell, keeping the canvas size.
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Replace the canvas with an imported image, keeping the cell size.
    pub fn open_image(&mut self, path: &Path) -> Result<()> {
        let image = load_image(path)?;
        self.grid = grid_from_raster(&image, self.grid.cell_size());
        Ok(())
    }

    /// Export the canvas at its cell size.
    pub fn save_image(&self, path: &Path) -> Result<OutputFormat> {
        save_image(&grid_to_raster(&self.grid)?, path)
    }
}
