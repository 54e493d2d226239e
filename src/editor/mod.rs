//! Pixel editor model.
//!
//! The canvas is a `PixelGrid` of optional colours. Tools, the drawing
//! colour and colour history live in `Editor`; conversion to and from
//! raster images is in the bridge.

mod bridge;
mod grid;
mod history;
mod session;

pub use bridge::{grid_from_raster, grid_to_raster};
pub use grid::{PixelGrid, DEFAULT_CELL_SIZE, DEFAULT_GRID_SIZE};
pub use history::{ColourHistory, MAX_RECENT_COLOURS};
pub use session::{Editor, Tool, ToolOutcome};
