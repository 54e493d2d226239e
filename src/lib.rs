//! sheetmaker - Sprite sheet composer, slicer and pixel editor
//!
//! Composes individually sized images into a uniform-grid spritesheet,
//! slices sheets back into tiles from metadata or a tile grid, and models a
//! pixel-art canvas with paint, erase, flood fill and eyedropper tools.

pub mod cli;
pub mod editor;
pub mod error;
pub mod output;
pub mod project;
pub mod render;
pub mod types;

pub use editor::{grid_from_raster, grid_to_raster, ColourHistory, Editor, PixelGrid, Tool, ToolOutcome};
pub use error::{Result, SheetError};
pub use project::Project;
pub use render::{
    load_image, save_image, slice_entries, slice_grid, ComposedSheet, OutputFormat,
    SheetComposer, SheetLayout, SheetMetadata, SliceReport, SlicedTile, SourceImage, SpriteEntry,
    TileSpec,
};
pub use types::{Background, Colour, Rgb};
