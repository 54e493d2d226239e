//! Sheet rendering: composing images into a grid sheet, slicing sheets
//! back into tiles, the metadata that links the two, and raster codecs.

mod codec;
mod metadata;
mod sheet;
mod slice;

pub use codec::{load_image, save_image, OutputFormat};
pub use metadata::{metadata_path_for, SheetMetadata};
pub use sheet::{
    expand_inputs, load_sources, ComposedSheet, SheetComposer, SheetLayout, SourceImage,
    SpriteEntry,
};
pub use slice::{
    crop_clamped, max_tile_pixels, parse_dimensions, slice_entries, slice_grid, write_tiles,
    SliceReport, SlicedTile, TileSpec, WriteReport,
};
