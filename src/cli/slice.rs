//! Slice command implementation.
//!
//! Cuts a spritesheet into individual images, either from the JSON metadata
//! written by `compose --json` or from a uniform tile grid.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::render::{
    load_image, parse_dimensions, slice_entries, slice_grid, write_tiles, SheetMetadata,
    TileSpec, WriteReport,
};

/// Slice a spritesheet into separate images
#[derive(Args, Debug)]
pub struct SliceArgs {
    /// Spritesheet to slice
    #[arg(required = true)]
    pub input: PathBuf,

    /// Sheet metadata JSON naming and placing each sprite
    #[arg(long, short, conflicts_with_all = ["tile", "grid"])]
    pub metadata: Option<PathBuf>,

    /// Tile size as WxH (e.g. 16x16)
    #[arg(long, required_unless_present = "metadata")]
    pub tile: Option<String>,

    /// Grid as COLUMNSxROWS (default: enough tiles to cover the sheet)
    #[arg(long, requires = "tile")]
    pub grid: Option<String>,

    /// Output directory for the sliced images
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
}

/// Where slice geometry comes from, resolved before any image I/O.
enum Source {
    Metadata(SheetMetadata),
    Grid {
        tile: (u32, u32),
        grid: Option<(u32, u32)>,
    },
}

fn resolve_source(args: &SliceArgs, printer: &Printer) -> Result<Source> {
    if let Some(path) = &args.metadata {
        printer.status("Reading", &display_path(path));
        return SheetMetadata::load(path).map(Source::Metadata);
    }

    let tile = parse_dimensions(args.tile.as_deref().unwrap_or_default())?;
    let grid = args.grid.as_deref().map(parse_dimensions).transpose()?;
    Ok(Source::Grid { tile, grid })
}

pub fn run(args: SliceArgs, printer: &Printer) -> Result<WriteReport> {
    let source = resolve_source(&args, printer)?;

    printer.status("Loading", &display_path(&args.input));
    let sheet = load_image(&args.input)?;
    printer.verbose(
        "Sheet",
        &format!("{}x{}", sheet.width(), sheet.height()),
    );

    let report = match source {
        Source::Metadata(meta) => {
            printer.status(
                "Slicing",
                &plural(meta.sprites.len(), "sprite", "sprites"),
            );
            slice_entries(&sheet, &meta.sprites)
        }
        Source::Grid { tile: (tw, th), grid } => {
            let spec = match grid {
                Some((columns, rows)) => TileSpec::new(tw, th, columns, rows),
                None => TileSpec::covering(sheet.width(), sheet.height(), tw, th),
            };
            printer.status(
                "Slicing",
                &format!(
                    "{}x{} grid ({}x{} tiles)",
                    spec.columns, spec.rows, spec.tile_width, spec.tile_height
                ),
            );
            slice_grid(&sheet, spec)?
        }
    };

    for err in &report.skipped {
        printer.warning("Skipped", &err.to_string());
    }
    for name in report.clamped() {
        printer.warning(
            "Clamped",
            &format!("{} extends past the sheet edge; padded with transparency", name),
        );
    }

    let written = write_tiles(&report.tiles, &args.output)?;
    for err in &written.failed {
        printer.error("Failed", &err.to_string());
    }

    printer.info(
        "Finished",
        &format!(
            "{} saved to {}",
            plural(written.written.len(), "image", "images"),
            display_path(&args.output)
        ),
    );

    Ok(written)
}
