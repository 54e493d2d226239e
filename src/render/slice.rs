//! Sprite sheet slicer.
//!
//! Cuts a sheet back into tiles, either from metadata entries or from a
//! uniform tile grid. Rectangles that run past the sheet edge are clamped:
//! the tile keeps its requested size and the out-of-range part is left
//! transparent.

use std::fs;
use std::path::{Path, PathBuf};

use image::{imageops, RgbaImage};

use crate::error::{Result, SheetError};

use super::codec::save_image;
use super::sheet::{SheetLayout, SpriteEntry};

/// A tile cut from a sheet.
#[derive(Debug, Clone)]
pub struct SlicedTile {
    pub name: String,
    pub image: RgbaImage,
    /// The requested rectangle extended past the sheet edge.
    pub clamped: bool,
}

/// Tiles produced by a slice, plus the entries that could not produce one.
#[derive(Debug, Default)]
pub struct SliceReport {
    pub tiles: Vec<SlicedTile>,
    pub skipped: Vec<SheetError>,
}

impl SliceReport {
    /// Names of tiles that were clamped to the sheet bounds.
    pub fn clamped(&self) -> impl Iterator<Item = &str> {
        self.tiles
            .iter()
            .filter(|t| t.clamped)
            .map(|t| t.name.as_str())
    }
}

/// Uniform tile grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpec {
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl TileSpec {
    pub fn new(tile_width: u32, tile_height: u32, columns: u32, rows: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            columns,
            rows,
        }
    }

    /// Parse a tile spec from user-entered text.
    pub fn parse(tile_width: &str, tile_height: &str, columns: &str, rows: &str) -> Result<Self> {
        Ok(Self {
            tile_width: parse_positive("tile width", tile_width)?,
            tile_height: parse_positive("tile height", tile_height)?,
            columns: parse_positive("columns", columns)?,
            rows: parse_positive("rows", rows)?,
        })
    }

    /// Grid of `tile_width x tile_height` tiles covering a whole sheet.
    ///
    /// Partial tiles at the right and bottom edges count as full columns/rows.
    pub fn covering(sheet_width: u32, sheet_height: u32, tile_width: u32, tile_height: u32) -> Self {
        let tile_width = tile_width.max(1);
        let tile_height = tile_height.max(1);
        Self {
            tile_width,
            tile_height,
            columns: sheet_width.div_ceil(tile_width),
            rows: sheet_height.div_ceil(tile_height),
        }
    }

    /// The grid a composed sheet was laid out on.
    pub fn from_layout(layout: &SheetLayout) -> Self {
        Self::new(layout.cell_width, layout.cell_height, layout.columns, layout.rows)
    }

    pub fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Parse a "WxH" string into (width, height).
pub fn parse_dimensions(s: &str) -> Result<(u32, u32)> {
    let parts: Vec<&str> = s.splitn(2, |c| c == 'x' || c == 'X').collect();
    if parts.len() != 2 {
        return Err(SheetError::InvalidNumericInput {
            message: format!("Invalid dimensions '{}': expected WxH (e.g. 16x16)", s),
            help: Some("Use the format WxH, for example: 16x16, 8x16".to_string()),
        });
    }

    let w = parse_positive("width", parts[0])?;
    let h = parse_positive("height", parts[1])?;
    Ok((w, h))
}

fn parse_positive(what: &str, s: &str) -> Result<u32> {
    let value: u32 = s.trim().parse().map_err(|_| SheetError::InvalidNumericInput {
        message: format!("Invalid {} '{}'", what, s),
        help: Some(format!("The {} must be a positive integer", what)),
    })?;

    if value == 0 {
        return Err(SheetError::InvalidNumericInput {
            message: format!("The {} must be non-zero", what),
            help: None,
        });
    }

    Ok(value)
}

/// Smallest pixel budget a single tile is always allowed.
const MIN_TILE_PIXELS: u64 = 1 << 16;

/// How many times the sheet's area a tile may cover.
const TILE_AREA_FACTOR: u64 = 4;

/// Largest tile area, in pixels, that may be cut from `sheet`.
///
/// Clamped tiles keep their requested size, so this bounds what a metadata
/// entry or tile size can make the slicer allocate.
pub fn max_tile_pixels(sheet: &RgbaImage) -> u64 {
    let (sw, sh) = sheet.dimensions();
    (u64::from(sw) * u64::from(sh)).max(MIN_TILE_PIXELS) * TILE_AREA_FACTOR
}

/// Crop `w x h` at (x, y), padding anything outside `sheet` with transparency.
///
/// The offset may be negative or lie past the sheet. Returns the tile and
/// whether any of the rectangle fell outside the sheet, or `None` when the
/// tile would be larger than [`max_tile_pixels`].
pub fn crop_clamped(
    sheet: &RgbaImage,
    x: i64,
    y: i64,
    w: u32,
    h: u32,
) -> Option<(RgbaImage, bool)> {
    if u64::from(w) * u64::from(h) > max_tile_pixels(sheet) {
        return None;
    }

    let (sw, sh) = sheet.dimensions();
    let (sw, sh) = (i64::from(sw), i64::from(sh));
    let x0 = x.clamp(0, sw);
    let y0 = y.clamp(0, sh);
    let x1 = x.saturating_add(w.into()).clamp(0, sw);
    let y1 = y.saturating_add(h.into()).clamp(0, sh);

    let mut tile = RgbaImage::new(w, h);
    if x1 > x0 && y1 > y0 {
        // All four bounds lie within the sheet here, so they fit in u32.
        let inside = imageops::crop_imm(
            sheet,
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        )
        .to_image();
        imageops::replace(&mut tile, &inside, x0 - x, y0 - y);
    }

    let clamped = (x1 - x0, y1 - y0) != (i64::from(w), i64::from(h));
    Some((tile, clamped))
}

fn invalid_region(entry: &SpriteEntry, message: String) -> SheetError {
    SheetError::InvalidRegion {
        name: entry.filename.clone(),
        message,
    }
}

/// Cut one tile per metadata entry, named after the entry.
///
/// Entries with a non-positive or oversized width or height are skipped and
/// reported; everything else yields a tile, clamped if it runs off the sheet.
pub fn slice_entries(sheet: &RgbaImage, entries: &[SpriteEntry]) -> SliceReport {
    let mut report = SliceReport::default();

    for entry in entries {
        if entry.width <= 0 || entry.height <= 0 {
            report.skipped.push(invalid_region(
                entry,
                format!("empty region {}x{}", entry.width, entry.height),
            ));
            continue;
        }

        let cropped = u32::try_from(entry.width)
            .ok()
            .zip(u32::try_from(entry.height).ok())
            .and_then(|(w, h)| crop_clamped(sheet, entry.x, entry.y, w, h));
        let Some((image, clamped)) = cropped else {
            report.skipped.push(invalid_region(
                entry,
                format!(
                    "region {}x{} is too large for a {}x{} sheet",
                    entry.width,
                    entry.height,
                    sheet.width(),
                    sheet.height()
                ),
            ));
            continue;
        };

        report.tiles.push(SlicedTile {
            name: entry.filename.clone(),
            image,
            clamped,
        });
    }

    report
}

/// Cut a uniform grid of tiles, row-major, named `tile_r<row>_c<col>.png`.
///
/// Fails with `InvalidNumericInput`, before cutting anything, when the grid
/// overflows or covers more than [`max_tile_pixels`] in total.
pub fn slice_grid(sheet: &RgbaImage, spec: TileSpec) -> Result<SliceReport> {
    let too_large = |what: &str| SheetError::InvalidNumericInput {
        message: format!(
            "{} of a {}x{} grid of {}x{} tiles is too large",
            what, spec.columns, spec.rows, spec.tile_width, spec.tile_height
        ),
        help: Some(format!(
            "The grid may cover at most {} pixels of a {}x{} sheet",
            max_tile_pixels(sheet),
            sheet.width(),
            sheet.height()
        )),
    };

    let grid_width = spec
        .columns
        .checked_mul(spec.tile_width)
        .ok_or_else(|| too_large("width"))?;
    let grid_height = spec
        .rows
        .checked_mul(spec.tile_height)
        .ok_or_else(|| too_large("height"))?;
    if u64::from(grid_width) * u64::from(grid_height) > max_tile_pixels(sheet) {
        return Err(too_large("area"));
    }

    let mut report = SliceReport::default();
    report.tiles.reserve(spec.tile_count());

    for r in 0..spec.rows {
        for c in 0..spec.columns {
            let name = format!("tile_r{}_c{}.png", r, c);
            let cropped = crop_clamped(
                sheet,
                i64::from(c) * i64::from(spec.tile_width),
                i64::from(r) * i64::from(spec.tile_height),
                spec.tile_width,
                spec.tile_height,
            );
            match cropped {
                Some((image, clamped)) => report.tiles.push(SlicedTile {
                    name,
                    image,
                    clamped,
                }),
                None => report.skipped.push(SheetError::InvalidRegion {
                    name,
                    message: "tile is too large for the sheet".to_string(),
                }),
            }
        }
    }

    Ok(report)
}

/// Outcome of writing tiles to disk.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<SheetError>,
}

/// Save tiles into `dir`, creating it if needed.
///
/// Each tile is saved independently; a tile that fails to encode is
/// recorded and the rest are still written. Later tiles with the same name
/// overwrite earlier ones.
pub fn write_tiles(tiles: &[SlicedTile], dir: &Path) -> Result<WriteReport> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| SheetError::Io {
            path: dir.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let mut report = WriteReport::default();
    for tile in tiles {
        let path = dir.join(&tile.name);
        match save_image(&tile.image, &path) {
            Ok(_) => report.written.push(path),
            Err(e) => report.failed.push(e),
        }
    }

    Ok(report)
}
