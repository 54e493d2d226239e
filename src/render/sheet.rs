//! Sprite sheet composer.
//!
//! Lays sprites out on a uniform grid: every cell is as large as the largest
//! source image, and sprites fill the grid row-major in input order. Each
//! sprite is alpha-composited over the background fill.

use std::path::{Path, PathBuf};

use image::{imageops, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};
use crate::types::Background;

use super::codec::load_image;

/// A decoded source image and the name it is recorded under.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub filename: String,
    pub image: RgbaImage,
}

impl SourceImage {
    pub fn new(filename: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            filename: filename.into(),
            image,
        }
    }

    /// Load an image from disk, naming it after the file's base name.
    pub fn load(path: &Path) -> Result<Self> {
        let image = load_image(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { filename, image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Load every path, keeping the ones that decode.
///
/// Failures come back alongside the loaded images so callers can report
/// them; they do not stop the rest of the list from loading.
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> (Vec<SourceImage>, Vec<SheetError>) {
    let mut loaded = Vec::with_capacity(paths.len());
    let mut failed = Vec::new();

    for path in paths {
        match SourceImage::load(path.as_ref()) {
            Ok(source) => loaded.push(source),
            Err(e) => failed.push(e),
        }
    }

    (loaded, failed)
}

/// Placement of one sprite within a composed sheet.
///
/// Geometry is signed so that hand-edited metadata with offsets before the
/// sheet origin still parses; the slicer clamps or skips such entries one at
/// a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteEntry {
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
}

fn default_filename() -> String {
    "sprite.png".to_string()
}

/// Grid geometry of a composed sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet_width: u32,
    pub sheet_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
    pub rows: u32,
    /// Entries in input order.
    pub entries: Vec<SpriteEntry>,
}

impl SheetLayout {
    /// Compute the grid for the given sources.
    ///
    /// Fails with `EmptyInput` when there is nothing to lay out and with
    /// `InvalidNumericInput` when the sheet would not fit in `u32` pixels.
    pub fn compute(sources: &[SourceImage], columns: u32) -> Result<Self> {
        let empty = || SheetError::EmptyInput {
            message: "no valid images to compose".to_string(),
        };
        if sources.is_empty() {
            return Err(empty());
        }

        let columns = columns.max(1);
        let cell_width = sources.iter().map(SourceImage::width).max().ok_or_else(empty)?;
        let cell_height = sources.iter().map(SourceImage::height).max().ok_or_else(empty)?;
        let count = u32::try_from(sources.len()).map_err(|_| too_large("image count"))?;
        let rows = count.div_ceil(columns);

        let sheet_width = cell_width
            .checked_mul(columns)
            .ok_or_else(|| too_large("sheet width"))?;
        let sheet_height = cell_height
            .checked_mul(rows)
            .ok_or_else(|| too_large("sheet height"))?;

        let entries = sources
            .iter()
            .enumerate()
            .map(|(order, source)| {
                let (row, col) = (order as u32 / columns, order as u32 % columns);
                SpriteEntry {
                    filename: source.filename.clone(),
                    order,
                    width: source.width().into(),
                    height: source.height().into(),
                    x: i64::from(col) * i64::from(cell_width),
                    y: i64::from(row) * i64::from(cell_height),
                }
            })
            .collect();

        Ok(Self {
            sheet_width,
            sheet_height,
            cell_width,
            cell_height,
            columns,
            rows,
            entries,
        })
    }
}

/// A composed sheet and the layout that produced it.
#[derive(Debug, Clone)]
pub struct ComposedSheet {
    pub image: RgbaImage,
    pub layout: SheetLayout,
}

/// Uniform-grid sheet composer.
#[derive(Debug, Clone, Copy)]
pub struct SheetComposer {
    pub columns: u32,
    pub background: Background,
}

impl SheetComposer {
    pub fn new(columns: u32, background: Background) -> Self {
        Self {
            columns: columns.max(1),
            background,
        }
    }

    /// Compose sources into one sheet.
    ///
    /// Fails with `EmptyInput` when `sources` is empty and with
    /// `InvalidNumericInput` when the grid overflows.
    pub fn compose(&self, sources: &[SourceImage]) -> Result<ComposedSheet> {
        let layout = SheetLayout::compute(sources, self.columns)?;

        let mut image = RgbaImage::from_pixel(
            layout.sheet_width,
            layout.sheet_height,
            Rgba(self.background.to_rgba()),
        );

        for (entry, source) in layout.entries.iter().zip(sources) {
            imageops::overlay(&mut image, &source.image, entry.x as i64, entry.y as i64);
        }

        Ok(ComposedSheet { image, layout })
    }
}

fn too_large(what: &str) -> SheetError {
    SheetError::InvalidNumericInput {
        message: format!("{} is too large", what),
        help: Some("Use fewer columns or smaller images".to_string()),
    }
}

/// Collect image files from a mix of file and directory paths.
///
/// Directories contribute their immediate image files in name order; plain
/// files are kept as given, so unreadable ones still surface as load errors.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = walkdir::WalkDir::new(input)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_image_path(e.path()))
                .map(|e| e.into_path());
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }
    paths
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tga", "tif", "tiff", "webp",
];

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;

    fn solid(name: &str, w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
        SourceImage::new(name, RgbaImage::from_pixel(w, h, Rgba(rgba)))
    }

    fn overlaps(a: &SpriteEntry, b: &SpriteEntry) -> bool {
        !(b.x >= a.x + a.width
            || a.x >= b.x + b.width
            || b.y >= a.y + a.height
            || a.y >= b.y + b.height)
    }

    #[test]
    fn test_compose_empty() {
        let composer = SheetComposer::new(4, Background::Transparent);
        let err = composer.compose(&[]).unwrap_err();
        assert!(matches!(err, SheetError::EmptyInput { .. }));
    }

    #[test]
    fn test_five_sprite_layout() {
        let sources = vec![
            solid("a.png", 10, 10, [255, 0, 0, 255]),
            solid("b.png", 20, 10, [0, 255, 0, 255]),
            solid("c.png", 10, 20, [0, 0, 255, 255]),
            solid("d.png", 5, 5, [255, 255, 0, 255]),
            solid("e.png", 15, 15, [0, 255, 255, 255]),
        ];
        let composer = SheetComposer::new(2, Background::Transparent);
        let sheet = composer.compose(&sources).unwrap();
        let layout = &sheet.layout;

        assert_eq!((layout.cell_width, layout.cell_height), (20, 20));
        assert_eq!(layout.rows, 3);
        assert_eq!((layout.sheet_width, layout.sheet_height), (40, 60));
        assert_eq!(sheet.image.dimensions(), (40, 60));

        let d = &layout.entries[3];
        assert_eq!(d.filename, "d.png");
        assert_eq!(d.order, 3);
        assert_eq!((d.x, d.y), (20, 20));
        assert_eq!((d.width, d.height), (5, 5));
        assert_eq!(sheet.image.get_pixel(20, 20).0, [255, 255, 0, 255]);
        // Padding to the right of the small sprite stays background.
        assert_eq!(sheet.image.get_pixel(25, 20).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_entries_partition_sheet() {
        let sources: Vec<SourceImage> = (0..7)
            .map(|i| solid(&format!("{}.png", i), 3 + i, 9 - i, [i as u8, 0, 0, 255]))
            .collect();
        let sheet = SheetComposer::new(3, Background::Transparent)
            .compose(&sources)
            .unwrap();
        let layout = &sheet.layout;

        for entry in &layout.entries {
            assert!(entry.x + entry.width <= i64::from(layout.sheet_width));
            assert!(entry.y + entry.height <= i64::from(layout.sheet_height));
        }
        for i in 0..layout.entries.len() {
            for j in (i + 1)..layout.entries.len() {
                assert!(
                    !overlaps(&layout.entries[i], &layout.entries[j]),
                    "entries {} and {} overlap",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_row_major_placement() {
        let sources: Vec<SourceImage> = (0..5).map(|i| solid(&i.to_string(), 4, 4, [0, 0, 0, 255])).collect();
        let layout = SheetLayout::compute(&sources, 2).unwrap();

        let cells: Vec<(i64, i64)> = layout.entries.iter().map(|e| (e.x, e.y)).collect();
        assert_eq!(cells, vec![(0, 0), (4, 0), (0, 4), (4, 4), (0, 8)]);
    }

    #[test]
    fn test_zero_columns_treated_as_one() {
        let sources = vec![solid("a", 2, 2, [0; 4]), solid("b", 2, 2, [0; 4])];
        let layout = SheetLayout::compute(&sources, 0).unwrap();
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.rows, 2);
    }

    #[test]
    fn test_more_columns_than_images() {
        let sources = vec![solid("a", 2, 3, [0; 4])];
        let layout = SheetLayout::compute(&sources, 4).unwrap();
        assert_eq!((layout.sheet_width, layout.sheet_height), (8, 3));
        assert_eq!(layout.rows, 1);
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let sources = vec![solid("a", 2, 2, [0; 4])];
        let err = SheetLayout::compute(&sources, u32::MAX).unwrap_err();
        assert!(matches!(err, SheetError::InvalidNumericInput { .. }));

        let err = SheetLayout::compute(&[], 3).unwrap_err();
        assert!(matches!(err, SheetError::EmptyInput { .. }));
    }

    #[test]
    fn test_compose_reports_overflow_without_panicking() {
        let sources = vec![solid("a", 64, 64, [0; 4]), solid("b", 64, 64, [0; 4])];
        let err = SheetComposer::new(100_000_000, Background::Transparent)
            .compose(&sources)
            .unwrap_err();
        assert!(matches!(err, SheetError::InvalidNumericInput { .. }));
    }

    #[test]
    fn test_transparent_pixels_show_background() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let sources = vec![SourceImage::new("a", img)];

        let bg = Background::Solid(Colour::rgb(200, 100, 50));
        let sheet = SheetComposer::new(1, bg).compose(&sources).unwrap();

        assert_eq!(sheet.image.get_pixel(0, 0).0, [200, 100, 50, 255]);
        assert_eq!(sheet.image.get_pixel(1, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_partial_alpha_blends_over_background() {
        let sources = vec![solid("a", 1, 1, [255, 255, 255, 128])];
        let bg = Background::Solid(Colour::BLACK);
        let sheet = SheetComposer::new(1, bg).compose(&sources).unwrap();

        let px = sheet.image.get_pixel(0, 0).0;
        assert_eq!(px[3], 255);
        assert!(px[0] > 100 && px[0] < 160, "expected a blend, got {:?}", px);
    }

    #[test]
    fn test_expand_inputs_reads_directories() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.PNG", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let loose = PathBuf::from("loose.gif");

        let paths = expand_inputs(&[dir.path().to_path_buf(), loose]);
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png", "loose.gif"]);
    }

    #[test]
    fn test_load_sources_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])).save(&good).unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"not an image").unwrap();

        let (loaded, failed) = load_sources(&[bad, good]);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].filename, "good.png");
        assert_eq!(failed.len(), 1);
        assert!(matches!(failed[0], SheetError::ImageLoad { .. }));
    }
}
