//! Conversion between raster images and pixel grids.
//!
//! Import is pixel-exact: one cell per pixel, alpha 0 becomes an empty cell
//! and any other alpha collapses to opaque. Export draws one pixel per cell
//! and then always resamples to the grid's cell size with a Lanczos filter,
//! so hard edges soften when scaled up. Resampling runs on premultiplied
//! alpha, so soft edges fade out without darkening toward the empty cells.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::{Result, SheetError};
use crate::types::Rgb;

use super::grid::PixelGrid;

/// Build a grid with one cell per pixel of `image`.
pub fn grid_from_raster(image: &RgbaImage, cell_size: u32) -> PixelGrid {
    let (w, h) = image.dimensions();
    let mut grid = PixelGrid::new(w as usize, h as usize).with_cell_size(cell_size);

    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        if a != 0 {
            grid.paint(y as usize, x as usize, Rgb::new(r, g, b));
        }
    }

    grid
}

/// Render a grid to an image scaled by its cell size.
///
/// Fails with `InvalidNumericInput` when the scaled size overflows `u32`.
pub fn grid_to_raster(grid: &PixelGrid) -> Result<RgbaImage> {
    let scale = grid.cell_size();
    let scaled = |cells: usize, what: &str| {
        u32::try_from(cells)
            .ok()
            .and_then(|n| n.checked_mul(scale))
            .ok_or_else(|| SheetError::InvalidNumericInput {
                message: format!(
                    "export {} of {} cells at {} px per cell is too large",
                    what, cells, scale
                ),
                help: Some("Use a smaller cell size".to_string()),
            })
    };
    let out_w = scaled(grid.width(), "width")?;
    let out_h = scaled(grid.height(), "height")?;

    // Cells are opaque or empty, so this buffer is already premultiplied.
    let (w, h) = (grid.width() as u32, grid.height() as u32);
    let mut native = RgbaImage::new(w, h);

    for (y, row) in grid.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(colour) = cell {
                native.put_pixel(x as u32, y as u32, Rgba(colour.to_rgba()));
            }
        }
    }

    let mut out = imageops::resize(&native, out_w, out_h, FilterType::Lanczos3);
    unpremultiply(&mut out);
    Ok(out)
}

/// Divide colour channels by alpha, in place.
fn unpremultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = match a {
            0 => [0, 0, 0, 0],
            255 => [r, g, b, a],
            _ => {
                let a32 = u32::from(a);
                let div = |c: u8| ((u32::from(c) * 255 + a32 / 2) / a32).min(255) as u8;
                [div(r), div(g), div(b), a]
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_dimensions_and_cells() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([9, 8, 7, 255]));

        let grid = grid_from_raster(&img, 16);
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.cell_size(), 16);
        assert_eq!(grid.sample(1, 2), Some(Rgb::new(9, 8, 7)));
        assert_eq!(grid.sample(0, 0), None);
    }

    #[test]
    fn test_import_collapses_partial_alpha() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 128]));
        let grid = grid_from_raster(&img, 1);
        assert_eq!(grid.sample(0, 0), Some(Rgb::new(10, 20, 30)));

        let out = grid_to_raster(&grid).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_transparency_survives_native_export() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([50, 60, 70, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 0]));

        let grid = grid_from_raster(&img, 1);
        assert_eq!(grid.sample(0, 1), None);

        let out = grid_to_raster(&grid).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(1, 0).0[3], 0);
        assert_eq!(out.get_pixel(0, 0).0, [50, 60, 70, 255]);
    }

    #[test]
    fn test_export_scales_by_cell_size() {
        let mut grid = PixelGrid::new(3, 2).with_cell_size(4);
        for row in 0..2 {
            for col in 0..3 {
                grid.paint(row, col, Rgb::new(200, 100, 0));
            }
        }

        let out = grid_to_raster(&grid).unwrap();
        assert_eq!(out.dimensions(), (12, 8));

        let [r, g, b, a] = out.get_pixel(6, 4).0;
        assert!(r.abs_diff(200) <= 1 && g.abs_diff(100) <= 1 && b <= 1);
        assert!(a >= 254);
    }

    #[test]
    fn test_soft_edges_keep_cell_colour() {
        let mut grid = PixelGrid::new(2, 1).with_cell_size(8);
        grid.paint(0, 0, Rgb::new(255, 0, 0));

        let out = grid_to_raster(&grid).unwrap();
        assert_eq!(out.dimensions(), (16, 8));

        let edge: Vec<_> = out.pixels().filter(|p| p.0[3] > 0 && p.0[3] < 255).collect();
        assert!(!edge.is_empty(), "resampling should soften the edge");
        for pixel in edge {
            assert_eq!(&pixel.0[..3], &[255, 0, 0], "edge pixel {:?} changed hue", pixel);
        }
    }

    #[test]
    fn test_unpremultiply() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([64, 32, 0, 128]));
        unpremultiply(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [128, 64, 0, 128]);

        let mut img = RgbaImage::from_pixel(1, 1, Rgba([9, 9, 9, 0]));
        unpremultiply(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_export_overflow_is_an_error() {
        let grid = PixelGrid::new(3, 1).with_cell_size(u32::MAX / 2);
        let err = grid_to_raster(&grid).unwrap_err();
        assert!(matches!(err, SheetError::InvalidNumericInput { .. }));
    }

    #[test]
    fn test_empty_grid_exports_transparent() {
        let grid = PixelGrid::new(2, 2).with_cell_size(3);
        let out = grid_to_raster(&grid).unwrap();
        assert_eq!(out.dimensions(), (6, 6));
        assert!(out.pixels().all(|p| p.0[3] == 0));
    }
}
