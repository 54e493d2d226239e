//! Raster image codecs.
//!
//! Loads any format the `image` crate can decode and saves to the format
//! implied by the output extension, defaulting to PNG.

use std::fmt;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{Result, SheetError};

/// File formats sheets and tiles can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Tga,
    Tiff,
    WebP,
}

impl OutputFormat {
    /// Pick a format from the path's extension (case-insensitive).
    ///
    /// Unknown or missing extensions fall back to PNG.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => OutputFormat::Jpeg,
            Some("bmp") => OutputFormat::Bmp,
            Some("tga") => OutputFormat::Tga,
            Some("tif") | Some("tiff") => OutputFormat::Tiff,
            Some("webp") => OutputFormat::WebP,
            _ => OutputFormat::Png,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Tga => ImageFormat::Tga,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::WebP => ImageFormat::WebP,
        }
    }

    /// Whether the encoder keeps an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Bmp => "BMP",
            OutputFormat::Tga => "TGA",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::WebP => "WEBP",
        };
        f.write_str(name)
    }
}

/// Decode an image file to RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| SheetError::ImageLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(img.to_rgba8())
}

/// Write an image in the format chosen by `path`'s extension.
///
/// Formats without alpha get the colour channels only; transparent regions
/// keep whatever colour values they carry.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path);

    let result = if format.supports_alpha() {
        img.save_with_format(path, format.image_format())
    } else {
        DynamicImage::ImageRgba8(img.clone())
            .to_rgb8()
            .save_with_format(path, format.image_format())
    };

    result.map_err(|e| SheetError::Codec {
        path: path.to_path_buf(),
        message: format!("Failed to write {}: {}", format, e),
    })?;

    Ok(format)
}
