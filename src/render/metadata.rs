//! Sheet metadata JSON.
//!
//! Written next to an exported sheet and read back by the metadata-driven
//! slicer. Sprites are listed in input order, not grid order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

use super::sheet::{SheetLayout, SpriteEntry};

/// On-disk form of a sheet layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMetadata {
    #[serde(default)]
    pub spritesheet_width: u32,
    #[serde(default)]
    pub spritesheet_height: u32,
    #[serde(default)]
    pub cell_width: u32,
    #[serde(default)]
    pub cell_height: u32,
    #[serde(default)]
    pub sprites: Vec<SpriteEntry>,
}

impl From<&SheetLayout> for SheetMetadata {
    fn from(layout: &SheetLayout) -> Self {
        Self {
            spritesheet_width: layout.sheet_width,
            spritesheet_height: layout.sheet_height,
            cell_width: layout.cell_width,
            cell_height: layout.cell_height,
            sprites: layout.entries.clone(),
        }
    }
}

impl SheetMetadata {
    /// Parse metadata JSON, rejecting documents without sprites.
    pub fn parse(content: &str) -> Result<Self> {
        let meta: SheetMetadata =
            serde_json::from_str(content).map_err(|e| SheetError::MalformedMetadata {
                message: format!("Invalid metadata JSON: {}", e),
                help: None,
            })?;

        if meta.sprites.is_empty() {
            return Err(SheetError::MalformedMetadata {
                message: "metadata does not contain sprite data".to_string(),
                help: Some("Expected a non-empty \"sprites\" list".to_string()),
            });
        }

        Ok(meta)
    }

    /// Load and parse a metadata file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SheetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read metadata: {}", e),
        })?;
        Self::parse(&content)
    }

    /// Serialize with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(|e| SheetError::Parse {
            message: format!("Failed to serialize sheet metadata: {}", e),
            help: None,
        })?;
        String::from_utf8(buf).map_err(|e| SheetError::Parse {
            message: format!("Sheet metadata is not UTF-8: {}", e),
            help: None,
        })
    }

    /// Write metadata to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| SheetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write sheet metadata: {}", e),
        })
    }
}

/// Metadata path for a sheet: same stem, `.json` extension.
pub fn metadata_path_for(sheet: &Path) -> PathBuf {
    sheet.with_extension("json")
}
