//! Project file (`*.json`) handling.
//!
//! A project remembers the ordered list of source images and the column
//! count used to compose them. The `project` subcommand edits it in place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

/// Column count for new projects.
pub const DEFAULT_COLUMNS: u32 = 4;

/// Saved sheet project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Source images in composition order.
    pub image_list: Vec<PathBuf>,

    /// Grid columns.
    pub columns: u32,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            image_list: vec![],
            columns: DEFAULT_COLUMNS,
        }
    }
}

impl Project {
    /// Load a project file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SheetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read project: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a project from JSON.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SheetError::Parse {
            message: format!("Invalid project file: {}", e),
            help: Some("Expected {\"image_list\": [...], \"columns\": N}".to_string()),
        })
    }

    /// Write the project as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self).map_err(|e| SheetError::Parse {
            message: format!("Failed to serialize project: {}", e),
            help: None,
        })?;
        fs::write(path, json).map_err(|e| SheetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write project: {}", e),
        })
    }

    /// Append images to the end of the list.
    pub fn add<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.image_list.extend(paths);
    }

    /// Remove the image at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        (index < self.image_list.len()).then(|| self.image_list.remove(index))
    }

    /// Swap the image at `index` with the one before it.
    ///
    /// Returns the image's new index, or `None` if it could not move.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.image_list.len() {
            return None;
        }
        self.image_list.swap(index, index - 1);
        Some(index - 1)
    }

    /// Swap the image at `index` with the one after it.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        if index >= self.image_list.len().saturating_sub(1) {
            return None;
        }
        self.image_list.swap(index, index + 1);
        Some(index + 1)
    }

    /// Start over: no images, default columns.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Base names of the images, as shown in a list.
    pub fn display_names(&self) -> Vec<String> {
        self.image_list
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(names: &[&str]) -> Project {
        let mut p = Project::default();
        p.add(names.iter().map(PathBuf::from));
        p
    }

    #[test]
    fn test_parse_project() {
        let p = Project::parse(r#"{"image_list": ["a.png", "/abs/b.png"], "columns": 6}"#).unwrap();
        assert_eq!(p.image_list, vec![PathBuf::from("a.png"), PathBuf::from("/abs/b.png")]);
        assert_eq!(p.columns, 6);
    }

    #[test]
    fn test_parse_defaults() {
        let p = Project::parse("{}").unwrap();
        assert!(p.image_list.is_empty());
        assert_eq!(p.columns, DEFAULT_COLUMNS);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Project::parse("[1, 2]").is_err());
        assert!(Project::parse(r#"{"columns": "many"}"#).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        let mut p = project(&["x.png", "y.png"]);
        p.columns = 3;

        p.save(&path).unwrap();
        assert_eq!(Project::load(&path).unwrap(), p);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["image_list"][1], "y.png");
        assert_eq!(raw["columns"], 3);
    }

    #[test]
    fn test_reorder() {
        let mut p = project(&["a", "b", "c"]);
        assert_eq!(p.move_up(2), Some(1));
        assert_eq!(p.display_names(), vec!["a", "c", "b"]);
        assert_eq!(p.move_down(0), Some(1));
        assert_eq!(p.display_names(), vec!["c", "a", "b"]);

        assert_eq!(p.move_up(0), None);
        assert_eq!(p.move_down(2), None);
        assert_eq!(p.move_up(9), None);
    }

    #[test]
    fn test_remove_and_reset() {
        let mut p = project(&["a", "b"]);
        p.columns = 9;
        assert_eq!(p.remove(0), Some(PathBuf::from("a")));
        assert_eq!(p.remove(5), None);
        assert_eq!(p.display_names(), vec!["b"]);

        p.reset();
        assert_eq!(p, Project::default());
    }

    #[test]
    fn test_display_names_use_base_name() {
        let p = project(&["/sprites/hero/idle.png"]);
        assert_eq!(p.display_names(), vec!["idle.png"]);
    }
}
