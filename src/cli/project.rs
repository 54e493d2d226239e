//! Project command implementation.
//!
//! Edits a project file's image list and column count, then prints the
//! numbered list to stdout.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::error::{Result, SheetError};
use crate::output::{display_path, plural, Printer};
use crate::project::Project;
use crate::render::expand_inputs;

/// Manage a saved project's image list
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project file; created by `add` or `columns` if missing
    pub file: PathBuf,

    #[command(subcommand)]
    pub action: Option<ProjectAction>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProjectAction {
    /// Append images, or directories of images
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Remove the image at INDEX (0-based)
    Remove { index: usize },

    /// Move the image at INDEX one place earlier
    Up { index: usize },

    /// Move the image at INDEX one place later
    Down { index: usize },

    /// Set the number of grid columns
    Columns {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
    },

    /// Clear the image list and restore default columns
    Reset,
}

fn no_image(index: usize, project: &Project, what: &str) -> SheetError {
    SheetError::InvalidNumericInput {
        message: format!("cannot {} image {}", what, index),
        help: Some(format!(
            "The project has {}; indices start at 0",
            plural(project.image_list.len(), "image", "images")
        )),
    }
}

/// Apply one action to `project`.
pub fn apply(project: &mut Project, action: &ProjectAction) -> Result<()> {
    match action {
        ProjectAction::Add { paths } => project.add(expand_inputs(paths)),
        ProjectAction::Remove { index } => {
            project
                .remove(*index)
                .ok_or_else(|| no_image(*index, project, "remove"))?;
        }
        ProjectAction::Up { index } => {
            project
                .move_up(*index)
                .ok_or_else(|| no_image(*index, project, "move up"))?;
        }
        ProjectAction::Down { index } => {
            project
                .move_down(*index)
                .ok_or_else(|| no_image(*index, project, "move down"))?;
        }
        ProjectAction::Columns { count } => project.columns = *count,
        ProjectAction::Reset => project.reset(),
    }
    Ok(())
}

pub fn run(args: ProjectArgs, printer: &Printer) -> Result<Project> {
    let creates = matches!(
        args.action,
        Some(ProjectAction::Add { .. } | ProjectAction::Columns { .. })
    );
    let mut project = if creates && !args.file.exists() {
        printer.status("Creating", &display_path(&args.file));
        Project::default()
    } else {
        Project::load(&args.file)?
    };

    if let Some(action) = &args.action {
        apply(&mut project, action)?;
        project.save(&args.file)?;
        printer.success("Saved", &display_path(&args.file));
    }

    printer.info(
        "Project",
        &format!(
            "{} in {} columns",
            plural(project.image_list.len(), "image", "images"),
            project.columns
        ),
    );
    for (i, name) in project.display_names().iter().enumerate() {
        println!("{:>3}  {}", i, name);
    }

    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(file: PathBuf, action: Option<ProjectAction>) -> ProjectArgs {
        ProjectArgs { file, action }
    }

    fn names(project: &Project) -> Vec<String> {
        project.display_names()
    }

    #[test]
    fn test_add_creates_project() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("p.json");
        let add = ProjectAction::Add {
            paths: vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
        };

        let project = run(args(file.clone(), Some(add)), &Printer::new()).unwrap();
        assert_eq!(names(&project), vec!["a.png", "b.png"]);
        assert_eq!(Project::load(&file).unwrap(), project);
    }

    #[test]
    fn test_edits_persist_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("p.json");
        let mut start = Project::default();
        start.add(["a", "b", "c", "d"].map(PathBuf::from));
        start.save(&file).unwrap();

        for action in [
            ProjectAction::Remove { index: 0 },
            ProjectAction::Down { index: 0 },
            ProjectAction::Up { index: 2 },
            ProjectAction::Columns { count: 2 },
        ] {
            run(args(file.clone(), Some(action)), &Printer::new()).unwrap();
        }

        let project = Project::load(&file).unwrap();
        assert_eq!(names(&project), vec!["c", "d", "b"]);
        assert_eq!(project.columns, 2);
    }

    #[test]
    fn test_bad_index_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("p.json");
        let mut start = Project::default();
        start.add(["a", "b"].map(PathBuf::from));
        start.save(&file).unwrap();

        for action in [
            ProjectAction::Remove { index: 5 },
            ProjectAction::Up { index: 0 },
            ProjectAction::Down { index: 1 },
        ] {
            let err = run(args(file.clone(), Some(action)), &Printer::new()).unwrap_err();
            assert!(matches!(err, SheetError::InvalidNumericInput { .. }));
        }
        assert_eq!(Project::load(&file).unwrap(), start);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("p.json");
        Project {
            image_list: vec![PathBuf::from("a.png")],
            columns: 7,
        }
        .save(&file)
        .unwrap();

        let project = run(args(file.clone(), Some(ProjectAction::Reset)), &Printer::new()).unwrap();
        assert_eq!(project, Project::default());
        assert_eq!(Project::load(&file).unwrap(), Project::default());
    }

    #[test]
    fn test_show_needs_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(dir.path().join("missing.json"), None), &Printer::new()).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }));
    }
}
