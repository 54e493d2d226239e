//! Compose command implementation.
//!
//! Loads source images, lays them out on a uniform grid and writes the
//! sheet, optionally with JSON metadata and a project file.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, SheetError};
use crate::output::{display_path, plural, Printer};
use crate::project::Project;
use crate::render::{
    expand_inputs, load_sources, metadata_path_for, save_image, ComposedSheet, SheetComposer,
    SheetMetadata,
};
use crate::types::Background;

/// Compose images into a sprite sheet
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Images, or directories of images, in sheet order
    pub inputs: Vec<PathBuf>,

    /// Number of grid columns [default: 4, or the project's]
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    pub columns: Option<u32>,

    /// Opaque background colour as hex (default: transparent)
    #[arg(long, short)]
    pub background: Option<String>,

    /// Output sheet path; the extension picks the format
    #[arg(long, short, default_value = "spritesheet.png")]
    pub output: PathBuf,

    /// Also write <output>.json sheet metadata
    #[arg(long)]
    pub json: bool,

    /// Project file to take images and columns from
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Save the resulting image list and columns as a project file
    #[arg(long)]
    pub save_project: Option<PathBuf>,
}

pub fn run(args: ComposeArgs, printer: &Printer) -> Result<ComposedSheet> {
    let background = Background::from_hex(args.background.as_deref())?;

    let mut project = match &args.project {
        Some(path) => {
            printer.verbose("Project", &display_path(path));
            Project::load(path)?
        }
        None => Project::default(),
    };
    project.add(expand_inputs(&args.inputs));
    if let Some(columns) = args.columns {
        project.columns = columns;
    }

    if project.image_list.is_empty() {
        return Err(SheetError::EmptyInput {
            message: "no images to export".to_string(),
        });
    }

    printer.status(
        "Loading",
        &plural(project.image_list.len(), "image", "images"),
    );
    let (sources, failed) = load_sources(&project.image_list);
    for err in &failed {
        printer.warning("Skipped", &err.to_string());
    }

    let composer = SheetComposer::new(project.columns, background);
    let sheet = composer.compose(&sources)?;
    let layout = &sheet.layout;

    printer.status(
        "Composing",
        &format!(
            "{} on a {}x{} grid of {}x{} cells",
            plural(layout.entries.len(), "sprite", "sprites"),
            layout.columns,
            layout.rows,
            layout.cell_width,
            layout.cell_height
        ),
    );

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| SheetError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    let format = save_image(&sheet.image, &args.output)?;
    printer.success(
        "Wrote",
        &format!(
            "{} ({}x{} {})",
            printer.bold(&display_path(&args.output)),
            layout.sheet_width,
            layout.sheet_height,
            format
        ),
    );

    if args.json {
        let meta_path = metadata_path_for(&args.output);
        SheetMetadata::from(layout).write(&meta_path)?;
        printer.success("Wrote", &display_path(&meta_path));
    }

    if let Some(path) = &args.save_project {
        project.save(path)?;
        printer.info("Saved", &format!("project {}", display_path(path)));
    }

    Ok(sheet)
}
