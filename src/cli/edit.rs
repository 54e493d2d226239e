//! Edit command implementation.
//!
//! Opens an image (or a blank canvas) in the pixel editor model, applies a
//! sequence of tool operations in order, and exports the result at the
//! chosen cell size.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;

use crate::editor::{Editor, Tool, ToolOutcome, DEFAULT_CELL_SIZE};
use crate::error::{Result, SheetError};
use crate::output::{display_path, plural, Printer};
use crate::render::parse_dimensions;
use crate::types::Rgb;

/// Apply pixel edits to an image or a new canvas
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Image to open; omit to start from a blank canvas
    pub input: Option<PathBuf>,

    /// Blank canvas size as WxH cells
    #[arg(long, conflicts_with = "input", default_value = "32x32")]
    pub new: String,

    /// Output pixels per cell
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Operations in order: paint:ROW,COL=HEX, erase:ROW,COL, fill:ROW,COL=HEX, pick:ROW,COL
    #[arg(long = "op", value_name = "OP")]
    pub ops: Vec<EditOp>,

    /// Output image; the extension picks the format
    #[arg(long, short, required = true)]
    pub output: PathBuf,
}

/// One editor action at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOp {
    pub tool: Tool,
    pub row: usize,
    pub col: usize,
    pub colour: Option<Rgb>,
}

impl FromStr for EditOp {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: String| SheetError::Parse {
            message,
            help: Some(
                "Use paint:ROW,COL=#RRGGBB, erase:ROW,COL, fill:ROW,COL=#RRGGBB or pick:ROW,COL"
                    .to_string(),
            ),
        };

        let (name, rest) = s
            .split_once(':')
            .ok_or_else(|| invalid(format!("Missing ':' in operation '{}'", s)))?;
        let tool = match name.trim() {
            "paint" => Tool::Pen,
            "erase" => Tool::Eraser,
            "fill" => Tool::Fill,
            "pick" => Tool::Eyedropper,
            other => return Err(invalid(format!("Unknown operation '{}'", other))),
        };

        let (coords, colour) = match rest.split_once('=') {
            Some((coords, hex)) => (coords, Some(Rgb::from_hex(hex)?)),
            None => (rest, None),
        };

        let needs_colour = matches!(tool, Tool::Pen | Tool::Fill);
        if needs_colour != colour.is_some() {
            return Err(invalid(format!(
                "Operation '{}' {} a colour",
                name,
                if needs_colour { "needs" } else { "does not take" }
            )));
        }

        let (row, col) = coords
            .split_once(',')
            .ok_or_else(|| invalid(format!("Expected ROW,COL in '{}'", s)))?;
        let parse = |v: &str| {
            v.trim().parse::<usize>().map_err(|_| SheetError::InvalidNumericInput {
                message: format!("Invalid cell coordinate '{}'", v),
                help: None,
            })
        };

        Ok(Self {
            tool,
            row: parse(row)?,
            col: parse(col)?,
            colour,
        })
    }
}

/// Apply `op` through the editor, the way a click with that tool would.
fn apply(editor: &mut Editor, op: &EditOp) -> ToolOutcome {
    if let Some(colour) = op.colour {
        editor.choose_colour(colour);
    }
    editor.set_tool(op.tool);
    editor.apply(op.row, op.col)
}

pub fn run(args: EditArgs, printer: &Printer) -> Result<Editor> {
    let mut editor = Editor::new();

    match &args.input {
        Some(path) => {
            editor.grid.set_cell_size(args.cell_size);
            printer.status("Opening", &display_path(path));
            editor.open_image(path)?;
        }
        None => {
            let (w, h) = parse_dimensions(&args.new)?;
            editor.new_canvas(w as usize, h as usize, args.cell_size)?;
        }
    }
    printer.verbose(
        "Canvas",
        &format!(
            "{}x{} cells at {}px",
            editor.grid.width(),
            editor.grid.height(),
            editor.grid.cell_size()
        ),
    );

    for op in &args.ops {
        match apply(&mut editor, op) {
            ToolOutcome::Ignored => printer.warning(
                "Ignored",
                &format!("{} at ({}, {}) is off the canvas", op.tool, op.row, op.col),
            ),
            ToolOutcome::Filled(n) => {
                printer.verbose("Filled", &plural(n, "cell", "cells"));
            }
            ToolOutcome::Picked(colour) => {
                printer.info("Picked", &colour.to_string());
            }
            ToolOutcome::PickedNothing => printer.warning(
                "Picked",
                &format!("nothing at ({}, {})", op.row, op.col),
            ),
            ToolOutcome::Painted | ToolOutcome::Erased => {}
        }
    }

    let format = editor.save_image(&args.output)?;
    printer.success(
        "Wrote",
        &format!("{} ({})", display_path(&args.output), format),
    );

    // Recent colours go to stdout for scripts.
    for colour in editor.history().colours() {
        println!("{}", colour);
    }

    Ok(editor)
}
