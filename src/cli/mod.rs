pub mod completions;
pub mod compose;
pub mod edit;
pub mod project;
pub mod slice;

use clap::{Parser, Subcommand};

/// sheetmaker - Sprite sheet composer, slicer and pixel editor
#[derive(Parser, Debug)]
#[command(name = "sheetmaker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show detailed progress
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose images into a grid spritesheet
    Compose(compose::ComposeArgs),

    /// Slice a spritesheet by metadata or tile grid
    Slice(slice::SliceArgs),

    /// Paint, erase, fill and pick on a pixel canvas
    Edit(edit::EditArgs),

    /// Show or edit a project's image list
    Project(project::ProjectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
