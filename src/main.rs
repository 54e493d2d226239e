use clap::Parser;
use miette::Result;
use sheetmaker::cli::{Cli, Commands};
use sheetmaker::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().with_verbose(cli.verbose);

    match cli.command {
        Commands::Compose(args) => {
            sheetmaker::cli::compose::run(args, &printer)?;
        }
        Commands::Slice(args) => {
            sheetmaker::cli::slice::run(args, &printer)?;
        }
        Commands::Edit(args) => {
            sheetmaker::cli::edit::run(args, &printer)?;
        }
        Commands::Project(args) => {
            sheetmaker::cli::project::run(args, &printer)?;
        }
        Commands::Completions(args) => sheetmaker::cli::completions::run(args)?,
    }

    Ok(())
}
