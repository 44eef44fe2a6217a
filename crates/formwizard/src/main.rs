mod action;
mod app;
mod cli;
mod components;
mod config;
mod errors;
mod logging;
mod state;
mod theme;
mod tui;

use clap::Parser;
use color_eyre::Result;

use crate::app::App;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if args.print_schemas {
        let catalog = forms::SchemaCatalog::builtin();
        println!("{}", serde_json::to_string_pretty(catalog.schemas())?);
        return Ok(());
    }

    crate::errors::init()?;
    crate::config::ensure_data_and_config_dirs_exist()?;
    crate::logging::init()?;

    let mut app = App::new(args)?;
    app.run().await?;
    Ok(())
}
