//! chatreel - scripted chat demo player
//!
//! CLI entry point.

mod commands;

use anyhow::Result;
use clap::Parser;

use chatreel::cli::{Cli, Commands, ConfigCommands, ScriptCommands};
use chatreel::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Play(args) => commands::play::handle(args),
        Commands::Transcript(args) => commands::transcript::handle(args),
        Commands::Script(cmd) => match cmd {
            ScriptCommands::Show { file } => commands::script::handle_show(file.as_deref()),
            ScriptCommands::Check { file } => commands::script::handle_check(&file),
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Edit => commands::config::handle_edit(),
            ConfigCommands::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
