mod cli;
mod controller;
mod db;
mod error;
mod fmt;
mod grain;
mod models;
mod present;
mod reports;
mod settings;
mod tui;

use std::io::IsTerminal;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, ListCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Init { data_dir, company }) => cli::init::run(data_dir, company),
        Some(Commands::Demo) => cli::demo::run(),
        Some(Commands::List { command }) => match command {
            ListCommands::Employees => cli::list::employees(),
            ListCommands::ProductLines => cli::list::product_lines(),
            ListCommands::Countries => cli::list::countries(),
            ListCommands::Cities { country } => cli::list::cities(&country),
        },
        Some(Commands::Report { command }) => cli::report::dispatch(command),
        Some(Commands::Export { command }) => cli::export::dispatch(command),
        Some(Commands::Status) => cli::status::run(),
        Some(Commands::Completions { shell }) => cli::completions::run(shell),
        None => {
            if std::io::stdout().is_terminal() {
                cli::dashboard::run()
            } else {
                Cli::command()
                    .print_help()
                    .map_err(error::PinnacleError::from)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
