pub mod completions;
pub mod dashboard;
pub mod demo;
pub mod export;
pub mod init;
pub mod list;
pub mod report;
pub mod status;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pinnacle", about = "Sales reporting console for the Pinnacle data warehouse.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Pinnacle: choose a data directory and initialize the warehouse.
    Init {
        /// Path for Pinnacle data (default: ~/Documents/pinnacle)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Company name shown on report headers
        #[arg(long)]
        company: Option<String>,
    },
    /// Load a sample warehouse to explore Pinnacle.
    Demo,
    /// List selector values: employees, product lines, locations.
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Run a sales report.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Export a sales report to CSV.
    Export {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show current database and summary statistics.
    Status,
    /// Generate shell completions.
    Completions {
        /// Shell: bash, zsh, fish, elvish, powershell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Sales representatives.
    Employees,
    /// Product lines.
    ProductLines,
    /// Customer countries.
    Countries,
    /// Customer cities within a country.
    Cities {
        /// Country name
        #[arg(long)]
        country: String,
    },
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Time grain: monthly or quarterly
    #[arg(long, default_value = "monthly")]
    pub grain: String,
    /// Restrict to one calendar year
    #[arg(long)]
    pub year: Option<i32>,
    /// Output mode: view (interactive, default on a TTY) or text
    #[arg(long)]
    pub mode: Option<String>,
    /// CSV output path; implies export
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(Subcommand, Clone)]
pub enum ReportCommands {
    /// Sales revenue per employee.
    Employee {
        /// Employee display name, e.g. 'Jane Doe'
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        args: ReportArgs,
    },
    /// Quantity, average price, and total sales per product line.
    ProductLine {
        /// Product line name, e.g. 'Classic Cars'
        #[arg(long)]
        line: Option<String>,
        #[command(flatten)]
        args: ReportArgs,
    },
    /// Product line sales for one customer location.
    Location {
        /// Customer country
        #[arg(long)]
        country: Option<String>,
        /// Customer city
        #[arg(long)]
        city: Option<String>,
        #[command(flatten)]
        args: ReportArgs,
    },
}

impl ReportCommands {
    pub fn args(&self) -> &ReportArgs {
        match self {
            ReportCommands::Employee { args, .. }
            | ReportCommands::ProductLine { args, .. }
            | ReportCommands::Location { args, .. } => args,
        }
    }
}
