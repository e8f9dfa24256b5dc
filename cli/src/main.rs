//! hobson-deck CLI - business-plan deck PDF exporter

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

use hobson_deck::{export_full_plan, export_section, BusinessPlanCards};

#[derive(Parser)]
#[command(name = "hobson-deck")]
#[command(version)]
#[command(about = "Export Hobson business-plan decks to PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the full six-section plan with index and dividers
    Plan {
        /// Plan JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Export a single section from a plan file
    Section {
        /// Plan JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Section id (e.g. "financials")
        #[arg(long, value_name = "ID")]
        id: String,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan { input, output } => run_plan(&input, &output),
        Commands::Section { input, id, output } => run_section(&input, &id, &output),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}

fn load_plan(input: &PathBuf) -> hobson_deck::Result<BusinessPlanCards> {
    let json = fs::read_to_string(input)?;
    BusinessPlanCards::from_json(&json)
}

fn run_plan(input: &PathBuf, output: &PathBuf) -> hobson_deck::Result<()> {
    log::info!("exporting full plan from {}", input.display());
    let cards = load_plan(input)?;
    let path = export_full_plan(&cards, output)?;
    println!("{} {}", "wrote".green().bold(), path.display());
    Ok(())
}

fn run_section(input: &PathBuf, id: &str, output: &PathBuf) -> hobson_deck::Result<()> {
    log::info!("exporting section {} from {}", id, input.display());
    let cards = load_plan(input)?;
    let section = cards
        .section(id)
        .ok_or_else(|| hobson_deck::Error::UnknownSection(id.to_string()))?;
    let path = export_section(section, output)?;
    println!("{} {}", "wrote".green().bold(), path.display());
    Ok(())
}
