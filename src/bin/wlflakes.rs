use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use diceware_list::dice::DICE_SIDES;
use diceware_list::flakes::FlakeReport;
use diceware_list::wordlist::read_wordlists;
use diceware_list::{logging, ui};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "wlflakes",
    version,
    author,
    about = "Find flakes (prefixes, duplicates, ambiguous terms) in wordlists"
)]
struct Cli {
    /// Wordlists to check, with or without leading dice numbers. `-` reads stdin
    #[arg(value_name = "WORDLIST", required = true)]
    wordlist: Vec<PathBuf>,

    /// Only print the flaws found
    #[arg(short, long)]
    quiet: bool,

    /// Sides of the dice the list is meant for
    #[arg(short, long, default_value_t = DICE_SIDES, value_parser = clap::value_parser!(u32).range(2..))]
    dice_sides: u32,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let terms = read_wordlists(&cli.wordlist).context("Failed to read wordlist")?;
    info!("Checking {} terms", terms.len());

    let report = FlakeReport::analyze(&terms, cli.dice_sides);
    ui::display_report(&report, &ui::DisplayOptions::detect(cli.quiet));

    Ok(if report.has_flakes() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
