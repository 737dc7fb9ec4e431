use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use diceware_list::dice::{is_dice_aligned, DICE_SIDES};
use diceware_list::logging;
use diceware_list::wordlist::{self, PrefixMode, WordlistOptions, DEFAULT_LENGTH};
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "diceware-list",
    version,
    author,
    about = "Create a wordlist for diceware passphrases"
)]
struct Cli {
    /// Dictionary files to read terms from. `-` reads stdin
    #[arg(value_name = "DICTFILE")]
    dictfile: Vec<PathBuf>,

    /// Number of terms in the generated list
    #[arg(short = 'n', long, default_value_t = DEFAULT_LENGTH)]
    length: usize,

    /// Add the bundled kit of single chars, numbers and two-letter terms
    #[arg(short = 'k', long)]
    use_kit: bool,

    /// Transliterate terms to ASCII and drop those that still contain other chars
    #[arg(long)]
    ascii: bool,

    #[arg(short, long)]
    lowercase: bool,

    #[arg(long, default_value_t = 1)]
    min_length: usize,

    #[arg(long)]
    max_length: Option<usize>,

    /// Which of two terms to keep when one is a prefix of the other
    #[arg(long, value_enum, default_value = "none")]
    prefix: Prefix,

    #[arg(short, long, default_value_t = DICE_SIDES, value_parser = clap::value_parser!(u32).range(2..))]
    dice_sides: u32,

    /// Print terms only, without dice numbers
    #[arg(long)]
    simple: bool,

    /// Pick the longest terms alphabetically instead of at random
    #[arg(long)]
    no_shuffle: bool,

    /// Seed for reproducible lists
    #[arg(long)]
    seed: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum Prefix {
    None,
    Short,
    Long,
}

impl From<Prefix> for PrefixMode {
    fn from(prefix: Prefix) -> Self {
        match prefix {
            Prefix::None => PrefixMode::None,
            Prefix::Short => PrefixMode::Short,
            Prefix::Long => PrefixMode::Long,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let options = WordlistOptions {
        length: cli.length,
        min_length: cli.min_length,
        max_length: cli.max_length,
        ascii: cli.ascii,
        lowercase: cli.lowercase,
        prefix: cli.prefix.into(),
        shuffle_max_width: !cli.no_shuffle,
        seed: cli.seed,
        dice_sides: cli.dice_sides,
    };

    let readers =
        wordlist::open_sources(&cli.dictfile).context("Failed to open dictionary file")?;
    let terms = wordlist::gather_terms(readers, cli.use_kit)?;
    let terms = wordlist::prepare_terms(terms, &options);
    let list = wordlist::generate_wordlist(terms, &options)?;

    if !cli.simple && !is_dice_aligned(list.len(), cli.dice_sides) {
        warn!(
            "List length {} is not a power of {}: some dice rolls map to no term",
            list.len(),
            cli.dice_sides
        );
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for line in wordlist::format_numbered(&list, cli.dice_sides, !cli.simple) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}
