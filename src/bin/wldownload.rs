use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use diceware_list::android::{AndroidWordList, HttpFetcher, DEFAULT_LANG};
use diceware_list::{logging, ui, Error};
use tracing::{debug, error, info};

/// `EX_CANTCREAT` from sysexits.h.
const EX_CANTCREAT: u8 = 73;

#[derive(Parser)]
#[command(
    name = "wldownload",
    version,
    author,
    about = "Download and mangle Android wordlists"
)]
struct Cli {
    /// Language code of the list, e.g. `en` or `de`
    #[arg(long, default_value = DEFAULT_LANG)]
    lang: String,

    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write the non-offensive words as plain text
    #[arg(long)]
    extract: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: &Cli) -> Result<()> {
    let mut wl = AndroidWordList::new(&cli.lang);
    let target = cli.output_dir.join(wl.basename());
    let words_target = cli.output_dir.join(format!("{}_wordlist.txt", wl.lang()));

    let mut targets = vec![&target];
    if cli.extract {
        targets.push(&words_target);
    }
    if let Some(existing) = targets.into_iter().find(|path| path.exists()) {
        return Err(Error::FileExists(existing.clone()).into());
    }

    info!("Starting download of Android wordlist file.");
    let fetcher = HttpFetcher::new().context("Failed to set up HTTP client")?;
    let (_, elapsed) = ui::show_progress(
        ui::detect_unicode_support(),
        "Downloading wordlist...",
        || wl.download(&fetcher).map(|_| ()),
    )?;
    debug!(
        "Download finished in {:.1}s. Basename: {}",
        elapsed.as_secs_f64(),
        wl.basename()
    );

    wl.save(&target)?;
    if cli.extract {
        wl.save_words(&words_target, Some(false))?;
    }
    info!("Done.");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            match err.downcast_ref::<Error>() {
                Some(Error::FileExists(_)) => ExitCode::from(EX_CANTCREAT),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
