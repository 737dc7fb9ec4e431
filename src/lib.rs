pub mod android;
pub mod dice;
pub mod error;
pub mod flakes;
pub mod logging;
pub mod normalize;
pub mod shuffle;
pub mod ui;
pub mod wordlist;

pub use android::{AndroidWordList, Fetcher, HttpFetcher};
pub use error::{Error, Result};
pub use flakes::{is_prefix_code, FlakeReport};
pub use normalize::normalize;
pub use wordlist::{generate_wordlist, PrefixMode, WordlistOptions};
