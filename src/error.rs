use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Wordlist too short: at least {required} unique terms required, got {available}")]
    TooFewTerms { required: usize, available: usize },

    #[error("Dice must have at least 2 sides, got {0}")]
    InvalidDiceSides(u32),

    #[error("No term sources given (pass a dictfile or use the bundled kit)")]
    NoSources,

    #[error("cannot create '{}': File exists", .0.display())]
    FileExists(PathBuf),

    #[error("No wordlist data available; download or load one first")]
    NotDownloaded,

    #[error("Malformed wordlist data: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
