// This file is part of diceware-list.
//
// Copyright (c) 2025  The diceware-list authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Wordlists of the Android LatinIME keyboard as corpus source.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const BASE_URL: &str =
    "https://android.googlesource.com/platform/packages/inputmethods/LatinIME/+/master/dictionaries/";

pub const DEFAULT_LANG: &str = "en";

/// Retrieves the raw body stored at an URL.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("diceware-list/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidWord {
    pub word: String,
    pub frequency: Option<u32>,
    pub flags: String,
    pub original_frequency: Option<u32>,
    pub possibly_offensive: bool,
}

impl AndroidWord {
    fn parse(line: &str) -> Option<Self> {
        let fields = parse_fields(line.trim_start());
        let word = fields.get("word")?.to_string();
        if word.is_empty() {
            return None;
        }
        Some(Self {
            word,
            frequency: fields.get("f").and_then(|f| f.parse().ok()),
            flags: fields.get("flags").cloned().unwrap_or_default(),
            original_frequency: fields.get("originalFreq").and_then(|f| f.parse().ok()),
            possibly_offensive: fields
                .get("possibly_offensive")
                .is_some_and(|v| v == "true"),
        })
    }
}

fn parse_fields(line: &str) -> BTreeMap<String, String> {
    line.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

fn create_new(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => Error::FileExists(path.to_path_buf()),
            _ => Error::Io(err),
        })
}

#[derive(Debug, Clone)]
pub struct AndroidWordList {
    lang: String,
    gz_data: Option<Vec<u8>>,
}

impl AndroidWordList {
    pub fn new(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            gz_data: None,
        }
    }

    /// Load a previously saved `.gz` file.
    pub fn from_path(path: &Path, lang: &str) -> Result<Self> {
        let data = fs::read(path)?;
        Ok(Self {
            lang: lang.to_string(),
            gz_data: Some(data),
        })
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn url(&self) -> String {
        format!("{}{}_wordlist.combined.gz?format=TEXT", BASE_URL, self.lang)
    }

    pub fn basename(&self) -> String {
        format!("{}_wordlist.combined.gz", self.lang)
    }

    pub fn gz_data(&self) -> Option<&[u8]> {
        self.gz_data.as_deref()
    }

    /// Fetch the list. The server wraps the gzip file in base64.
    pub fn download(&mut self, fetcher: &dyn Fetcher) -> Result<&[u8]> {
        let url = self.url();
        info!("Downloading {}", url);
        let body = fetcher.fetch(&url)?;
        let encoded: Vec<u8> = body
            .into_iter()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        let data = STANDARD.decode(encoded)?;
        debug!("Received {} bytes of compressed data", data.len());
        Ok(self.gz_data.insert(data).as_slice())
    }

    /// Write the compressed data to `path`. Existing files are never
    /// overwritten.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = self.gz_data.as_ref().ok_or(Error::NotDownloaded)?;
        create_new(path)?.write_all(data)?;
        info!("Saved {}", path.display());
        Ok(())
    }

    /// Write the plain words, one per line, to a new file at `path`.
    pub fn save_words(&self, path: &Path, offensive: Option<bool>) -> Result<usize> {
        let words = self.words(offensive)?;
        let mut file = BufWriter::new(create_new(path)?);
        for word in &words {
            writeln!(file, "{}", word)?;
        }
        file.flush()?;
        info!("Saved {} words to {}", words.len(), path.display());
        Ok(words.len())
    }

    pub fn decompress(&self) -> Result<String> {
        let data = self.gz_data.as_ref().ok_or(Error::NotDownloaded)?;
        let mut text = String::new();
        GzDecoder::new(data.as_slice()).read_to_string(&mut text)?;
        Ok(text)
    }

    /// Header fields and word entries. Lines indented deeper than word
    /// lines (shortcuts, bigrams) are skipped.
    pub fn parse_lines(&self) -> Result<(BTreeMap<String, String>, Vec<AndroidWord>)> {
        let text = self.decompress()?;
        let mut meta = BTreeMap::new();
        let mut words = Vec::new();

        for line in text.lines() {
            if line.starts_with("dictionary=") {
                meta = parse_fields(line);
            } else if line.starts_with(" word=") {
                match AndroidWord::parse(line) {
                    Some(word) => words.push(word),
                    None => debug!("Skipping malformed line: {:?}", line),
                }
            }
        }

        if meta.is_empty() && words.is_empty() {
            return Err(Error::Format(
                "neither header nor word entries found".to_string(),
            ));
        }
        Ok((meta, words))
    }

    pub fn meta_data(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.parse_lines()?.0)
    }

    /// Words of the list. `Some(true)` gives only the possibly offensive
    /// ones, `Some(false)` only the others.
    pub fn words(&self, offensive: Option<bool>) -> Result<Vec<String>> {
        let (_, entries) = self.parse_lines()?;
        Ok(entries
            .into_iter()
            .filter(|e| offensive.is_none_or(|o| o == e.possibly_offensive))
            .map(|e| e.word)
            .collect())
    }
}
