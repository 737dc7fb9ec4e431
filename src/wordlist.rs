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

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::dice::{check_sides, default_separator, dice_needed, idx_to_dicenums, DICE_SIDES};
use crate::error::{Error, Result};
use crate::normalize::{ascii_allowed, filter_chars, normalize};
use crate::shuffle::Shuffler;

const KIT_DATA: &str = include_str!("../assets/dicewarekit.txt");

pub const DEFAULT_LENGTH: usize = 8192;
pub const KIT_SIZE: usize = 834;

static KIT: OnceLock<Vec<&'static str>> = OnceLock::new();

/// How to deal with terms that are prefixes of other terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrefixMode {
    /// Keep everything.
    #[default]
    None,
    /// Keep the prefix, drop the terms it starts.
    Short,
    /// Keep the longer terms, drop the prefixes.
    Long,
}

#[derive(Debug, Clone)]
pub struct WordlistOptions {
    pub length: usize,
    pub min_length: usize,
    pub max_length: Option<usize>,
    pub ascii: bool,
    pub lowercase: bool,
    pub prefix: PrefixMode,
    pub shuffle_max_width: bool,
    pub seed: Option<String>,
    pub dice_sides: u32,
}

impl Default for WordlistOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            min_length: 1,
            max_length: None,
            ascii: false,
            lowercase: false,
            prefix: PrefixMode::None,
            shuffle_max_width: true,
            seed: None,
            dice_sides: DICE_SIDES,
        }
    }
}

impl WordlistOptions {
    pub fn shuffler(&self) -> Option<Shuffler> {
        if !self.shuffle_max_width {
            return None;
        }
        Some(match &self.seed {
            Some(seed) => Shuffler::from_seed(seed),
            None => Shuffler::from_entropy(),
        })
    }
}

/// Terms of the bundled kit: single chars, numbers and two-letter terms.
pub fn kit_terms() -> &'static [&'static str] {
    KIT.get_or_init(|| {
        KIT_DATA
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    })
}

/// Open every path for reading; `-` is stdin.
pub fn open_sources(paths: &[PathBuf]) -> Result<Vec<Box<dyn BufRead>>> {
    let mut readers: Vec<Box<dyn BufRead>> = Vec::with_capacity(paths.len());
    for path in paths {
        if path == Path::new("-") {
            readers.push(Box::new(io::stdin().lock()));
        } else {
            debug!("Opening source list: {}", path.display());
            readers.push(Box::new(BufReader::new(File::open(path)?)));
        }
    }
    Ok(readers)
}

/// Trimmed, non-empty lines of all `readers`, in order.
pub fn term_iterator<R: BufRead>(readers: Vec<R>) -> Result<Vec<String>> {
    let mut terms = Vec::new();
    for reader in readers {
        for line in reader.lines() {
            let line = line?;
            let term = line.trim();
            if !term.is_empty() {
                terms.push(term.to_string());
            }
        }
    }
    Ok(terms)
}

/// All candidate terms from the readers plus the kit, if enabled.
pub fn gather_terms<R: BufRead>(readers: Vec<R>, use_kit: bool) -> Result<Vec<String>> {
    if readers.is_empty() && !use_kit {
        return Err(Error::NoSources);
    }
    let mut terms = Vec::new();
    if use_kit {
        debug!("Adding source list: dicewarekit.txt");
        terms.extend(kit_terms().iter().map(|t| t.to_string()));
    }
    terms.extend(term_iterator(readers)?);
    info!("Read {} candidate terms", terms.len());
    Ok(terms)
}

pub fn filtered_by_len<I>(terms: I, min_len: usize, max_len: Option<usize>) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    terms
        .into_iter()
        .filter(|term| {
            let len = term.chars().count();
            len >= min_len && max_len.is_none_or(|max| len <= max)
        })
        .collect()
}

/// Apply normalisation, char and length filters as configured.
pub fn prepare_terms(terms: Vec<String>, options: &WordlistOptions) -> Vec<String> {
    let terms: Vec<String> = if options.ascii {
        let allowed = ascii_allowed();
        let normalized = terms.iter().map(|t| normalize(t)).collect::<Vec<_>>();
        info!("Filtering out non-ASCII chars");
        filter_chars(normalized, Some(&allowed)).collect()
    } else {
        terms
    };

    let terms: Vec<String> = if options.lowercase {
        terms.into_iter().map(|t| t.to_lowercase()).collect()
    } else {
        terms
    };

    filtered_by_len(terms, options.min_length, options.max_length)
}

fn width(term: &str) -> usize {
    term.chars().count()
}

/// Entries shorter than `max_width` in their original order, then the
/// entries of exactly `max_width` shuffled. Longer entries are dropped.
pub fn shuffle_max_width_items(
    terms: Vec<String>,
    max_width: Option<usize>,
    shuffler: &mut Shuffler,
) -> Vec<String> {
    let terms: Vec<String> = terms.into_iter().map(|t| t.trim().to_string()).collect();
    let max_width = max_width.unwrap_or_else(|| terms.iter().map(|t| width(t)).max().unwrap_or(0));

    let (mut result, rest): (Vec<String>, Vec<String>) =
        terms.into_iter().partition(|t| width(t) < max_width);
    let mut widest: Vec<String> = rest.into_iter().filter(|t| width(t) == max_width).collect();
    shuffler.shuffle(&mut widest);
    result.extend(widest);
    result
}

/// The `num` terms with the smallest total width.
///
/// Terms come out sorted by length, then alphabetically. With a shuffler,
/// the terms as wide as the last pick are shuffled first, so which of them
/// make it into the result is random.
pub fn min_width_iter(
    terms: Vec<String>,
    num: usize,
    shuffler: Option<&mut Shuffler>,
) -> Vec<String> {
    let mut all_terms = terms;
    all_terms.sort_by(|a, b| width(a).cmp(&width(b)).then_with(|| a.cmp(b)));
    if num == 0 || all_terms.is_empty() {
        return Vec::new();
    }

    if let Some(shuffler) = shuffler {
        let boundary = num.min(all_terms.len()) - 1;
        let max_width = width(&all_terms[boundary]);
        all_terms = shuffle_max_width_items(all_terms, Some(max_width), shuffler);
    }

    all_terms.truncate(num);
    all_terms
}

/// Drop terms according to `mode`. Input must be sorted and unique.
///
/// Every term that has some prefix in a sorted list is found in the run
/// directly following its shortest prefix.
pub fn strip_prefixes(sorted_terms: Vec<String>, mode: PrefixMode) -> Vec<String> {
    match mode {
        PrefixMode::None => sorted_terms,
        PrefixMode::Short => {
            let mut kept: Vec<String> = Vec::with_capacity(sorted_terms.len());
            for term in sorted_terms {
                match kept.last() {
                    Some(last) if term.starts_with(last.as_str()) => {
                        debug!("Dropping '{}' (starts with '{}')", term, last);
                    }
                    _ => kept.push(term),
                }
            }
            kept
        }
        PrefixMode::Long => {
            let mut kept = Vec::with_capacity(sorted_terms.len());
            let mut iter = sorted_terms.into_iter().peekable();
            while let Some(term) = iter.next() {
                match iter.peek() {
                    Some(next) if next.starts_with(term.as_str()) => {
                        debug!("Dropping '{}' (prefix of '{}')", term, next);
                    }
                    _ => kept.push(term),
                }
            }
            kept
        }
    }
}

/// Build a sorted wordlist of exactly `options.length` unique terms.
pub fn generate_wordlist(terms: Vec<String>, options: &WordlistOptions) -> Result<Vec<String>> {
    check_sides(options.dice_sides)?;

    let unique: Vec<String> = terms.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    debug!("{} unique terms", unique.len());

    let unique = strip_prefixes(unique, options.prefix);
    if unique.len() < options.length {
        return Err(Error::TooFewTerms {
            required: options.length,
            available: unique.len(),
        });
    }

    let mut shuffler = options.shuffler();
    let mut list = min_width_iter(unique, options.length, shuffler.as_mut());
    list.sort();
    info!("Generated wordlist with {} terms", list.len());
    Ok(list)
}

/// Terms of an existing wordlist. Lines may carry leading dice numbers.
pub fn parse_wordlist(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            match line.split_once('\t').or_else(|| line.split_once(' ')) {
                Some((numbers, term))
                    if !numbers.is_empty()
                        && !term.trim().is_empty()
                        && numbers.chars().all(|c| c.is_ascii_digit() || c == '-') =>
                {
                    term.trim().to_string()
                }
                _ => line.to_string(),
            }
        })
        .collect()
}

pub fn read_wordlists(paths: &[PathBuf]) -> Result<Vec<String>> {
    let mut terms = Vec::new();
    for mut reader in open_sources(paths)? {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        terms.extend(parse_wordlist(&text));
    }
    Ok(terms)
}

/// Output lines, prefixed with dice numbers when `numbered`.
pub fn format_numbered(list: &[String], dice_sides: u32, numbered: bool) -> Vec<String> {
    if !numbered {
        return list.to_vec();
    }
    let dice_num = dice_needed(list.len(), dice_sides);
    let separator = default_separator(dice_sides);
    list.iter()
        .enumerate()
        .map(|(i, term)| {
            format!(
                "{}\t{}",
                idx_to_dicenums(i as u64, dice_num, dice_sides, separator),
                term
            )
        })
        .collect()
}
