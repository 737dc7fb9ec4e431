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

//! Checks for flaws ("flakes") in wordlists.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use crate::dice::is_dice_aligned;

/// Characters easily mistaken for one another when a passphrase is read
/// back from paper or screen.
pub const AMBIGUOUS_CHARS: &[char] = &['0', 'O', '1', 'I', '|'];

fn sorted_unique<'a, I>(terms: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    terms
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// True if no term is a proper prefix of another one.
pub fn is_prefix_code<'a, I>(terms: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let sorted = sorted_unique(terms);
    !sorted.windows(2).any(|pair| pair[1].starts_with(pair[0]))
}

/// All `(prefix, term)` pairs where `prefix` starts `term`.
pub fn find_prefixes<'a, I>(terms: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = &'a str>,
{
    let sorted = sorted_unique(terms);
    let mut pairs = Vec::new();
    for (i, prefix) in sorted.iter().copied().enumerate() {
        for term in sorted[i + 1..].iter().take_while(|t| t.starts_with(prefix)) {
            pairs.push((prefix.to_string(), term.to_string()));
        }
    }
    pairs
}

/// Terms listed more than once.
pub fn find_duplicates<'a, I>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    for term in terms {
        if !seen.insert(term) {
            duplicates.insert(term.to_string());
        }
    }
    duplicates.into_iter().collect()
}

/// Groups of distinct terms that only differ in case.
pub fn find_case_duplicates<'a, I>(terms: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for term in terms {
        groups.entry(term.to_lowercase()).or_default().insert(term);
    }
    groups
        .into_values()
        .filter(|group| group.len() > 1)
        .map(|group| group.into_iter().map(str::to_string).collect())
        .collect()
}

/// Terms with confusable, non-ASCII, whitespace or control characters.
pub fn find_ambiguous<'a, I>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    terms
        .into_iter()
        .filter(|term| {
            term.chars().any(|c| {
                AMBIGUOUS_CHARS.contains(&c) || !c.is_ascii() || c.is_whitespace() || c.is_control()
            })
        })
        .map(str::to_string)
        .collect()
}

fn proper_prefixes(s: &str) -> impl Iterator<Item = (&str, &str)> {
    s.char_indices()
        .skip(1)
        .map(move |(i, _)| (&s[..i], &s[i..]))
}

/// Sardinas-Patterson test: can every concatenation of terms (written
/// without separators) be split back in exactly one way?
pub fn is_uniquely_decodable<'a, I>(terms: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let sorted: Vec<&str> = sorted_unique(terms)
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect();
    let codes: HashSet<&str> = sorted.iter().copied().collect();

    let mut queue: Vec<&str> = Vec::new();
    for term in &sorted {
        for (prefix, suffix) in proper_prefixes(term) {
            if codes.contains(prefix) {
                queue.push(suffix);
            }
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    while let Some(dangling) = queue.pop() {
        if codes.contains(dangling) {
            debug!("Dangling suffix '{}' is a term itself", dangling);
            return false;
        }
        if !seen.insert(dangling) {
            continue;
        }

        // Terms that start with the dangling suffix form a sorted run.
        let start = sorted.partition_point(|t| *t < dangling);
        for term in sorted[start..].iter().take_while(|t| t.starts_with(dangling)) {
            if term.len() > dangling.len() {
                queue.push(&term[dangling.len()..]);
            }
        }

        for (prefix, suffix) in proper_prefixes(dangling) {
            if codes.contains(prefix) {
                queue.push(suffix);
            }
        }
    }
    true
}

/// Bits of entropy a single word drawn from a list of `list_len` terms adds.
pub fn entropy_bits(list_len: usize) -> f64 {
    if list_len == 0 {
        return 0.0;
    }
    (list_len as f64).log2()
}

#[derive(Debug, Clone, Default)]
pub struct FlakeReport {
    pub total: usize,
    pub unique: usize,
    pub min_width: usize,
    pub max_width: usize,
    pub duplicates: Vec<String>,
    pub prefixes: Vec<(String, String)>,
    pub case_duplicates: Vec<Vec<String>>,
    pub ambiguous: Vec<String>,
    pub uniquely_decodable: bool,
    pub entropy_per_word: f64,
    pub dice_sides: u32,
    pub dice_aligned: bool,
}

impl FlakeReport {
    pub fn analyze<S: AsRef<str>>(terms: &[S], dice_sides: u32) -> Self {
        let words = || terms.iter().map(AsRef::<str>::as_ref);
        let widths = words().map(|t| t.chars().count());
        let unique = words().collect::<HashSet<_>>().len();

        Self {
            total: terms.len(),
            unique,
            min_width: widths.clone().min().unwrap_or(0),
            max_width: widths.max().unwrap_or(0),
            duplicates: find_duplicates(words()),
            prefixes: find_prefixes(words()),
            case_duplicates: find_case_duplicates(words()),
            ambiguous: find_ambiguous(words()),
            uniquely_decodable: is_uniquely_decodable(words()),
            entropy_per_word: entropy_bits(unique),
            dice_sides,
            dice_aligned: is_dice_aligned(unique, dice_sides),
        }
    }

    pub fn is_prefix_code(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn has_flakes(&self) -> bool {
        !self.duplicates.is_empty()
            || !self.prefixes.is_empty()
            || !self.case_duplicates.is_empty()
            || !self.ambiguous.is_empty()
            || !self.uniquely_decodable
    }
}
