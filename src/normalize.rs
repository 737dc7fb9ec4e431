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

use std::collections::HashSet;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const TRANSFORMS: &[(char, &str)] = &[
    ('ä', "ae"),
    ('Ä', "AE"),
    ('æ', "ae"),
    ('Æ', "AE"),
    ('ö', "oe"),
    ('Ö', "OE"),
    ('ø', "oe"),
    ('Ø', "OE"),
    ('ü', "ue"),
    ('Ü', "UE"),
    ('ß', "ss"),
];

/// Characters accepted by `--ascii`.
pub fn ascii_allowed() -> HashSet<char> {
    ('a'..='z').chain('A'..='Z').chain('0'..='9').collect()
}

/// Expand umlauts and ligatures, then strip all combining marks from the
/// NFKD form of `text`.
pub fn normalize(text: &str) -> String {
    let mut transformed = String::with_capacity(text.len());
    for c in text.chars() {
        match TRANSFORMS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => transformed.push_str(to),
            None => transformed.push(c),
        }
    }

    transformed
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Yield terms made only of characters in `allowed`. With `None` every term
/// passes.
pub fn filter_chars<'a, I>(
    terms: I,
    allowed: Option<&'a HashSet<char>>,
) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = String>,
    I::IntoIter: 'a,
{
    terms
        .into_iter()
        .enumerate()
        .filter(move |(line, term)| match allowed {
            None => true,
            Some(set) => {
                let ok = term.chars().all(|c| set.contains(&c));
                if !ok {
                    debug!("Not allowed char in line {}", line + 1);
                }
                ok
            }
        })
        .map(|(_, term)| term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_umlauts() {
        assert_eq!(normalize("Äpfel"), "AEpfel");
        assert_eq!(normalize("Öl"), "OEl");
        assert_eq!(normalize("Übel"), "UEbel");
        assert_eq!(normalize("über"), "ueber");
        assert_eq!(normalize("Straße"), "Strasse");
        assert_eq!(normalize("Ærø"), "AEroe");
    }

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("café"), "cafe");
        assert_eq!(normalize("cafe\u{0301}"), "cafe");
        assert_eq!(normalize("niño"), "nino");
        assert_eq!(normalize("Ångström"), "Angstroem");
    }

    #[test]
    fn test_normalize_compat_forms() {
        assert_eq!(normalize("ﬁne"), "fine");
        assert_eq!(normalize("①"), "1");
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("plain"), "plain");
        assert_eq!(normalize("生活"), "生活");
    }

    #[test]
    fn test_filter_chars_none_keeps_all() {
        let terms = vec!["a".to_string(), "ä".to_string(), "b c".to_string()];
        let out: Vec<String> = filter_chars(terms.clone(), None).collect();
        assert_eq!(out, terms);
    }

    #[test]
    fn test_filter_chars_ascii() {
        let allowed = ascii_allowed();
        let terms = vec![
            "foo".to_string(),
            "bär".to_string(),
            "Bar9".to_string(),
            "x-y".to_string(),
        ];
        let out: Vec<String> = filter_chars(terms, Some(&allowed)).collect();
        assert_eq!(out, vec!["foo", "Bar9"]);
    }
}
