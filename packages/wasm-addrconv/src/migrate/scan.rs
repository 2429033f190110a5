//! Detection and replacement of legacy addresses in text.

use crate::address::{convert_address, AddressError, OldPrefix};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};

/// Matches anything shaped like a legacy bech32m string: a legacy prefix, the
/// `1` separator and at least a checksum worth of data characters.
///
/// Case is ignored, so all-uppercase addresses are found too; mixed-case
/// matches are then rejected by the decoder and reported. Matches must sit on
/// ASCII word boundaries: an address directly preceded or followed by an ASCII
/// letter, digit or `_` (e.g. `latest1...` or `<address>_balance`) is not
/// picked up.
pub static LEGACY_ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    let mut prefixes: Vec<&str> = OldPrefix::ALL.iter().map(|p| p.as_str()).collect();
    // longest first, so that `ppatest` wins over `patest`
    prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));
    let pattern = format!(
        r"(?-u:\b)(?i:(?:{})1[qpzry9x8gf2tvdw0s3jn54khce6mua7l]{{6,}})(?-u:\b)",
        prefixes.join("|")
    );
    Regex::new(&pattern).expect("legacy address pattern is valid")
});

/// Result of scanning one file's content.
#[derive(Debug, Default)]
pub struct Rewrite {
    /// New content, if at least one address was replaced.
    pub content: Option<String>,
    /// Number of replaced occurrences.
    pub substitutions: usize,
    /// Distinct matches that could not be converted, left as they were.
    pub failures: Vec<(String, AddressError)>,
}

/// Find every legacy address in `content` and replace it with its conversion.
///
/// Each distinct match is converted once. Matches that fail to convert are
/// reported and kept unchanged; they never prevent the other replacements.
pub fn rewrite_content(content: &str) -> Rewrite {
    let mut replacements: HashMap<&str, String> = HashMap::new();
    let mut rejected: HashSet<&str> = HashSet::new();
    let mut failures = Vec::new();

    for m in LEGACY_ADDRESS_REGEX.find_iter(content) {
        let old = m.as_str();
        if replacements.contains_key(old) || rejected.contains(old) {
            continue;
        }
        match convert_address(old) {
            Ok(new) => {
                tracing::debug!("{} -> {}", old, new);
                replacements.insert(old, new);
            }
            Err(e) => {
                rejected.insert(old);
                failures.push((old.to_string(), e));
            }
        }
    }

    if replacements.is_empty() {
        return Rewrite {
            content: None,
            substitutions: 0,
            failures,
        };
    }

    let mut substitutions = 0;
    let rewritten = LEGACY_ADDRESS_REGEX
        .replace_all(content, |caps: &Captures| {
            let old = &caps[0];
            match replacements.get(old) {
                Some(new) => {
                    substitutions += 1;
                    new.clone()
                }
                None => old.to_string(),
            }
        })
        .into_owned();

    Rewrite {
        content: Some(rewritten),
        substitutions,
        failures,
    }
}
