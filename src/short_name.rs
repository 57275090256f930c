//! Short display names for ad titles.
//!
//! Seller ad titles are keyword-stuffed ("[SB] Gamis Rayon Premium - Toko ABC
//! - Dress Biru Elegan"). For the summary sheet we want the few words that
//! identify the product variant ("Dress Biru Elegan").

use crate::vocab::{is_product_signal, is_store_term, WordClass};
use regex::Regex;

/// Maximum number of words kept in a short name.
pub const MAX_WORDS: usize = 3;

lazy_static::lazy_static! {
    static ref BRACKET_TAG: Regex = Regex::new(r"\[.*?\]").unwrap();
    static ref SEGMENT_SEPARATOR: Regex = Regex::new(r"\s*[-|]\s*").unwrap();
    static ref AGGREGATE_TITLE: Regex = Regex::new(r"^\s*grup\b").unwrap();
}

/// Prefix marking an ad-group title (compared case-insensitively).
const GROUP_PREFIX: &str = "grup iklan";

/// True when the title names an ad group rather than a single product ad.
pub fn is_aggregate_title(title: &str) -> bool {
    AGGREGATE_TITLE.is_match(&title.to_lowercase())
}

/// Derive a short product label (at most [`MAX_WORDS`] words) from an ad title.
pub fn short_name(title: &str) -> String {
    let text = title.trim();

    if text.to_lowercase().starts_with(GROUP_PREFIX) {
        return match text.split_once(" - ") {
            Some((head, _)) => head.to_string(),
            None => text.to_string(),
        };
    }

    let stripped = BRACKET_TAG.replace_all(text, "");
    let segments: Vec<&str> = SEGMENT_SEPARATOR.split(stripped.trim()).collect();

    if let Some(words) = segments.iter().filter_map(|s| product_candidate(s)).last() {
        return join_first_words(&words);
    }

    // No segment names a product outright: pick the most product-like one.
    let mut best: Option<(&str, i32)> = None;
    for segment in segments.iter().copied() {
        let score = segment_score(segment);
        // strict comparison keeps the earliest segment on ties
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((segment, score)),
        }
    }
    match best {
        Some((segment, _)) => join_first_words(&segment.split_whitespace().collect::<Vec<_>>()),
        None => String::new(),
    }
}

/// Words of a segment that contains a product signal, minus leading shop
/// boilerplate, provided at least one distinctive word remains.
fn product_candidate(segment: &str) -> Option<Vec<&str>> {
    let words: Vec<&str> = segment.split_whitespace().collect();
    let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

    if !lower.iter().any(|w| is_product_signal(w)) {
        return None;
    }

    let skip = lower.iter().take_while(|w| is_store_term(w)).count();
    let distinctive = lower[skip..]
        .iter()
        .any(|w| WordClass::of(w) == WordClass::Other);

    if distinctive {
        Some(words[skip..].to_vec())
    } else {
        None
    }
}

fn segment_score(segment: &str) -> i32 {
    segment
        .to_lowercase()
        .split_whitespace()
        .map(|w| WordClass::of(w).score())
        .sum()
}

fn join_first_words(words: &[&str]) -> String {
    words
        .iter()
        .take(MAX_WORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
