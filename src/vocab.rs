//! Word tables used to shorten ad titles.
//!
//! All entries are lower case; lookups lower-case the word first.

use std::collections::HashSet;

/// Fabric, material, color and size descriptors.
pub const FEATURE_TERMS: &[&str] = &[
    "busui", "friendly", "bahan", "soft", "ultimate", "ultimates", "motif", "size", "ukuran",
    "promo", "diskon", "broad", "testing", "rayon", "katun", "cotton", "silk", "sutra", "viscose",
    "linen", "polyester", "jersey", "crepe", "chiffon", "woolpeach", "baloteli", "babyterry",
    "pink", "hitam", "black", "putih", "white", "navy", "biru", "blue", "merah", "red", "hijau",
    "green", "coklat", "brown", "abu", "abu-abu", "grey", "gray", "cream", "krem", "beige",
    "maroon", "ungu", "purple", "tosca", "olive", "sage",
];

/// Shop and brand boilerplate.
pub const STORE_TERMS: &[&str] = &[
    "official", "shop", "store", "boutique", "fashion", "my", "zahir", "myzahir", "by",
    "original", "premium",
];

/// Product-type nouns.
pub const CATEGORY_TERMS: &[&str] = &[
    "gamis", "dress", "tunik", "abaya", "set", "blouse", "khimar", "rok", "pashmina", "hijab",
    "outer",
];

/// Campaign and seasonal marketing words.
pub const CONTEXT_TERMS: &[&str] = &[
    "terbaru", "new", "update", "launch", "launching", "viral", "hits", "best", "seller",
    "bestseller", "kondangan", "lebaran", "ramadhan", "ramadan", "harian", "pesta", "formal",
    "casual", "trend", "trending", "populer", "2024", "2025", "2026", "2027", "2028", "2029",
    "2030",
];

/// Strong product nouns; a subset of [`CATEGORY_TERMS`].
pub const PRODUCT_SIGNAL_TERMS: &[&str] = &["dress", "gamis", "set"];

lazy_static::lazy_static! {
    static ref FEATURE: HashSet<&'static str> = FEATURE_TERMS.iter().copied().collect();
    static ref STORE: HashSet<&'static str> = STORE_TERMS.iter().copied().collect();
    static ref CATEGORY: HashSet<&'static str> = CATEGORY_TERMS.iter().copied().collect();
    static ref CONTEXT: HashSet<&'static str> = CONTEXT_TERMS.iter().copied().collect();
    static ref PRODUCT_SIGNAL: HashSet<&'static str> = PRODUCT_SIGNAL_TERMS.iter().copied().collect();
}

/// Classification of a single lower-cased word.
///
/// When a word belongs to several tables the first matching class in
/// declaration order wins (store, feature, context, category).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    Store,
    Feature,
    Context,
    Category,
    Other,
}

impl WordClass {
    pub fn of(word: &str) -> Self {
        if STORE.contains(word) {
            WordClass::Store
        } else if FEATURE.contains(word) {
            WordClass::Feature
        } else if CONTEXT.contains(word) {
            WordClass::Context
        } else if CATEGORY.contains(word) {
            WordClass::Category
        } else {
            WordClass::Other
        }
    }

    /// Contribution of a word of this class to a segment's score.
    pub fn score(self) -> i32 {
        match self {
            WordClass::Store => -3,
            WordClass::Feature => -1,
            WordClass::Context => -2,
            WordClass::Category => 1,
            WordClass::Other => 3,
        }
    }
}

pub fn is_store_term(word: &str) -> bool {
    STORE.contains(word)
}

pub fn is_product_signal(word: &str) -> bool {
    PRODUCT_SIGNAL.contains(word)
}
