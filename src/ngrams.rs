//! Token normalization and ngram frequency features

use crate::{
    features::FeatureVector,
    tagged::is_word_char,
    top::{Case, FrequencyTable},
};
use std::{collections::HashSet, sync::OnceLock};

/// Ngram orders that features are computed for, with their feature name
const ORDERS: [(usize, &str); 3] = [(1, "UNI"), (2, "BIGRAM"), (3, "TRIGRAM")];

/// Normalize a token for feature extraction
///
/// Tokens are lowercased. Stop words and tokens without any word character
/// (punctuation) are dropped.
pub fn normalize(token: &str) -> Option<String> {
    let normalized = token.to_lowercase();
    let keep = normalized.chars().any(is_word_char) && !stop_words().contains(normalized.as_str());
    keep.then_some(normalized)
}

/// Binned version of an occurence count: 0, 1, or 3 for "2 and more"
pub fn binning(count: usize) -> usize {
    if count < 2 {
        count
    } else {
        3
    }
}

/// Contiguous ngrams of some order, joined with `_`
///
/// Yields nothing if there are fewer than `order` tokens.
pub fn ngrams<S: AsRef<str>>(tokens: &[S], order: usize) -> impl Iterator<Item = String> + '_ {
    tokens.windows(order.max(1)).map(|window| {
        let mut ngram = String::new();
        for (idx, token) in window.iter().enumerate() {
            if idx > 0 {
                ngram.push('_');
            }
            ngram.push_str(token.as_ref());
        }
        ngram
    })
}

/// Relative frequency features of word unigrams, bigrams and trigrams
///
/// Words are normalized first. Features are named `UNI_word`,
/// `BIGRAM_word1_word2` and `TRIGRAM_word1_word2_word3`, and valued with the
/// frequency of the ngram among all ngrams of the same order.
pub fn word_ngram_features<S: AsRef<str>>(words: &[S]) -> FeatureVector {
    let words = words
        .iter()
        .filter_map(|word| normalize(word.as_ref()))
        .collect::<Vec<_>>();
    ngram_features(&words, "")
}

/// Relative frequency features of tag unigrams, bigrams and trigrams
///
/// Features are named like word features, with a `POS_` infix, e.g.
/// `BIGRAM_POS_DT_NN`. Tags are upper-cased and tags without any word
/// character are dropped.
pub fn pos_ngram_features<S: AsRef<str>>(tags: &[S]) -> FeatureVector {
    let tags = tags
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag| tag.chars().any(is_word_char))
        .map(str::to_uppercase)
        .collect::<Vec<_>>();
    ngram_features(&tags, "POS_")
}

/// Compute ngram features of all supported orders
fn ngram_features(tokens: &[String], infix: &str) -> FeatureVector {
    let mut features = FeatureVector::new();
    for (order, name) in ORDERS {
        let mut table = FrequencyTable::new(Case::Sensitive);
        for ngram in ngrams(tokens, order) {
            table.add(&ngram);
        }
        let total = table.total() as f64;
        for ranked in table.ranked() {
            features.insert(
                format!("{name}_{infix}{}", ranked.item),
                ranked.count as f64 / total,
            );
        }
    }
    features
}

/// English stop words
fn stop_words() -> &'static HashSet<&'static str> {
    static LAZY: OnceLock<HashSet<&'static str>> = OnceLock::new();
    LAZY.get_or_init(|| {
        stop_words::get(stop_words::LANGUAGE::English)
            .iter()
            .copied()
            .collect()
    })
}
