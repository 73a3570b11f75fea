//! Per-document feature vectors for external classifiers

use crate::{
    document::{Document, DocumentId},
    lexicon::{CategoryLexicon, Lexicons, OpinionLexicon, Polarity},
    ngrams, pipeline,
    progress::ProgressReport,
    tagged, Result,
};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;

/// Named features of a document, in name order
pub type FeatureVector = BTreeMap<String, f64>;

/// Combination of features to be extracted
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureSet {
    /// Word ngram frequencies
    #[default]
    WordFeatures,

    /// Word and part-of-speech tag ngram frequencies
    WordPosFeatures,

    /// Word and tag ngrams, plus word category scores
    WordPosLiwcFeatures,

    /// Word and tag ngrams, word category scores, plus opinion words
    WordPosOpinionFeatures,
}
//
impl FeatureSet {
    /// Truth that tag ngram features are included
    pub fn needs_tags(self) -> bool {
        self != Self::WordFeatures
    }

    /// Truth that a word category dictionary is needed
    pub fn needs_categories(self) -> bool {
        matches!(self, Self::WordPosLiwcFeatures | Self::WordPosOpinionFeatures)
    }

    /// Truth that an opinion lexicon is needed
    pub fn needs_opinions(self) -> bool {
        self == Self::WordPosOpinionFeatures
    }
}

/// Feature extractor, bound to the lexicons of the selected feature set
#[derive(Clone, Copy, Debug)]
pub struct FeatureExtractor<'lex> {
    /// Selected feature set
    set: FeatureSet,

    /// Word categories, if needed
    categories: Option<&'lex CategoryLexicon>,

    /// Opinion words, if needed
    opinions: Option<&'lex OpinionLexicon>,
}
//
impl<'lex> FeatureExtractor<'lex> {
    /// Set up feature extraction, checking that required lexicons are loaded
    pub fn new(set: FeatureSet, lexicons: &'lex Lexicons) -> Result<Self> {
        let categories = if set.needs_categories() {
            let categories = lexicons.categories.as_ref();
            anyhow::ensure!(
                categories.is_some(),
                "feature set {set:?} requires a word category dictionary"
            );
            categories
        } else {
            None
        };
        let opinions = if set.needs_opinions() {
            let opinions = lexicons.opinions.as_ref();
            anyhow::ensure!(
                opinions.is_some(),
                "feature set {set:?} requires an opinion lexicon"
            );
            opinions
        } else {
            None
        };
        Ok(Self {
            set,
            categories,
            opinions,
        })
    }

    /// Extract the features of one document
    pub fn extract(&self, document: &Document) -> FeatureVector {
        let tokens = document.lines().flat_map(tagged::tokens).collect::<Vec<_>>();
        let words = tokens.iter().map(|token| token.word).collect::<Vec<_>>();
        let mut features = ngrams::word_ngram_features(&words);
        if self.set.needs_tags() {
            let tags = tokens
                .iter()
                .filter_map(|token| token.tag_code())
                .collect::<Vec<_>>();
            features.extend(ngrams::pos_ngram_features(&tags));
        }
        if let Some(categories) = self.categories {
            features.extend(category_features(categories, &words));
        }
        if let Some(opinions) = self.opinions {
            features.extend(opinion_features(opinions, &words));
        }
        log::trace!("Extracted {} features from document {}", features.len(), document.id);
        features
    }
}

/// Word category percentages, plus an overall emotion flag
fn category_features(categories: &CategoryLexicon, words: &[&str]) -> FeatureVector {
    let scores = categories.score(words);
    let emotion = |name: &str| scores.get(name).copied().unwrap_or(0.0);
    let flag = if emotion("posemo") > emotion("negemo") {
        "liwc:positive"
    } else {
        "liwc:negative"
    };
    scores
        .iter()
        .map(|(name, &score)| (format!("LIWC_{}", name.to_uppercase()), score))
        .chain(std::iter::once((flag.to_owned(), 1.0)))
        .collect()
}

/// Presence of opinion words, plus binned counts of each polarity
fn opinion_features(opinions: &OpinionLexicon, words: &[&str]) -> FeatureVector {
    let mut features = FeatureVector::new();
    let (mut positive, mut negative) = (0, 0);
    for word in words.iter().filter_map(|word| ngrams::normalize(word)) {
        let prefix = match opinions.polarity(&word) {
            Some(Polarity::Positive) => {
                positive += 1;
                "OPINION_POS"
            }
            Some(Polarity::Negative) => {
                negative += 1;
                "OPINION_NEG"
            }
            None => continue,
        };
        features.insert(format!("{prefix}_{}", word.to_uppercase()), 1.0);
    }
    features.insert("OPINION_POS_COUNT".into(), ngrams::binning(positive) as f64);
    features.insert("OPINION_NEG_COUNT".into(), ngrams::binning(negative) as f64);
    features
}

/// Extract the features of each document in parallel
pub fn extract_features(
    documents: &[Document],
    extractor: &FeatureExtractor<'_>,
    report: &ProgressReport,
) -> BTreeMap<DocumentId, FeatureVector> {
    pipeline::per_document(documents, "Extracting features", report, |document| {
        extractor.extract(document)
    })
}
