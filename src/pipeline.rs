//! Per-document frequency reports over a tagged text

use crate::{
    chunk,
    document::{self, Document, DocumentId},
    progress::{ProgressConfig, ProgressReport, Work},
    tagged,
    top::{self, Case, Ranking, TopK},
};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Ranking of each document, in document order
pub type DocumentRankings = BTreeMap<DocumentId, Ranking>;

/// Most frequent noun phrases of each document of a tagged text
///
/// Noun phrases are compared case-insensitively and reported in lowercase.
pub fn most_frequent_noun_phrases(
    tagged_text: &str,
    k: TopK,
    report: &ProgressReport,
) -> DocumentRankings {
    let documents = document::split(tagged_text);
    per_document(&documents, "Ranking noun phrases", report, |document| {
        let phrases = document.lines().flat_map(chunk::extract_noun_phrases);
        top::top_k(phrases, k, Case::Insensitive)
    })
}

/// Most frequent part-of-speech tags of each document of a tagged text
///
/// Tags are compared case-sensitively.
pub fn most_frequent_pos_tags(
    tagged_text: &str,
    k: TopK,
    report: &ProgressReport,
) -> DocumentRankings {
    let documents = document::split(tagged_text);
    per_document(&documents, "Ranking part-of-speech tags", report, |document| {
        let tags = document.lines().flat_map(tagged::extract_tags);
        top::top_k(tags, k, Case::Sensitive)
    })
}

/// Process documents independently and in parallel, keeping track of progress
pub fn per_document<T: Send>(
    documents: &[Document],
    what: &'static str,
    report: &ProgressReport,
    process: impl Fn(&Document) -> T + Sync,
) -> BTreeMap<DocumentId, T> {
    let progress = report.add(
        what,
        ProgressConfig::new(Work::PercentSteps(documents.len())),
    );
    documents
        .par_iter()
        .map(|document| {
            let result = process(document);
            progress.make_progress(1);
            (document.id, result)
        })
        .collect()
}
