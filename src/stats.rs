//! Corpus-wide usage statistics

use crate::{
    document::Document,
    progress::{ProgressConfig, ProgressReport, Work},
    tagged::{self, TaggedToken},
    top::{Case, FrequencyTable, Ranked, Ranking, TopK},
};
use serde::Serialize;
use std::collections::{hash_map, BTreeMap, HashMap};

/// Tags for which the most frequent word is reported
pub const TAGS_OF_INTEREST: [&str; 4] = ["NN", "VBD", "JJ", "RB"];

/// Cumulative knowledge about a tagged corpus
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorpusStats {
    /// Number of documents
    pub documents: usize,

    /// Number of well-formed tagged tokens, punctuation included
    pub tokens: usize,

    /// Number of distinct words, ignoring case
    pub vocabulary: usize,

    /// Most frequent tags, most frequent first
    pub top_tags: Vec<TagShare>,

    /// Most frequent (lowercase) word for each tag of [`TAGS_OF_INTEREST`]
    /// that occurs in the corpus
    pub top_word_by_tag: BTreeMap<Box<str>, Ranked>,

    /// Every (lowercase) word, most frequent first
    pub word_frequencies: Ranking,
}
//
impl CorpusStats {
    /// Compute statistics over a set of documents
    pub fn collect(documents: &[Document], top_tags: TopK, report: &ProgressReport) -> Self {
        let progress = report.add(
            "Collecting corpus statistics",
            ProgressConfig::new(Work::Steps(documents.len())).dont_show_rate_eta(),
        );
        let mut builder = CorpusStatsBuilder::new();
        for document in documents {
            for token in document.lines().flat_map(tagged::tokens) {
                builder.add_token(token);
            }
            progress.make_progress(1);
        }
        builder.finish(documents.len(), top_tags)
    }
}

/// Tag along with its absolute and relative frequency
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TagShare {
    /// Tag code
    pub tag: Box<str>,

    /// Number of occurences
    pub count: usize,

    /// Share of all corpus tokens, rounded to 3 decimals
    pub relative_frequency: f64,
}

/// Accumulator of corpus statistics
#[derive(Debug)]
struct CorpusStatsBuilder {
    /// Number of tokens seen so far
    tokens: usize,

    /// Case-insensitive word counts
    words: FrequencyTable,

    /// Tag code counts
    tags: FrequencyTable,

    /// Case-insensitive word counts for each tag of interest
    words_by_tag: HashMap<&'static str, FrequencyTable>,
}
//
impl CorpusStatsBuilder {
    /// Set up the accumulator
    fn new() -> Self {
        Self {
            tokens: 0,
            words: FrequencyTable::new(Case::Insensitive),
            tags: FrequencyTable::new(Case::Sensitive),
            words_by_tag: HashMap::new(),
        }
    }

    /// Integrate a new token
    fn add_token(&mut self, token: TaggedToken<'_>) {
        self.tokens += 1;
        self.words.add(token.word);
        let Some(tag) = token.tag_code() else {
            log::trace!("Counted {token:?} without a tag code");
            return;
        };
        self.tags.add(tag);
        let Some(&tag) = TAGS_OF_INTEREST.iter().find(|&&interesting| interesting == tag) else {
            return;
        };
        match self.words_by_tag.entry(tag) {
            hash_map::Entry::Occupied(o) => o.into_mut().add(token.word),
            hash_map::Entry::Vacant(v) => v
                .insert(FrequencyTable::new(Case::Insensitive))
                .add(token.word),
        }
    }

    /// Export final statistics
    fn finish(self, documents: usize, top_tags: TopK) -> CorpusStats {
        let tokens = self.tokens;
        let top_tags = (self.tags.top(top_tags).into_iter())
            .map(|Ranked { item, count }| TagShare {
                tag: item,
                count,
                relative_frequency: (count as f64 / tokens as f64 * 1000.0).round() / 1000.0,
            })
            .collect();
        let top_word_by_tag = (self.words_by_tag.into_iter())
            .filter_map(|(tag, words)| {
                let top = words.top(TopK::from(1)).into_iter().next()?;
                Some((Box::from(tag), top))
            })
            .collect();
        log::debug!(
            "Collected statistics over {tokens} tokens and {} distinct words",
            self.words.len()
        );
        CorpusStats {
            documents,
            tokens,
            vocabulary: self.words.len(),
            top_tags,
            top_word_by_tag,
            word_frequencies: self.words.ranked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;

    const CORPUS: &str = "\
The/DT cat/NN sat/VBD ./.
the/DT Cat/NN ran/VBD quickly/RB ./.

A/DT dog/NN barked/VBD ./.
";

    fn stats(text: &str, top_tags: usize) -> CorpusStats {
        CorpusStats::collect(&document::split(text), TopK::from(top_tags), &ProgressReport::new())
    }

    #[test]
    fn counts() {
        let stats = stats(CORPUS, 2);
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.tokens, 13);
        // the cat sat . ran quickly a dog barked
        assert_eq!(stats.vocabulary, 9);
    }

    #[test]
    fn tag_shares() {
        let stats = stats(CORPUS, 2);
        assert_eq!(
            stats.top_tags,
            [
                TagShare {
                    tag: "DT".into(),
                    count: 3,
                    relative_frequency: 0.231
                },
                TagShare {
                    tag: "NN".into(),
                    count: 3,
                    relative_frequency: 0.231
                },
            ]
        );
    }

    #[test]
    fn words() {
        let stats = stats(CORPUS, 2);
        assert_eq!(
            stats.word_frequencies[..3],
            [Ranked::new(".", 3), Ranked::new("the", 2), Ranked::new("cat", 2)]
        );
        assert_eq!(stats.top_word_by_tag["NN"], Ranked::new("cat", 2));
        assert_eq!(stats.top_word_by_tag["VBD"], Ranked::new("sat", 1));
        assert_eq!(stats.top_word_by_tag["RB"], Ranked::new("quickly", 1));
        assert!(!stats.top_word_by_tag.contains_key("JJ"));
    }

    #[test]
    fn empty_corpus() {
        let stats = stats("", 10);
        assert_eq!(stats.tokens, 0);
        assert_eq!(stats.vocabulary, 0);
        assert!(stats.top_tags.is_empty());
        assert!(stats.word_frequencies.is_empty());
    }
}
