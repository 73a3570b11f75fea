//! Supported reports and their computation

use crate::{
    config::Config,
    document::{self, DocumentId},
    features::{self, FeatureExtractor, FeatureSet, FeatureVector},
    lexicon::Lexicons,
    pipeline::{self, DocumentRankings},
    progress::ProgressReport,
    stats::CorpusStats,
    Result,
};
use clap::ValueEnum;
use dialoguer::FuzzySelect;
use serde::Serialize;
use std::{collections::BTreeMap, sync::OnceLock};

/// Kind of report that can be produced from a tagged text
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Most frequent noun phrases of each document
    NounPhrases,

    /// Most frequent part-of-speech tags of each document
    PosTags,

    /// Statistics over the whole corpus
    CorpusStats,

    /// Feature vector of each document
    Features,
}

/// Use the requested report kind, or ask the user to select one
pub fn pick(requested: Option<ReportKind>) -> Result<ReportKind> {
    if let Some(kind) = requested {
        return Ok(kind);
    }
    Ok(prompt()?)
}

/// Ask the user to select a report kind
pub fn prompt() -> dialoguer::Result<ReportKind> {
    let kinds = supported_reports();
    let descriptions = kinds
        .iter()
        .map(|(description, kind)| {
            let name = kind
                .to_possible_value()
                .map(|value| value.get_name().to_owned())
                .unwrap_or_default();
            format!("{description} ({name})")
        })
        .collect::<Vec<_>>();
    let kind_idx = FuzzySelect::new()
        .with_prompt("Which report should I produce?")
        .items(&descriptions)
        .default(0)
        .max_length(usize::MAX)
        .interact()?;
    Ok(kinds[kind_idx].1)
}

/// Every supported report kind, keyed by a human-readable description
fn supported_reports() -> &'static [(&'static str, ReportKind)] {
    static LAZY: OnceLock<Box<[(&'static str, ReportKind)]>> = OnceLock::new();
    LAZY.get_or_init(|| {
        [
            ("Most frequent noun phrases per document", ReportKind::NounPhrases),
            ("Most frequent part-of-speech tags per document", ReportKind::PosTags),
            ("Corpus-wide statistics", ReportKind::CorpusStats),
            ("Feature vectors per document", ReportKind::Features),
        ]
        .into_iter()
        .collect()
    })
}

/// Result of processing a tagged text
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "report", content = "results", rename_all = "kebab-case")]
pub enum Report {
    /// Most frequent noun phrases of each document
    NounPhrases(DocumentRankings),

    /// Most frequent part-of-speech tags of each document
    PosTags(DocumentRankings),

    /// Statistics over the whole corpus
    CorpusStats(CorpusStats),

    /// Feature vector of each document
    Features {
        set: FeatureSet,
        vectors: BTreeMap<DocumentId, FeatureVector>,
    },
}
//
impl Report {
    /// Produce the configured report from a tagged text
    pub fn compute(
        config: &Config,
        tagged_text: &str,
        lexicons: &Lexicons,
        report: &ProgressReport,
    ) -> Result<Self> {
        Ok(match config.report {
            ReportKind::NounPhrases => Self::NounPhrases(pipeline::most_frequent_noun_phrases(
                tagged_text,
                config.top,
                report,
            )),
            ReportKind::PosTags => Self::PosTags(pipeline::most_frequent_pos_tags(
                tagged_text,
                config.top,
                report,
            )),
            ReportKind::CorpusStats => {
                let documents = document::split(tagged_text);
                Self::CorpusStats(CorpusStats::collect(&documents, config.top_tags, report))
            }
            ReportKind::Features => {
                let extractor = FeatureExtractor::new(config.feature_set, lexicons)?;
                let documents = document::split(tagged_text);
                Self::Features {
                    set: config.feature_set,
                    vectors: features::extract_features(&documents, &extractor, report),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{output::OutputFormat, top::TopK};
    use std::path::PathBuf;

    fn config(report: ReportKind) -> Config {
        Config {
            input: PathBuf::from("corpus.txt"),
            report,
            top: TopK::from(2),
            top_tags: TopK::from(1),
            format: OutputFormat::Text,
            feature_set: FeatureSet::WordPosFeatures,
            opinion_lexicon: None,
            liwc_dictionary: None,
        }
    }

    fn compute(kind: ReportKind) -> Report {
        Report::compute(
            &config(kind),
            "A/DT big/JJ dog/NN barked/VBD ./.\n\nCats/NNS purr/VBP ./.\n",
            &Lexicons::default(),
            &ProgressReport::new(),
        )
        .unwrap()
    }

    #[test]
    fn requested_kind_is_used() {
        assert_eq!(pick(Some(ReportKind::PosTags)).unwrap(), ReportKind::PosTags);
    }

    #[test]
    fn every_kind_is_selectable() {
        let kinds = supported_reports()
            .iter()
            .map(|(_, kind)| *kind)
            .collect::<Vec<_>>();
        assert_eq!(kinds, ReportKind::value_variants());
    }

    #[test]
    fn reports() {
        let Report::NounPhrases(phrases) = compute(ReportKind::NounPhrases) else {
            panic!("expected noun phrases");
        };
        assert_eq!(phrases.len(), 2);
        assert_eq!(&*phrases[&DocumentId::FIRST][0].item, "a big dog");

        let Report::PosTags(tags) = compute(ReportKind::PosTags) else {
            panic!("expected tags");
        };
        assert_eq!(tags[&DocumentId::FIRST].len(), 2);

        let Report::CorpusStats(stats) = compute(ReportKind::CorpusStats) else {
            panic!("expected statistics");
        };
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.top_tags.len(), 1);

        let Report::Features { set, vectors } = compute(ReportKind::Features) else {
            panic!("expected features");
        };
        assert_eq!(set, FeatureSet::WordPosFeatures);
        assert!(vectors[&DocumentId::FIRST].contains_key("UNI_POS_JJ"));
    }
}
