//! Report serialization

use crate::{
    report::Report,
    top::{Ranked, Ranking},
    Result,
};
use clap::ValueEnum;
use std::fmt::{self, Display, Write as _};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Serialization format of the final report
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sentences
    #[default]
    Text,

    /// Tab-separated `scope`, `key` and `value` columns
    Tsv,

    /// Pretty-printed JSON
    Json,
}

/// Write a report to some output in the requested format
pub async fn write_report(
    report: &Report,
    format: OutputFormat,
    output: impl AsyncWrite + Unpin,
) -> Result<()> {
    let bytes = match format {
        OutputFormat::Text => render_text(report)?.into_bytes(),
        OutputFormat::Tsv => render_tsv(report)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_vec_pretty(report)?;
            json.push(b'\n');
            json
        }
    };
    let mut output = BufWriter::new(output);
    output.write_all(&bytes).await?;
    output.flush().await?;
    Ok(())
}

/// Render a report as human-readable text
pub fn render_text(report: &Report) -> Result<String, fmt::Error> {
    let mut text = String::new();
    match report {
        Report::NounPhrases(rankings) => {
            for (id, ranking) in rankings {
                writeln!(
                    text,
                    "The most frequent noun phrases in document[{id}]: {}",
                    list(ranking)
                )?;
            }
        }
        Report::PosTags(rankings) => {
            for (id, ranking) in rankings {
                writeln!(
                    text,
                    "The most frequent part-of-speech tags in document[{id}]: {}",
                    list(ranking)
                )?;
            }
        }
        Report::CorpusStats(stats) => {
            writeln!(text, "Number of documents: {}", stats.documents)?;
            writeln!(text, "Number of tokens: {}", stats.tokens)?;
            writeln!(text, "Vocabulary size: {}", stats.vocabulary)?;
            if let Some(top) = stats.top_tags.first() {
                writeln!(
                    text,
                    "The most frequent part-of-speech tag is {} with frequency {}",
                    top.tag, top.count
                )?;
            }
            writeln!(text, "The most frequent part-of-speech tags:")?;
            for share in &stats.top_tags {
                writeln!(
                    text,
                    "  {}\t{}\t{:.3}",
                    share.tag, share.count, share.relative_frequency
                )?;
            }
            for (tag, Ranked { item, count }) in &stats.top_word_by_tag {
                writeln!(
                    text,
                    "The most frequent word in the {tag} category is '{item}' ({count})"
                )?;
            }
            writeln!(text, "Word frequencies:")?;
            for Ranked { item, count } in &stats.word_frequencies {
                writeln!(text, "  {item}\t{count}")?;
            }
        }
        Report::Features { set: _, vectors } => {
            for (id, vector) in vectors {
                write!(text, "Features of document[{id}]:")?;
                for (idx, (name, value)) in vector.iter().enumerate() {
                    let separator = if idx == 0 { " " } else { ", " };
                    write!(text, "{separator}{name}={value}")?;
                }
                writeln!(text)?;
            }
        }
    }
    Ok(text)
}

/// Render a ranking as a comma-separated list
fn list(ranking: &Ranking) -> String {
    if ranking.is_empty() {
        return "none".to_owned();
    }
    ranking
        .iter()
        .map(|Ranked { item, count }| format!("{item} ({count})"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a report as tab-separated values
pub fn render_tsv(report: &Report) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(Vec::new());
    writer.write_record(["scope", "key", "value"])?;
    let mut row = |scope: &dyn Display, key: &str, value: &dyn Display| {
        writer.write_record([scope.to_string(), key.to_owned(), value.to_string()])
    };
    match report {
        Report::NounPhrases(rankings) | Report::PosTags(rankings) => {
            for (id, ranking) in rankings {
                for Ranked { item, count } in ranking {
                    row(id, item, count)?;
                }
            }
        }
        Report::CorpusStats(stats) => {
            row(&"corpus", "documents", &stats.documents)?;
            row(&"corpus", "tokens", &stats.tokens)?;
            row(&"corpus", "vocabulary", &stats.vocabulary)?;
            for share in &stats.top_tags {
                row(&"tag", &share.tag, &share.count)?;
                row(&"tag-share", &share.tag, &share.relative_frequency)?;
            }
            for (tag, Ranked { item, count }) in &stats.top_word_by_tag {
                row(&format!("top-word:{tag}"), item, count)?;
            }
            for Ranked { item, count } in &stats.word_frequencies {
                row(&"word", item, count)?;
            }
        }
        Report::Features { set: _, vectors } => {
            for (id, vector) in vectors {
                for (name, value) in vector {
                    row(id, name, value)?;
                }
            }
        }
    }
    writer.flush()?;
    let tsv = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(tsv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::DocumentId,
        features::{FeatureSet, FeatureVector},
        stats::{CorpusStats, TagShare},
    };
    use std::collections::BTreeMap;

    /// Rankings keyed by document, used when building reports by hand
    fn rankings<const N: usize>(
        documents: [&[(&str, usize)]; N],
    ) -> BTreeMap<DocumentId, Ranking> {
        let mut id = DocumentId::FIRST;
        let mut result = BTreeMap::new();
        for document in documents {
            let ranking = document
                .iter()
                .map(|&(item, count)| Ranked::new(item, count))
                .collect();
            result.insert(id, ranking);
            id = id.next();
        }
        result
    }

    fn noun_phrases() -> Report {
        Report::NounPhrases(rankings([
            &[("the donkey", 6), ("the mule", 3), ("load", 2)],
            &[],
        ]))
    }

    fn corpus_stats() -> Report {
        Report::CorpusStats(CorpusStats {
            documents: 1,
            tokens: 4,
            vocabulary: 3,
            top_tags: vec![TagShare {
                tag: "NN".into(),
                count: 2,
                relative_frequency: 0.5,
            }],
            top_word_by_tag: [("NN".into(), Ranked::new("cat", 2))].into_iter().collect(),
            word_frequencies: vec![Ranked::new("cat", 2), Ranked::new("the", 1)],
        })
    }

    #[test]
    fn text() {
        assert_eq!(
            render_text(&noun_phrases()).unwrap(),
            concat!(
                "The most frequent noun phrases in document[1]: ",
                "the donkey (6), the mule (3), load (2)\n",
                "The most frequent noun phrases in document[2]: none\n",
            )
        );
        let stats = render_text(&corpus_stats()).unwrap();
        assert!(stats.contains("Number of tokens: 4\n"));
        assert!(stats.contains("The most frequent part-of-speech tag is NN with frequency 2\n"));
        assert!(stats.contains("  NN\t2\t0.500\n"));
        assert!(stats.contains("The most frequent word in the NN category is 'cat' (2)\n"));
        assert!(stats.ends_with("Word frequencies:\n  cat\t2\n  the\t1\n"));

        let vectors = [(
            DocumentId::FIRST,
            FeatureVector::from([("UNI_cat".to_owned(), 0.5), ("UNI_dog".to_owned(), 0.25)]),
        )]
        .into_iter()
        .collect();
        let features = Report::Features {
            set: FeatureSet::WordFeatures,
            vectors,
        };
        assert_eq!(
            render_text(&features).unwrap(),
            "Features of document[1]: UNI_cat=0.5, UNI_dog=0.25\n"
        );
    }

    #[test]
    fn tsv() {
        let tsv = String::from_utf8(render_tsv(&noun_phrases()).unwrap()).unwrap();
        assert_eq!(
            tsv,
            "scope\tkey\tvalue\n1\tthe donkey\t6\n1\tthe mule\t3\n1\tload\t2\n"
        );
        let tsv = String::from_utf8(render_tsv(&corpus_stats()).unwrap()).unwrap();
        assert!(tsv.contains("corpus\tvocabulary\t3\n"));
        assert!(tsv.contains("tag-share\tNN\t0.5\n"));
        assert!(tsv.contains("top-word:NN\tcat\t2\n"));
        assert!(tsv.ends_with("word\tthe\t1\n"));
    }

    #[test]
    fn json() {
        let vectors = [(DocumentId::FIRST, FeatureVector::from([("UNI_zebra".to_owned(), 0.5)]))]
            .into_iter()
            .collect();
        let report = Report::Features {
            set: FeatureSet::WordFeatures,
            vectors,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "report": "features",
                "results": {
                    "set": "word-features",
                    "vectors": { "1": { "UNI_zebra": 0.5 } }
                }
            })
        );
    }

    #[tokio::test]
    async fn writing() {
        let mut output = Vec::new();
        write_report(&noun_phrases(), OutputFormat::Json, &mut output)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["report"], "noun-phrases");
        assert_eq!(json["results"]["1"][0]["item"], "the donkey");
        assert_eq!(json["results"]["2"], serde_json::json!([]));
    }
}
