//! Frequency reports over part-of-speech tagged text
//!
//! The input is text that was already run through a part-of-speech tagger,
//! with one `word/TAG` unit per token, units separated by single spaces, and
//! documents separated by a blank line. From it, this program computes the
//! most frequent noun phrases or tags of each document, corpus-wide statistics,
//! or per-document feature vectors for an external classifier.

mod chunk;
mod config;
mod document;
mod error;
mod features;
mod input;
mod lexicon;
mod ngrams;
mod output;
mod pipeline;
mod progress;
mod report;
mod stats;
mod tagged;
mod top;

use crate::{
    config::Config,
    features::FeatureSet,
    lexicon::Lexicons,
    output::OutputFormat,
    progress::ProgressReport,
    report::{Report, ReportKind},
    top::TopK,
};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Rank noun phrases, part-of-speech tags and other features of tagged text
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Tagged text file, optionally gzip-compressed (.gz)
    input: PathBuf,

    /// Report to be produced
    ///
    /// Will interactively prompt for a report if not specified.
    #[arg(short, long, value_enum, default_value = None)]
    report: Option<ReportKind>,

    /// Number of noun phrases or tags to be reported per document
    ///
    /// Documents with fewer distinct items report all of them. Items with
    /// the same number of occurences are reported in order of first
    /// appearance within the document.
    #[arg(short = 'k', long, default_value = "3", allow_negative_numbers = true)]
    top: TopK,

    /// Number of tags to be listed in corpus statistics
    #[arg(long, default_value = "10", allow_negative_numbers = true)]
    top_tags: TopK,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Features to be extracted by the features report
    #[arg(long, value_enum, default_value_t = FeatureSet::WordFeatures)]
    feature_set: FeatureSet,

    /// Directory holding the positive-words.txt and negative-words.txt
    /// opinion word lists
    ///
    /// Required by the word-pos-opinion-features feature set.
    #[arg(long)]
    opinion_lexicon: Option<PathBuf>,

    /// Word category dictionary, in LIWC .dic format
    ///
    /// Required by the word-pos-liwc-features and word-pos-opinion-features
    /// feature sets.
    #[arg(long)]
    liwc_dictionary: Option<PathBuf>,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        // Decode CLI arguments
        let args = Args::parse();

        // Check CLI arguments for basic sanity
        if args.feature_set.needs_categories() {
            anyhow::ensure!(
                args.liwc_dictionary.is_some(),
                "feature set {:?} requires a word category dictionary (--liwc-dictionary)",
                args.feature_set
            );
        }
        if args.feature_set.needs_opinions() {
            anyhow::ensure!(
                args.opinion_lexicon.is_some(),
                "feature set {:?} requires an opinion lexicon (--opinion-lexicon)",
                args.feature_set
            );
        }
        Ok(args)
    }
}
//
#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments
    let args = Args::parse_and_check()?;

    // Pick a report
    let report_kind = report::pick(args.report)?;
    let config = Config::new(args, report_kind);
    log::debug!("Running with {config:#?}");

    // Load lexicons once, they are only read from then on
    let lexicons = Lexicons::load(&config).await?;

    // Set up progress reporting
    let report = ProgressReport::new();

    // Load the tagged text and process it on the rayon thread pool
    let tagged_text = input::read_tagged_text(&config.input, &report).await?;
    let result = {
        let config = config.clone();
        let report = report.clone();
        tokio::task::spawn_blocking(move || {
            Report::compute(&config, &tagged_text, &lexicons, &report)
        })
        .await??
    };

    // Display the report
    output::write_report(&result, config.format, tokio::io::stdout()).await?;
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        Some("tagrank"),
    )
}
