//! Processing pipeline configuration

use crate::{
    features::FeatureSet, output::OutputFormat, report::ReportKind, top::TopK, Args,
};
use std::{path::PathBuf, sync::Arc};

/// Final process configuration
///
/// This is the result of combining digested [`Args`] with the selected
/// report kind. Please refer to [`Args`] to know more about common fields.
#[allow(missing_docs)]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    /// Report to be produced
    pub report: ReportKind,

    // Other fields have the same meaning as in Args
    pub input: PathBuf,
    pub top: TopK,
    pub top_tags: TopK,
    pub format: OutputFormat,
    pub feature_set: FeatureSet,
    pub opinion_lexicon: Option<PathBuf>,
    pub liwc_dictionary: Option<PathBuf>,
}
//
impl Config {
    /// Determine process configuration from initialization products
    pub(crate) fn new(args: Args, report: ReportKind) -> Arc<Self> {
        let Args {
            input,
            report: _,
            top,
            top_tags,
            format,
            feature_set,
            opinion_lexicon,
            liwc_dictionary,
        } = args;
        Arc::new(Self {
            report,
            input,
            top,
            top_tags,
            format,
            feature_set,
            opinion_lexicon,
            liwc_dictionary,
        })
    }
}
