//! Read-only word lexicons used for feature extraction
//!
//! Lexicons are loaded once at startup from user-provided files, bundled into
//! [`Lexicons`], and then passed by reference to whatever needs them. There is
//! no global lexicon state.

use crate::{config::Config, error::Error, Result};
use anyhow::Context;
use std::{
    collections::{hash_map, BTreeMap, HashMap},
    path::Path,
};
use unicase::UniCase;

/// Every lexicon that was configured for this run
#[derive(Clone, Debug, Default)]
pub struct Lexicons {
    /// Positive and negative opinion words
    pub opinions: Option<OpinionLexicon>,

    /// Word category dictionary
    pub categories: Option<CategoryLexicon>,
}
//
impl Lexicons {
    /// Load all configured lexicons
    pub async fn load(config: &Config) -> Result<Self> {
        let opinions = match &config.opinion_lexicon {
            Some(dir) => Some(OpinionLexicon::load(dir).await?),
            None => None,
        };
        let categories = match &config.liwc_dictionary {
            Some(path) => Some(CategoryLexicon::load(path).await?),
            None => None,
        };
        Ok(Self {
            opinions,
            categories,
        })
    }
}

/// Sentiment carried by an opinion word
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Lists of positive and negative opinion words
///
/// Words are looked up case-insensitively. Words which appear in both lists
/// are kept, but have no polarity.
#[derive(Clone, Debug, Default)]
pub struct OpinionLexicon(HashMap<UniCase<Box<str>>, Option<Polarity>>);
//
impl OpinionLexicon {
    /// Name of the positive word list within a lexicon directory
    pub const POSITIVE_FILE: &'static str = "positive-words.txt";

    /// Name of the negative word list within a lexicon directory
    pub const NEGATIVE_FILE: &'static str = "negative-words.txt";

    /// Build from the contents of the two word lists
    ///
    /// Lists have one word per line. Blank lines and lines starting with `;`
    /// are ignored.
    pub fn parse(positive: &str, negative: &str) -> Self {
        let mut polarities = HashMap::new();
        for (list, polarity) in [(positive, Polarity::Positive), (negative, Polarity::Negative)] {
            let words = list
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with(';'));
            for word in words {
                match polarities.entry(UniCase::new(Box::<str>::from(word))) {
                    hash_map::Entry::Occupied(o) => {
                        let known = o.into_mut();
                        if *known != Some(polarity) {
                            log::trace!("Opinion word {word:?} has conflicting polarities");
                            *known = None;
                        }
                    }
                    hash_map::Entry::Vacant(v) => {
                        v.insert(Some(polarity));
                    }
                }
            }
        }
        Self(polarities)
    }

    /// Load the word lists from a lexicon directory
    pub async fn load(dir: &Path) -> Result<Self> {
        let positive = read_lossy(&dir.join(Self::POSITIVE_FILE)).await?;
        let negative = read_lossy(&dir.join(Self::NEGATIVE_FILE)).await?;
        let lexicon = Self::parse(&positive, &negative);
        log::info!("Loaded {} opinion words from {}", lexicon.len(), dir.display());
        Ok(lexicon)
    }

    /// Polarity of a word, if it is an unambiguous opinion word
    pub fn polarity(&self, word: &str) -> Option<Polarity> {
        self.0.get(&UniCase::new(Box::from(word))).copied().flatten()
    }

    /// Number of known words
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Dictionary mapping words to categories, in LIWC `.dic` format
///
/// The file starts with a header, delimited by `%` lines, which maps numerical
/// category identifiers to category names. Every following line is a word
/// pattern followed by the identifiers of its categories. Patterns ending with
/// `*` match any word with that prefix.
#[derive(Clone, Debug, Default)]
pub struct CategoryLexicon {
    /// Category names, indexed by category
    names: Box<[Box<str>]>,

    /// Categories of exact word patterns
    words: HashMap<UniCase<Box<str>>, Box<[usize]>>,

    /// Categories of lowercase prefix patterns
    prefixes: Vec<(Box<str>, Box<[usize]>)>,
}
//
impl CategoryLexicon {
    /// Parse a dictionary
    pub fn parse(dic: &str) -> Result<Self, Error> {
        let mut lines = dic
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());
        let malformed = |line, message: &str| Error::Lexicon {
            line,
            message: message.to_owned(),
        };

        // Parse the category header
        match lines.next() {
            Some((_, "%")) => {}
            Some((line, _)) => return Err(malformed(line, "expected '%' at start of header")),
            None => return Err(malformed(1, "dictionary is empty")),
        }
        let mut names = Vec::new();
        let mut ids = HashMap::new();
        let mut header_closed = false;
        for (line, content) in lines.by_ref() {
            if content == "%" {
                header_closed = true;
                break;
            }
            let (id, name) = content
                .split_once(char::is_whitespace)
                .ok_or_else(|| malformed(line, "expected category identifier and name"))?;
            let id = id
                .parse::<u32>()
                .map_err(|_| malformed(line, "category identifier is not a number"))?;
            ids.insert(id, names.len());
            names.push(Box::<str>::from(name.trim()));
        }
        if !header_closed {
            return Err(malformed(dic.lines().count(), "unterminated category header"));
        }

        // Parse word patterns
        let mut lexicon = Self {
            names: names.into(),
            ..Self::default()
        };
        for (line, content) in lines {
            // Patterns may contain spaces when they are tab-separated
            let (pattern, categories) = content
                .split_once('\t')
                .or_else(|| content.split_once(char::is_whitespace))
                .ok_or_else(|| malformed(line, "word pattern has no category"))?;
            let mut indices = Vec::new();
            for id in categories.split_whitespace() {
                let Ok(id) = id.parse::<u32>() else {
                    log::debug!("Ignoring unsupported category reference {id:?} at line {line}");
                    continue;
                };
                let index = ids
                    .get(&id)
                    .ok_or_else(|| malformed(line, &format!("unknown category {id}")))?;
                indices.push(*index);
            }
            let indices = indices.into_boxed_slice();
            if let Some(prefix) = pattern.strip_suffix('*') {
                lexicon.prefixes.push((prefix.to_lowercase().into(), indices));
            } else {
                lexicon.words.insert(UniCase::new(pattern.into()), indices);
            }
        }
        Ok(lexicon)
    }

    /// Load a dictionary file
    pub async fn load(path: &Path) -> Result<Self> {
        let dic = read_lossy(path).await?;
        let lexicon = Self::parse(&dic)
            .with_context(|| format!("parsing word categories from {}", path.display()))?;
        log::info!(
            "Loaded {} word categories with {} patterns from {}",
            lexicon.names.len(),
            lexicon.words.len() + lexicon.prefixes.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Names of all categories, in dictionary order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|name| &**name)
    }

    /// Names of the categories that a word belongs to
    ///
    /// Exact patterns take precedence over prefix patterns, and among prefix
    /// patterns the longest one wins.
    pub fn categories(&self, word: &str) -> impl Iterator<Item = &str> {
        self.lookup(word).iter().map(move |&index| &*self.names[index])
    }

    /// Percentage of words which belong to each category
    pub fn score<S: AsRef<str>>(&self, words: &[S]) -> BTreeMap<&str, f64> {
        let mut counts = self
            .names()
            .map(|name| (name, 0usize))
            .collect::<BTreeMap<_, _>>();
        for word in words {
            for category in self.categories(word.as_ref()) {
                *counts.entry(category).or_default() += 1;
            }
        }
        let total = words.len();
        counts
            .into_iter()
            .map(|(name, count)| {
                let share = if total == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / total as f64
                };
                (name, share)
            })
            .collect()
    }

    /// Category indices of a word
    fn lookup(&self, word: &str) -> &[usize] {
        if let Some(indices) = self.words.get(&UniCase::new(Box::from(word))) {
            return indices;
        }
        let word = word.to_lowercase();
        self.prefixes
            .iter()
            .filter(|(prefix, _)| word.starts_with(&**prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map_or(&[][..], |(_, indices)| &indices[..])
    }
}

/// Read a text file, replacing invalid UTF-8 sequences
///
/// Lexicon files found in the wild are not always valid UTF-8.
async fn read_lossy(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading lexicon file {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const POSITIVE: &str = "; Opinion lexicon\n;\n\nhappy\ngreat\nGood\n";
    pub(crate) const NEGATIVE: &str = "; Opinion lexicon\nhate\nawful\ngreat\n";
    pub(crate) const DIC: &str = "%\n1\tposemo\n2\tnegemo\n3\taffect\n%\n\
                                  happ*\t1 3\nhate\t2 3\nhappen\t3\nkind of\t1\n";

    #[test]
    fn opinion_words() {
        let lexicon = OpinionLexicon::parse(POSITIVE, NEGATIVE);
        assert_eq!(lexicon.len(), 5);
        assert_eq!(lexicon.polarity("happy"), Some(Polarity::Positive));
        assert_eq!(lexicon.polarity("GOOD"), Some(Polarity::Positive));
        assert_eq!(lexicon.polarity("Awful"), Some(Polarity::Negative));
        assert_eq!(lexicon.polarity("great"), None);
        assert_eq!(lexicon.polarity("zebra"), None);
        assert_eq!(lexicon.polarity("; Opinion lexicon"), None);
    }

    #[test]
    fn word_categories() {
        let lexicon = CategoryLexicon::parse(DIC).unwrap();
        assert_eq!(lexicon.names().collect::<Vec<_>>(), ["posemo", "negemo", "affect"]);
        let categories = |word| lexicon.categories(word).collect::<Vec<_>>();
        assert_eq!(categories("happiness"), ["posemo", "affect"]);
        assert_eq!(categories("Hate"), ["negemo", "affect"]);
        // Exact patterns win over prefixes
        assert_eq!(categories("happen"), ["affect"]);
        assert_eq!(categories("kind of"), ["posemo"]);
        assert!(categories("hat").is_empty());
    }

    #[test]
    fn longest_prefix_wins() {
        let lexicon = CategoryLexicon::parse("%\n1 a\n2 b\n%\nwork*\t1\nworker*\t2\n").unwrap();
        assert_eq!(lexicon.categories("workers").collect::<Vec<_>>(), ["b"]);
        assert_eq!(lexicon.categories("working").collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn category_scores() {
        let lexicon = CategoryLexicon::parse(DIC).unwrap();
        let scores = lexicon.score(&["I", "hate", "happy", "zebras"]);
        assert_eq!(scores["posemo"], 25.0);
        assert_eq!(scores["negemo"], 25.0);
        assert_eq!(scores["affect"], 50.0);
        assert!(lexicon.score::<&str>(&[]).values().all(|&score| score == 0.0));
    }

    #[test]
    fn malformed_dictionaries() {
        let line_of = |dic| match CategoryLexicon::parse(dic) {
            Err(Error::Lexicon { line, .. }) => line,
            other => panic!("expected a lexicon error, got {other:?}"),
        };
        assert_eq!(line_of(""), 1);
        assert_eq!(line_of("1 posemo\n%\n"), 1);
        assert_eq!(line_of("%\nposemo\n%\n"), 2);
        assert_eq!(line_of("%\n1 posemo\n"), 2);
        assert_eq!(line_of("%\n1 posemo\n%\nhappy\t7\n"), 4);
        assert_eq!(line_of("%\n1 posemo\n%\nhappy\n"), 4);
    }

    #[test]
    fn unsupported_references_are_skipped() {
        let lexicon = CategoryLexicon::parse("%\n1 posemo\n%\nlike\t(02 134)125/464 1\n").unwrap();
        assert_eq!(lexicon.categories("like").collect::<Vec<_>>(), ["posemo"]);
    }

    #[tokio::test]
    async fn loading_from_files() {
        let dir = std::env::temp_dir().join(format!("tagrank-lexicon-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join(OpinionLexicon::POSITIVE_FILE), POSITIVE).await.unwrap();
        // Latin-1 bytes must not prevent loading
        let mut negative = NEGATIVE.as_bytes().to_vec();
        negative.extend_from_slice(b"na\xefve\n");
        tokio::fs::write(dir.join(OpinionLexicon::NEGATIVE_FILE), negative).await.unwrap();
        let dic = dir.join("test.dic");
        tokio::fs::write(&dic, DIC).await.unwrap();

        let opinions = OpinionLexicon::load(&dir).await.unwrap();
        assert_eq!(opinions.polarity("hate"), Some(Polarity::Negative));
        let categories = CategoryLexicon::load(&dic).await.unwrap();
        assert_eq!(categories.names().count(), 3);
        assert!(OpinionLexicon::load(&dir.join("missing")).await.is_err());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
