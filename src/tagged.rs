//! Extraction of words and part-of-speech tags from `word/TAG` lines
//!
//! Tagged lines are produced by an external tagger, one sentence (or one whole
//! document) per line, as single-space-separated `word/TAG` units. Units that
//! do not follow this format are skipped rather than rejected, since taggers
//! happily emit things like `,/,` or `''/''`.

/// Truth that a character can be part of a word
///
/// This is the usual Unicode-aware notion of a "word character": any
/// alphanumeric character, plus the underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Word and tag from one `word/TAG` unit
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TaggedToken<'line> {
    /// Word, which may itself contain slashes (e.g. `and/or`)
    pub word: &'line str,

    /// Raw tag, everything after the last slash
    pub tag: &'line str,
}
//
impl<'line> TaggedToken<'line> {
    /// Split a unit on its last slash, rejecting units where either side
    /// would be empty
    pub fn parse(unit: &'line str) -> Option<Self> {
        let (word, tag) = unit.rsplit_once('/')?;
        (!word.is_empty() && !tag.is_empty()).then_some(Self { word, tag })
    }

    /// Well-formed tag code, if any
    ///
    /// See [`tag_code()`] for the exact rules.
    pub fn tag_code(&self) -> Option<&'line str> {
        tag_code(self.tag)
    }

    /// Truth that the word is made of word characters only
    pub fn is_plain_word(&self) -> bool {
        self.word.chars().all(is_word_char)
    }
}

/// Iterate over the well-formed tokens of a tagged line
pub fn tokens(line: &str) -> impl Iterator<Item = TaggedToken<'_>> {
    units(line).filter_map(TaggedToken::parse)
}

/// Extract the plain words of a tagged line, joined by single spaces
///
/// A unit contributes a word when it starts with a run of word characters that
/// is immediately followed by a slash. Returns `None` when no unit qualifies,
/// which callers should treat as a line without content.
pub fn extract_words(line: &str) -> Option<String> {
    let words = units(line).filter_map(leading_word).collect::<Vec<_>>();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Extract the tag codes of a tagged line, in order of appearance
///
/// The tag of a unit is looked up after its last slash, so that words which
/// contain slashes do not get mis-split. Units without a tag code are skipped.
pub fn extract_tags(line: &str) -> Vec<&str> {
    units(line)
        .filter_map(|unit| unit.rsplit_once('/'))
        .filter_map(|(_word, tag)| tag_code(tag))
        .collect()
}

/// Tag code at the start of a raw tag
///
/// A tag code is a non-empty run of word characters, optionally followed by
/// a single `$` (as in `PRP$`). Anything after that is ignored.
pub fn tag_code(tag: &str) -> Option<&str> {
    let end = word_prefix_len(tag);
    if end == 0 {
        return None;
    }
    let end = if tag[end..].starts_with('$') {
        end + 1
    } else {
        end
    };
    Some(&tag[..end])
}

/// Space-delimited units of a tagged line
fn units(line: &str) -> impl Iterator<Item = &str> {
    line.split(' ').filter(|unit| !unit.is_empty())
}

/// Leading word of a unit, if it is immediately followed by a slash
fn leading_word(unit: &str) -> Option<&str> {
    let end = word_prefix_len(unit);
    (end > 0 && unit[end..].starts_with('/')).then(|| &unit[..end])
}

/// Length in bytes of the run of word characters at the start of `s`
fn word_prefix_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(s.len(), |(idx, _)| idx)
}
