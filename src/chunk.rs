//! Simple noun phrase chunking
//!
//! A simple noun phrase is an optional determiner, followed by any number of
//! adjectives, followed by one or more nouns: `DT? JJ* (NN|NNS|NNP)+`. This
//! deliberately under-generates (no prepositional attachment, no coordination)
//! in exchange for a single left-to-right pass.

use crate::tagged::{self, TaggedToken};

/// Role of a tagged unit with respect to the chunk grammar
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Role {
    Determiner,
    Adjective,
    Noun,
    Other,
}
//
impl Role {
    /// Classify a space-delimited unit of a tagged line
    ///
    /// Only units whose word is made of word characters take part in the
    /// grammar, and tags must match exactly.
    fn of(unit: &str) -> Self {
        let Some(token) = TaggedToken::parse(unit).filter(TaggedToken::is_plain_word) else {
            return Self::Other;
        };
        match token.tag {
            "DT" => Self::Determiner,
            "JJ" => Self::Adjective,
            "NN" | "NNS" | "NNP" => Self::Noun,
            _ => Self::Other,
        }
    }
}

/// Recognizer state while matching one noun phrase
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Nothing consumed yet, a determiner is allowed
    SeekDeterminer,

    /// Determiner and/or adjectives consumed, nouns still required
    SeekAdjective,

    /// At least one noun consumed, only more nouns may follow
    SeekNoun,
}

/// Find all simple noun phrases of a tagged line, in order of appearance
///
/// Matching is leftmost-first and non-overlapping, and each match extends as
/// far as possible. Phrases are returned as their plain words, without tags,
/// and are not deduplicated.
pub fn extract_noun_phrases(line: &str) -> Vec<String> {
    let units = line
        .split(' ')
        .filter(|unit| !unit.is_empty())
        .collect::<Vec<_>>();
    let roles = units.iter().map(|unit| Role::of(unit)).collect::<Vec<_>>();
    let mut phrases = Vec::new();
    let mut start = 0;
    while start < roles.len() {
        if let Some(end) = match_at(&roles, start) {
            phrases.extend(tagged::extract_words(&units[start..end].join(" ")));
            start = end;
        } else {
            start += 1;
        }
    }
    phrases
}

/// Try to match a noun phrase starting at `start`
///
/// Returns the end of the match (exclusive) if there is one.
fn match_at(roles: &[Role], start: usize) -> Option<usize> {
    let mut state = State::SeekDeterminer;
    let mut end = None;
    for (pos, &role) in roles.iter().enumerate().skip(start) {
        state = match (state, role) {
            (State::SeekDeterminer, Role::Determiner) => State::SeekAdjective,
            (State::SeekDeterminer | State::SeekAdjective, Role::Adjective) => State::SeekAdjective,
            (_, Role::Noun) => {
                end = Some(pos + 1);
                State::SeekNoun
            }
            _ => break,
        };
    }
    end
}
