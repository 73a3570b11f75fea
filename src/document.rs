//! Splitting of tagged text into documents
//!
//! In the tagged text format, the lines of one document follow each other and
//! documents are separated by a blank line.

use serde::Serialize;
use std::{fmt, num::NonZeroUsize};

/// 1-based position of a document within its source text
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DocumentId(NonZeroUsize);
//
impl DocumentId {
    /// Identifier of the first document
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Identifier of the next document
    pub fn next(self) -> Self {
        Self(
            self.0
                .checked_add(1)
                .expect("no source text should hold usize::MAX documents"),
        )
    }

    /// Numerical value of the identifier
    pub fn get(self) -> usize {
        self.0.get()
    }
}
//
impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// One document from a tagged text
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Document {
    /// Position of the document in the source text
    pub id: DocumentId,

    /// Non-blank tagged lines of the document, in order
    pub lines: Box<[Box<str>]>,
}
//
impl Document {
    /// Iterate over the tagged lines of the document
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| &**line)
    }
}

/// Accumulator that cuts a stream of lines into documents
#[derive(Debug)]
pub struct DocumentSplitter {
    /// Identifier that the next document will get
    next_id: DocumentId,

    /// Lines of the document being accumulated
    current: Vec<Box<str>>,

    /// Documents that are already complete
    documents: Vec<Document>,
}
//
impl DocumentSplitter {
    /// Set up the accumulator
    pub fn new() -> Self {
        Self {
            next_id: DocumentId::FIRST,
            current: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Integrate the next line of input
    pub fn add_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            self.flush();
        } else {
            self.current.push(line.into());
        }
    }

    /// Flush the last document and export all documents
    ///
    /// The input does not need to end with a blank line: whatever was
    /// accumulated since the last blank line becomes the last document.
    pub fn finish(mut self) -> Vec<Document> {
        self.flush();
        self.documents
    }

    /// Turn accumulated lines (if any) into a document
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let id = self.next_id;
        self.next_id = id.next();
        let lines = std::mem::take(&mut self.current).into_boxed_slice();
        log::trace!("Split document {id} with {} line(s)", lines.len());
        self.documents.push(Document { id, lines });
    }
}
//
impl Default for DocumentSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a whole tagged text into documents
pub fn split(text: &str) -> Vec<Document> {
    let mut splitter = DocumentSplitter::new();
    for line in text.lines() {
        splitter.add_line(line);
    }
    let documents = splitter.finish();
    log::debug!("Split tagged text into {} document(s)", documents.len());
    documents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(documents: &[Document]) -> Vec<Vec<&str>> {
        documents
            .iter()
            .map(|document| document.lines().collect())
            .collect()
    }

    #[test]
    fn empty_text_has_no_documents() {
        assert!(split("").is_empty());
        assert!(split("\n  \n\t\n").is_empty());
    }

    #[test]
    fn blank_lines_separate_documents() {
        let documents = split("a/DT\nb/NN\n\nc/NN\n\n");
        assert_eq!(lines_of(&documents), [vec!["a/DT", "b/NN"], vec!["c/NN"]]);
        let ids = documents.iter().map(|d| d.id.get()).collect::<Vec<_>>();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn trailing_document_is_kept() {
        let documents = split("a/DT\n\nb/NN\nc/NN");
        assert_eq!(lines_of(&documents), [vec!["a/DT"], vec!["b/NN", "c/NN"]]);
        assert_eq!(documents[1].id.to_string(), "2");
    }

    #[test]
    fn consecutive_blank_lines_do_not_make_empty_documents() {
        let documents = split("\n\na/DT\n\n\n \nb/NN\n");
        assert_eq!(lines_of(&documents), [vec!["a/DT"], vec!["b/NN"]]);
        assert_eq!(documents[1].id.get(), 2);
    }

    #[test]
    fn round_trip() {
        let original = vec![
            vec!["The/DT cat/NN sat/VBD ./.", "It/PRP slept/VBD ./."],
            vec!["Dogs/NNS bark/VBP ./."],
            vec!["Birds/NNS sing/VBP ./.", "Fish/NN swim/VBP"],
        ];
        // Every document is terminated by a blank line, except the last one
        let text = original
            .iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");
        assert_eq!(lines_of(&split(&text)), original);
        assert_eq!(lines_of(&split(&format!("{text}\n\n"))), original);
    }

    #[test]
    fn streaming_matches_whole_text() {
        let text = "a/DT\n\nb/NN\n";
        let mut splitter = DocumentSplitter::default();
        for line in text.lines() {
            splitter.add_line(line);
        }
        assert_eq!(splitter.finish(), split(text));
    }
}
