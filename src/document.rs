//! Core types for loaded corpora.

use std::ops::Range;
use std::path::PathBuf;

/// A typed span extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Trimmed text content of the span (never empty)
    pub value: String,
    /// Label from the span's type attribute
    pub label: String,
    /// Byte range of the whole span element in the document's raw content
    pub source: Range<usize>,
}

/// A single annotated document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Display name (file name)
    pub id: String,
    /// Full path the document was read from
    pub path: PathBuf,
    /// Raw content exactly as stored on disk
    pub content: String,
    /// Annotations in document order
    pub annotations: Vec<Annotation>,
}

/// A document that was left out of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadIssue {
    pub path: PathBuf,
    pub reason: String,
}

/// All documents of one audit run.
///
/// `text` is the concatenation of every document's raw content, in
/// document order. `offsets[i]` is where document `i` starts in it.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    skipped: Vec<LoadIssue>,
    text: String,
    offsets: Vec<usize>,
}

impl Corpus {
    /// Build a corpus from loaded documents and the files that were skipped.
    pub fn new(documents: Vec<Document>, skipped: Vec<LoadIssue>) -> Self {
        let mut text = String::with_capacity(documents.iter().map(|d| d.content.len()).sum());
        let mut offsets = Vec::with_capacity(documents.len());
        for doc in &documents {
            offsets.push(text.len());
            text.push_str(&doc.content);
        }

        Self {
            documents,
            skipped,
            text,
            offsets,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn skipped(&self) -> &[LoadIssue] {
        &self.skipped
    }

    /// The corpus text blob.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every annotation of every document, in corpus order.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.documents.iter().flat_map(|d| d.annotations.iter())
    }

    /// Map an annotation's source range into the corpus text blob.
    pub fn blob_range(&self, doc_idx: usize, source: &Range<usize>) -> Option<Range<usize>> {
        let start = *self.offsets.get(doc_idx)?;
        Some(start + source.start..start + source.end)
    }

    /// Find the first annotation with the given value and label.
    pub fn find_annotation(&self, value: &str, label: &str) -> Option<(usize, &Annotation)> {
        self.documents.iter().enumerate().find_map(|(idx, doc)| {
            doc.annotations
                .iter()
                .find(|a| a.value == value && a.label == label)
                .map(|a| (idx, a))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
