//! Examples for strings annotated with more than one label.
//!
//! For each label the corpus text is searched for the first
//! `<rs type="LABEL">TOKEN<` and the line around it is shown. When the
//! raw text does not contain that exact pattern (escaped characters,
//! whitespace inside the span, extra attributes), the source range
//! recorded by the loader is used instead if `offset_fallback` is set.

use std::collections::BTreeSet;
use std::ops::Range;

use regex::Regex;
use tracing::debug;

use crate::config::AuditConfig;
use crate::document::Corpus;
use crate::errors::{AuditError, AuditResult};

/// One illustrative occurrence of a token under a given label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelExample {
    pub label: String,
    /// `None` when no occurrence could be located
    pub example: Option<String>,
}

/// All labels of an ambiguous token, one example each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelConflict {
    pub examples: Vec<LabelExample>,
}

/// Extracts label examples from a corpus.
pub struct AmbiguityReporter<'a> {
    corpus: &'a Corpus,
    config: &'a AuditConfig,
}

impl<'a> AmbiguityReporter<'a> {
    pub fn new(corpus: &'a Corpus, config: &'a AuditConfig) -> Self {
        Self { corpus, config }
    }

    /// Build the conflict for `token`, or `None` if it has a single label.
    pub fn report(&self, token: &str, labels: &BTreeSet<String>) -> AuditResult<Option<LabelConflict>> {
        if labels.len() < 2 {
            return Ok(None);
        }

        let examples = labels
            .iter()
            .map(|label| {
                Ok(LabelExample {
                    label: label.clone(),
                    example: self.example(token, label)?,
                })
            })
            .collect::<AuditResult<Vec<_>>>()?;

        Ok(Some(LabelConflict { examples }))
    }

    /// First occurrence of `token` annotated as `label`, with context.
    pub fn example(&self, token: &str, label: &str) -> AuditResult<Option<String>> {
        let pattern = example_pattern(
            &self.config.span_element,
            &self.config.label_attribute,
            label,
            token,
            self.config.context_chars,
        )?;
        if let Some(found) = pattern.find(self.corpus.text()) {
            return Ok(Some(clean(found.as_str())));
        }

        if self.config.offset_fallback {
            if let Some(example) = self.example_from_source(token, label) {
                debug!(token, label, "example located by source range");
                return Ok(Some(example));
            }
        }

        debug!(token, label, "no example located");
        Ok(None)
    }

    fn example_from_source(&self, token: &str, label: &str) -> Option<String> {
        let (doc_idx, annotation) = self.corpus.find_annotation(token, label)?;
        let range = self.corpus.blob_range(doc_idx, &annotation.source)?;
        window_around(self.corpus.text(), range, self.config.context_chars).map(clean)
    }
}

/// Build the pattern for a span element wrapping exactly `token`.
pub fn example_pattern(
    element: &str,
    attribute: &str,
    label: &str,
    token: &str,
    context_chars: usize,
) -> AuditResult<Regex> {
    let source = format!(
        r#".{{0,{n}}}<{element} {attribute}="{label}">{token}<.{{0,{n}}}"#,
        n = context_chars,
        element = regex::escape(element),
        attribute = regex::escape(attribute),
        label = regex::escape(label),
        token = regex::escape(token),
    );
    Regex::new(&source).map_err(|source| AuditError::Pattern {
        token: token.to_string(),
        source,
    })
}

/// `range` plus up to `n` characters on each side, without crossing a line.
fn window_around(text: &str, range: Range<usize>, n: usize) -> Option<&str> {
    let before = text.get(..range.start)?;
    let after = text.get(range.end..)?;

    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| *c != '\n')
        .take(n)
        .last()
        .map_or(range.start, |(i, _)| i);
    let end = after
        .char_indices()
        .take_while(|(_, c)| *c != '\n')
        .take(n)
        .last()
        .map_or(range.end, |(i, c)| range.end + i + c.len_utf8());

    text.get(start..end)
}

fn clean(example: &str) -> String {
    example.replace('\t', "").trim().to_string()
}
