//! Search for unannotated occurrences of annotated strings.
//!
//! A match is the token with a character other than `>` right before it
//! and a character other than `<` right after it, plus up to
//! `context_chars` characters on each side, all within one line. This is
//! deliberately rough: a token that is part of a longer annotated phrase
//! is reported too. The reviewer sorts those out.

use regex::Regex;
use tracing::debug;

use crate::config::AuditConfig;
use crate::document::Corpus;
use crate::errors::{AuditError, AuditResult};

/// Why a token was not scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer characters than `min_token_chars`
    TooShort,
    /// Only digits, and fewer than `min_numeric_chars`
    ShortNumeric,
}

/// One unannotated occurrence with its surrounding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanContext {
    /// Document the occurrence was found in
    pub document: String,
    /// Matched window, whitespace-trimmed
    pub context: String,
}

/// Result of scanning one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrphanOutcome {
    Skipped(SkipReason),
    NotFound,
    Found(Vec<OrphanContext>),
}

impl OrphanOutcome {
    pub fn contexts(&self) -> &[OrphanContext] {
        match self {
            OrphanOutcome::Found(contexts) => contexts,
            _ => &[],
        }
    }
}

/// Scans a corpus for unannotated occurrences of tokens.
pub struct OrphanScanner<'a> {
    corpus: &'a Corpus,
    config: &'a AuditConfig,
}

impl<'a> OrphanScanner<'a> {
    pub fn new(corpus: &'a Corpus, config: &'a AuditConfig) -> Self {
        Self { corpus, config }
    }

    /// Short-string exclusion rules.
    pub fn skip_reason(&self, token: &str) -> Option<SkipReason> {
        let chars = token.chars().count();
        if chars < self.config.min_token_chars {
            Some(SkipReason::TooShort)
        } else if chars < self.config.min_numeric_chars && token.chars().all(|c| c.is_ascii_digit()) {
            Some(SkipReason::ShortNumeric)
        } else {
            None
        }
    }

    /// Scan every document for unannotated occurrences of `token`.
    pub fn scan(&self, token: &str) -> AuditResult<OrphanOutcome> {
        if let Some(reason) = self.skip_reason(token) {
            debug!(token, ?reason, "token not scanned");
            return Ok(OrphanOutcome::Skipped(reason));
        }

        let pattern = orphan_pattern(token, self.config.context_chars)?;
        let contexts: Vec<OrphanContext> = self
            .corpus
            .documents()
            .iter()
            .flat_map(|doc| {
                pattern.find_iter(&doc.content).map(move |m| OrphanContext {
                    document: doc.id.clone(),
                    context: m.as_str().trim().to_string(),
                })
            })
            .collect();

        debug!(token, found = contexts.len(), "orphan scan");
        if contexts.is_empty() {
            Ok(OrphanOutcome::NotFound)
        } else {
            Ok(OrphanOutcome::Found(contexts))
        }
    }
}

/// Build the line-bounded search pattern for `token`.
pub fn orphan_pattern(token: &str, context_chars: usize) -> AuditResult<Regex> {
    let source = format!(
        r".{{0,{n}}}[^>\n]{token}[^<\n].{{0,{n}}}",
        n = context_chars,
        token = regex::escape(token),
    );
    Regex::new(&source).map_err(|source| AuditError::Pattern {
        token: token.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use std::path::PathBuf;

    fn corpus(docs: &[(&str, &str)]) -> Corpus {
        let documents = docs
            .iter()
            .map(|(id, content)| Document {
                id: id.to_string(),
                path: PathBuf::from(id),
                content: content.to_string(),
                annotations: Vec::new(),
            })
            .collect();
        Corpus::new(documents, Vec::new())
    }

    #[test]
    fn test_single_char_always_skipped() {
        let corpus = corpus(&[("a.xml", "the value 7 appears unannotated")]);
        let config = AuditConfig::default();
        let scanner = OrphanScanner::new(&corpus, &config);
        assert_eq!(scanner.scan("7").unwrap(), OrphanOutcome::Skipped(SkipReason::TooShort));
        assert_eq!(scanner.scan("x").unwrap(), OrphanOutcome::Skipped(SkipReason::TooShort));
    }

    #[test]
    fn test_short_numeric_skipped() {
        let corpus = corpus(&[("a.xml", "in 2016 and 123 and 42")]);
        let config = AuditConfig::default();
        let scanner = OrphanScanner::new(&corpus, &config);
        assert_eq!(scanner.skip_reason("42"), Some(SkipReason::ShortNumeric));
        assert_eq!(scanner.skip_reason("123"), Some(SkipReason::ShortNumeric));
        assert_eq!(scanner.skip_reason("2016"), None);
        assert_eq!(scanner.skip_reason("M31"), None);
        assert!(matches!(scanner.scan("2016").unwrap(), OrphanOutcome::Found(_)));
    }

    #[test]
    fn test_thresholds_configurable() {
        let corpus = corpus(&[]);
        let config = AuditConfig {
            min_token_chars: 3,
            min_numeric_chars: 6,
            ..AuditConfig::default()
        };
        let scanner = OrphanScanner::new(&corpus, &config);
        assert_eq!(scanner.skip_reason("HD"), Some(SkipReason::TooShort));
        assert_eq!(scanner.skip_reason("12345"), Some(SkipReason::ShortNumeric));
        assert_eq!(scanner.skip_reason("HD 1"), None);
    }

    #[test]
    fn test_finds_unwrapped_occurrence() {
        let corpus = corpus(&[(
            "2016MNRAS.tei.xml",
            "<p>The star <rs type=\"astro-object\">WR102</rs> is bright.</p>\n\
             <p>The rotational velocity of WR102 is actually unknown.</p>\n",
        )]);
        let config = AuditConfig::default();
        let outcome = OrphanScanner::new(&corpus, &config).scan("WR102").unwrap();

        let contexts = outcome.contexts();
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].document, "2016MNRAS.tei.xml");
        assert_eq!(
            contexts[0].context,
            "<p>The rotational velocity of WR102 is actually unknown.</p>"
        );
    }

    #[test]
    fn test_wrapped_only_not_found() {
        let corpus = corpus(&[("a.xml", "<p>Seen in <rs type=\"astro-object\">WR102</rs>.</p>")]);
        let config = AuditConfig::default();
        let outcome = OrphanScanner::new(&corpus, &config).scan("WR102").unwrap();
        assert_eq!(outcome, OrphanOutcome::NotFound);
    }

    #[test]
    fn test_substring_of_longer_span_is_reported() {
        let corpus = corpus(&[("a.xml", "<rs type=\"mission\">the Mars Express probe</rs>")]);
        let config = AuditConfig::default();
        let outcome = OrphanScanner::new(&corpus, &config).scan("Mars").unwrap();
        assert_eq!(outcome.contexts().len(), 1);
    }

    #[test]
    fn test_window_bounded_by_line_and_width() {
        let long = "x".repeat(200);
        let content = format!("first line\n{long} WR102 {long}\nlast line");
        let corpus = corpus(&[("a.xml", &content)]);
        let config = AuditConfig {
            context_chars: 10,
            ..AuditConfig::default()
        };
        let outcome = OrphanScanner::new(&corpus, &config).scan("WR102").unwrap();

        let context = &outcome.contexts()[0].context;
        assert!(!context.contains('\n'));
        assert_eq!(context.chars().count(), 10 + 1 + 5 + 1 + 10);
    }

    #[test]
    fn test_contexts_attributed_per_document() {
        let corpus = corpus(&[
            ("a.xml", "observed W0607+24 near pole-on"),
            ("b.xml", "no mention here"),
            ("c.xml", "again W0607+24 twice"),
        ]);
        let config = AuditConfig::default();
        let outcome = OrphanScanner::new(&corpus, &config).scan("W0607+24").unwrap();

        let documents: Vec<&str> = outcome.contexts().iter().map(|c| c.document.as_str()).collect();
        assert_eq!(documents, vec!["a.xml", "c.xml"]);
    }

    #[test]
    fn test_pattern_escapes_token() {
        let pattern = orphan_pattern("a.b", 5).unwrap();
        assert!(pattern.is_match(" a.b "));
        assert!(!pattern.is_match(" axb "));
    }
}
