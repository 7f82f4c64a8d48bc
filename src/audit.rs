//! Audit session: build the label index once, then inspect every token.

use tracing::{info, warn};

use crate::ambiguity::{AmbiguityReporter, LabelConflict};
use crate::config::AuditConfig;
use crate::document::{Corpus, LoadIssue};
use crate::errors::AuditResult;
use crate::label_index::LabelIndex;
use crate::orphan::{OrphanOutcome, OrphanScanner};

/// Findings for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenFindings {
    Audited {
        orphans: OrphanOutcome,
        /// Present only for tokens with more than one label
        conflict: Option<LabelConflict>,
        /// Set when the label examples could not be extracted; the
        /// orphan outcome is still valid.
        issue: Option<String>,
    },
    /// The orphan scan failed for this token; the rest of the report is
    /// unaffected.
    Issue { message: String },
}

/// Report entry for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReport {
    pub token: String,
    /// Distinct labels, sorted
    pub labels: Vec<String>,
    pub findings: TokenFindings,
}

impl TokenReport {
    pub fn orphans(&self) -> Option<&OrphanOutcome> {
        match &self.findings {
            TokenFindings::Audited { orphans, .. } => Some(orphans),
            TokenFindings::Issue { .. } => None,
        }
    }

    pub fn conflict(&self) -> Option<&LabelConflict> {
        match &self.findings {
            TokenFindings::Audited { conflict, .. } => conflict.as_ref(),
            TokenFindings::Issue { .. } => None,
        }
    }

    /// Error message of whichever step failed, if any.
    pub fn issue(&self) -> Option<&str> {
        match &self.findings {
            TokenFindings::Audited { issue, .. } => issue.as_deref(),
            TokenFindings::Issue { message } => Some(message.as_str()),
        }
    }
}

/// Counters over a finished report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub tokens: usize,
    pub with_orphans: usize,
    pub ambiguous: usize,
    pub issues: usize,
}

/// Result of auditing a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub documents: usize,
    pub skipped: Vec<LoadIssue>,
    /// One entry per token, sorted by token
    pub tokens: Vec<TokenReport>,
}

impl AuditReport {
    pub fn summary(&self) -> AuditSummary {
        let mut summary = AuditSummary {
            tokens: self.tokens.len(),
            ..AuditSummary::default()
        };
        for report in &self.tokens {
            match &report.findings {
                TokenFindings::Audited {
                    orphans,
                    conflict,
                    issue,
                } => {
                    if matches!(orphans, OrphanOutcome::Found(_)) {
                        summary.with_orphans += 1;
                    }
                    if conflict.is_some() {
                        summary.ambiguous += 1;
                    }
                    if issue.is_some() {
                        summary.issues += 1;
                    }
                }
                TokenFindings::Issue { .. } => summary.issues += 1,
            }
        }
        summary
    }

    pub fn token(&self, token: &str) -> Option<&TokenReport> {
        self.tokens.iter().find(|r| r.token == token)
    }
}

/// One audit run over a loaded corpus.
pub struct Audit<'a> {
    corpus: &'a Corpus,
    config: &'a AuditConfig,
    index: LabelIndex,
}

impl<'a> Audit<'a> {
    pub fn new(corpus: &'a Corpus, config: &'a AuditConfig) -> Self {
        let index = LabelIndex::from_annotations(corpus.annotations());
        info!(tokens = index.len(), "label index built");
        Self {
            corpus,
            config,
            index,
        }
    }

    pub fn index(&self) -> &LabelIndex {
        &self.index
    }

    /// Inspect every token in sorted order.
    pub fn run(&self) -> AuditReport {
        let scanner = OrphanScanner::new(self.corpus, self.config);
        let reporter = AmbiguityReporter::new(self.corpus, self.config);

        let tokens = self
            .index
            .iter()
            .map(|(token, labels)| {
                let findings = match self.inspect(&scanner, &reporter, token) {
                    Ok(findings) => findings,
                    Err(err) => {
                        warn!(token, error = %err, "token audit failed");
                        TokenFindings::Issue {
                            message: err.to_string(),
                        }
                    }
                };
                TokenReport {
                    token: token.to_string(),
                    labels: labels.iter().cloned().collect(),
                    findings,
                }
            })
            .collect();

        AuditReport {
            documents: self.corpus.documents().len(),
            skipped: self.corpus.skipped().to_vec(),
            tokens,
        }
    }

    fn inspect(
        &self,
        scanner: &OrphanScanner<'_>,
        reporter: &AmbiguityReporter<'_>,
        token: &str,
    ) -> AuditResult<TokenFindings> {
        let orphans = scanner.scan(token)?;
        let examples = self.index.labels(token).map(|labels| reporter.report(token, labels));
        let (conflict, issue) = match examples {
            Some(Ok(conflict)) => (conflict, None),
            Some(Err(err)) => {
                warn!(token, error = %err, "label examples failed");
                (None, Some(err.to_string()))
            }
            None => (None, None),
        };
        Ok(TokenFindings::Audited {
            orphans,
            conflict,
            issue,
        })
    }
}
