#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Consistency auditing for entity-annotated corpora.
//!
//! Given a directory of TEI documents whose entity mentions are marked
//! up as `<rs type="...">`, the audit reports two kinds of candidates for
//! manual review:
//!
//! - strings that are annotated somewhere but also occur unannotated
//!   (orphan occurrences)
//! - strings annotated with more than one distinct label (label
//!   conflicts), with one example per label
//!
//! Nothing is ever written back to the corpus.
//!
//! ## Modules
//!
//! - [`loader`] - Reads documents and extracts annotations
//! - [`label_index`] - Distinct labels per annotated string
//! - [`orphan`] - Unannotated occurrence scanning
//! - [`ambiguity`] - Examples for multi-label strings
//! - [`audit`] - Audit session tying the above together
//! - [`render`] - Plain and colored text output
//!
//! ## Example
//!
//! ```no_run
//! use layered_audit::{load_corpus, Audit, AuditConfig, PlainStyle, ReportRenderer};
//! use std::path::Path;
//!
//! let config = AuditConfig::default();
//! let corpus = load_corpus(Path::new("corpus/"), &config).unwrap();
//! let report = Audit::new(&corpus, &config).run();
//! print!("{}", ReportRenderer::new(PlainStyle).render(&report));
//! ```

pub mod ambiguity;
pub mod audit;
pub mod config;
pub mod document;
pub mod errors;
pub mod label_index;
pub mod loader;
pub mod orphan;
pub mod render;

pub use ambiguity::{AmbiguityReporter, LabelConflict, LabelExample};
pub use audit::{Audit, AuditReport, AuditSummary, TokenFindings, TokenReport};
pub use config::AuditConfig;
pub use document::{Annotation, Corpus, Document, LoadIssue};
pub use errors::{AuditError, AuditResult};
pub use label_index::LabelIndex;
pub use loader::{load_corpus, load_document};
pub use orphan::{OrphanContext, OrphanOutcome, OrphanScanner, SkipReason};
pub use render::{AnsiStyle, PlainStyle, ReportRenderer, ReportStyle};
