//! Text rendering of audit reports.
//!
//! Layout lives in [`ReportRenderer`]; how individual pieces look is up
//! to a [`ReportStyle`]. [`PlainStyle`] leaves text untouched and
//! [`AnsiStyle`] adds terminal colors.

use std::fmt::Write;

use colored::Colorize;

use crate::ambiguity::LabelConflict;
use crate::audit::{AuditReport, TokenFindings, TokenReport};
use crate::orphan::{OrphanOutcome, SkipReason};

/// Separator printed after each label-conflict section.
pub const SEPARATOR: &str = "_____";

/// Presentation of the individual report elements.
pub trait ReportStyle {
    fn token(&self, text: &str) -> String;
    fn label(&self, text: &str) -> String;
    fn document(&self, text: &str) -> String;
    /// Expected-empty outcomes ("nothing found", "skipped")
    fn notice(&self, text: &str) -> String;
    /// Problems: skipped documents, failed tokens
    fn issue(&self, text: &str) -> String;
}

/// Uncolored output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl ReportStyle for PlainStyle {
    fn token(&self, text: &str) -> String {
        text.to_string()
    }

    fn label(&self, text: &str) -> String {
        text.to_string()
    }

    fn document(&self, text: &str) -> String {
        text.to_string()
    }

    fn notice(&self, text: &str) -> String {
        text.to_string()
    }

    fn issue(&self, text: &str) -> String {
        text.to_string()
    }
}

/// ANSI-colored output for terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyle;

impl ReportStyle for AnsiStyle {
    fn token(&self, text: &str) -> String {
        text.bold().to_string()
    }

    fn label(&self, text: &str) -> String {
        text.cyan().to_string()
    }

    fn document(&self, text: &str) -> String {
        text.blue().to_string()
    }

    fn notice(&self, text: &str) -> String {
        text.green().to_string()
    }

    fn issue(&self, text: &str) -> String {
        text.red().bold().to_string()
    }
}

/// Renders an [`AuditReport`] as a line-oriented text stream.
pub struct ReportRenderer<S> {
    style: S,
    unavailable_marker: String,
}

impl<S: ReportStyle> ReportRenderer<S> {
    pub fn new(style: S) -> Self {
        Self {
            style,
            unavailable_marker: "/".to_string(),
        }
    }

    /// Text printed for a label whose example could not be located.
    pub fn with_unavailable_marker(mut self, marker: impl Into<String>) -> Self {
        self.unavailable_marker = marker.into();
        self
    }

    pub fn render(&self, report: &AuditReport) -> String {
        let mut output = String::new();

        for issue in &report.skipped {
            let line = format!("skipped {}: {}", issue.path.display(), issue.reason);
            writeln!(output, "{}", self.style.issue(&line)).unwrap();
        }
        if !report.skipped.is_empty() {
            writeln!(output).unwrap();
        }

        for token in &report.tokens {
            self.render_token(&mut output, token);
        }

        let summary = report.summary();
        writeln!(
            output,
            "{} documents, {} tokens: {} with orphan occurrences, {} with multiple labels, {} issues",
            report.documents, summary.tokens, summary.with_orphans, summary.ambiguous, summary.issues
        )
        .unwrap();

        output
    }

    fn render_token(&self, output: &mut String, report: &TokenReport) {
        let labels: Vec<String> = report.labels.iter().map(|l| self.style.label(l)).collect();
        writeln!(
            output,
            "{}  [{}] :",
            self.style.token(&report.token),
            labels.join(", ")
        )
        .unwrap();
        writeln!(output).unwrap();

        match &report.findings {
            TokenFindings::Audited {
                orphans,
                conflict,
                issue,
            } => {
                self.render_orphans(output, orphans);
                if let Some(conflict) = conflict {
                    self.render_conflict(output, &report.token, conflict);
                }
                if let Some(message) = issue {
                    self.render_issue(output, message);
                }
            }
            TokenFindings::Issue { message } => self.render_issue(output, message),
        }
    }

    fn render_issue(&self, output: &mut String, message: &str) {
        let line = format!("-> issue: {}", message);
        writeln!(output, "    {}", self.style.issue(&line)).unwrap();
        writeln!(output).unwrap();
    }

    fn render_orphans(&self, output: &mut String, orphans: &OrphanOutcome) {
        match orphans {
            OrphanOutcome::Skipped(reason) => {
                let text = match reason {
                    SkipReason::TooShort => "-> too short to be meaningful",
                    SkipReason::ShortNumeric => "-> only digits and too short to be meaningful",
                };
                writeln!(output, "    {}", self.style.notice(text)).unwrap();
            }
            OrphanOutcome::NotFound => {
                writeln!(output, "    {}", self.style.notice("-> no orphan occurrence found")).unwrap();
            }
            OrphanOutcome::Found(contexts) => {
                for (i, context) in contexts.iter().enumerate() {
                    if i > 0 {
                        writeln!(output).unwrap();
                    }
                    writeln!(
                        output,
                        "    {}: {}",
                        self.style.document(&context.document),
                        context.context
                    )
                    .unwrap();
                }
            }
        }
        writeln!(output).unwrap();
    }

    fn render_conflict(&self, output: &mut String, token: &str, conflict: &LabelConflict) {
        writeln!(output, "{} :", self.style.token(token)).unwrap();
        writeln!(output).unwrap();
        for example in &conflict.examples {
            let text = match &example.example {
                Some(text) => text.clone(),
                None => self.style.notice(&self.unavailable_marker),
            };
            writeln!(output, "    {} : {}", self.style.label(&example.label), text).unwrap();
            writeln!(output).unwrap();
        }
        writeln!(output, "{}", SEPARATOR).unwrap();
        writeln!(output).unwrap();
    }
}
