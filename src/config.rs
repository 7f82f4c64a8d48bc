//! Audit configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{AuditError, AuditResult};

/// TEI namespace used by the default configuration.
pub const TEI_NAMESPACE: &str = "http://www.tei-c.org/ns/1.0";

/// Configuration for loading and auditing a corpus.
///
/// Every field has a default, so a TOML file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// File-name suffix of documents to load.
    pub extension: String,
    /// Namespace of the structural elements (empty = any namespace).
    pub namespace: String,
    /// Element holding the document text, a direct child of the root.
    pub container_element: String,
    /// Paragraph element, a direct child of the container.
    pub paragraph_element: String,
    /// Referring-string element carrying an annotation.
    pub span_element: String,
    /// Attribute of the span element holding its label.
    pub label_attribute: String,
    /// Tokens with fewer characters are not scanned for orphans.
    pub min_token_chars: usize,
    /// All-digit tokens with fewer characters are not scanned for orphans.
    pub min_numeric_chars: usize,
    /// Characters of context kept on each side of a match.
    pub context_chars: usize,
    /// Fall back to the parse-time source range when the tag pattern
    /// cannot be found in the raw text.
    pub offset_fallback: bool,
    /// Text shown when no example could be located for a label.
    pub unavailable_marker: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            extension: ".xml".into(),
            namespace: TEI_NAMESPACE.into(),
            container_element: "text".into(),
            paragraph_element: "p".into(),
            span_element: "rs".into(),
            label_attribute: "type".into(),
            min_token_chars: 2,
            min_numeric_chars: 4,
            context_chars: 80,
            offset_fallback: true,
            unavailable_marker: "/".into(),
        }
    }
}

impl AuditConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> AuditResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| AuditError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|message| AuditError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Whether structural element `namespace` matches the configured one.
    pub(crate) fn namespace_matches(&self, namespace: Option<&str>) -> bool {
        self.namespace.is_empty() || namespace == Some(self.namespace.as_str())
    }
}
