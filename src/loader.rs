//! Corpus loading.
//!
//! Documents are TEI files: the loader walks `root > text > p` and takes
//! every `rs` element beneath a paragraph as an [`Annotation`]. Element
//! and attribute names come from [`AuditConfig`].

use std::fs;
use std::ops::Range;
use std::path::Path;

use regex::bytes::Regex;
use roxmltree::{Node, ParsingOptions};
use tracing::{debug, info, warn};

use crate::config::AuditConfig;
use crate::document::{Annotation, Corpus, Document, LoadIssue};
use crate::errors::{AuditError, AuditResult};

/// Load a single document.
pub fn load_document(path: &Path, config: &AuditConfig) -> AuditResult<Document> {
    let bytes = fs::read(path).map_err(|source| AuditError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = decode_document(bytes).map_err(|message| AuditError::Decode {
        path: path.to_path_buf(),
        message,
    })?;
    let annotations = parse_annotations(&content, config).map_err(|message| AuditError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    let id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Document {
        id,
        path: path.to_path_buf(),
        content,
        annotations,
    })
}

/// Load every document directly inside `dir`.
///
/// Only an unlistable directory is an error. Documents that cannot be
/// read or parsed are recorded in [`Corpus::skipped`].
pub fn load_corpus(dir: &Path, config: &AuditConfig) -> AuditResult<Corpus> {
    let dir_error = |source| AuditError::CorpusDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(dir_error)? {
        let path = entry.map_err(dir_error)?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| name.ends_with(config.extension.as_str()));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    for path in paths {
        match load_document(&path, config) {
            Ok(doc) => {
                debug!(document = %doc.id, annotations = doc.annotations.len(), "loaded document");
                documents.push(doc);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping document");
                let reason = match err {
                    AuditError::Read { source, .. } => source.to_string(),
                    AuditError::Decode { message, .. } | AuditError::Parse { message, .. } => {
                        message
                    }
                    other => other.to_string(),
                };
                skipped.push(LoadIssue { path, reason });
            }
        }
    }

    info!(
        documents = documents.len(),
        skipped = skipped.len(),
        "corpus loaded"
    );
    Ok(Corpus::new(documents, skipped))
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode raw document bytes using the encoding named in the XML
/// declaration. Documents that declare nothing are UTF-8.
pub fn decode_document(mut bytes: Vec<u8>) -> Result<String, String> {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }

    let declared = declared_encoding(&bytes);
    let encoding = declared.as_deref().unwrap_or("UTF-8");
    match encoding.to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" | "us-ascii" | "ascii" => {
            String::from_utf8(bytes).map_err(|e| format!("invalid {encoding} content: {e}"))
        }
        // Latin-1 bytes are the first 256 code points.
        "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "latin1" | "latin-1" | "l1" => {
            Ok(bytes.iter().copied().map(char::from).collect())
        }
        _ => Err(format!("unsupported encoding {encoding:?}")),
    }
}

/// The `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let pattern =
        Regex::new(r#"^<\?xml\s[^>]*?encoding\s*=\s*["']([A-Za-z][A-Za-z0-9._-]*)["']"#).ok()?;
    let captures = pattern.captures(bytes)?;
    Some(String::from_utf8_lossy(&captures[1]).into_owned())
}

/// Parse markup and collect the annotations beneath each paragraph.
pub fn parse_annotations(content: &str, config: &AuditConfig) -> Result<Vec<Annotation>, String> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(content, options).map_err(|e| e.to_string())?;

    let mut annotations = Vec::new();
    let root = xml.root_element();
    for container in element_children(root, &config.container_element, config) {
        for paragraph in element_children(container, &config.paragraph_element, config) {
            for span in paragraph
                .descendants()
                .filter(|n| is_element(*n, &config.span_element, config))
            {
                if let Some(annotation) = annotation_from_span(span, config) {
                    annotations.push(annotation);
                }
            }
        }
    }

    Ok(annotations)
}

fn element_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
    config: &'a AuditConfig,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is_element(*n, name, config))
}

fn is_element(node: Node, name: &str, config: &AuditConfig) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && config.namespace_matches(node.tag_name().namespace())
}

fn annotation_from_span(span: Node, config: &AuditConfig) -> Option<Annotation> {
    let source: Range<usize> = span.range();

    let Some(label) = span.attribute(config.label_attribute.as_str()) else {
        debug!(offset = source.start, "span without label attribute");
        return None;
    };

    let text: String = span
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let value = text.trim();
    if value.is_empty() {
        debug!(offset = source.start, label, "span with empty text");
        return None;
    }

    Some(Annotation {
        value: value.to_string(),
        label: label.to_string(),
        source,
    })
}
