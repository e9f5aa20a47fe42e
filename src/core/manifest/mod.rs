//! core::manifest
//!
//! The package manifest document and its storage.
//!
//! # Overview
//!
//! A [`Manifest`] is a JSON object read from `package.json` (or the
//! configured file name). Stamping changes exactly one field, `version`.
//! Every other field keeps its value and its position, and the document is
//! written back with the indentation and line breaks it was read with.
//!
//! # Formatting
//!
//! Formatting is detected from the source text:
//! - `{}` or `[]` on their own use two spaces and `\n`
//! - otherwise the line breaks after the opening bracket are the newline,
//!   and the whitespace that follows is the indent
//! - a document with no line break after the opening bracket is compact:
//!   no indent, no trailing newline
//!
//! # Example
//!
//! ```
//! use release_stamp::core::manifest::Manifest;
//!
//! let text = "{\n\t\"name\": \"pkg\",\n\t\"version\": \"1.0.0\"\n}\n";
//! let mut manifest = Manifest::parse("package.json", text).unwrap();
//!
//! manifest.set_version("2.0.0");
//! assert_eq!(
//!     manifest.render(),
//!     "{\n\t\"name\": \"pkg\",\n\t\"version\": \"2.0.0\"\n}\n"
//! );
//! ```

pub mod store;

pub use store::{FsManifestStore, ManifestStore, DEFAULT_MANIFEST_FILE};

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from loading or saving a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found at '{path}'")]
    NotFound { path: PathBuf },

    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("manifest '{path}' is not a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("failed to write manifest '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

const DEFAULT_INDENT: &str = "  ";
const DEFAULT_NEWLINE: &str = "\n";

/// `JSON.stringify`-compatible indents are capped at ten characters.
const MAX_INDENT_CHARS: usize = 10;

const BOM: char = '\u{feff}';

/// Indentation and line-break style of a manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub indent: String,
    pub newline: String,
}

impl Format {
    /// Detect the formatting of a JSON document.
    pub fn detect(text: &str) -> Self {
        if let Some(newline) = detect_empty(text) {
            return Self {
                indent: DEFAULT_INDENT.to_string(),
                newline: newline.to_string(),
            };
        }

        let Some(rest) = text.trim_start().strip_prefix(['{', '[']) else {
            return Self::compact();
        };

        let newline_len = line_breaks_len(rest);
        if newline_len == 0 {
            return Self::compact();
        }

        let (newline, after) = rest.split_at(newline_len);
        let indent: String = after.chars().take_while(|c| c.is_whitespace()).collect();

        Self {
            indent,
            newline: newline.to_string(),
        }
    }

    fn compact() -> Self {
        Self {
            indent: String::new(),
            newline: String::new(),
        }
    }
}

/// `{}` / `[]` optionally followed by line breaks only.
fn detect_empty(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("{}").or_else(|| text.strip_prefix("[]"))?;
    if rest.is_empty() {
        return Some(DEFAULT_NEWLINE);
    }
    if line_breaks_len(rest) == rest.len() {
        Some(rest)
    } else {
        None
    }
}

/// Length of the leading run of `\n` / `\r\n` sequences.
fn line_breaks_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    loop {
        if bytes.get(i) == Some(&b'\n') {
            i += 1;
        } else if bytes.get(i) == Some(&b'\r') && bytes.get(i + 1) == Some(&b'\n') {
            i += 2;
        } else {
            return i;
        }
    }
}

/// A loaded package manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    content: Map<String, Value>,
    format: Format,
    source: String,
}

impl Manifest {
    /// Parse manifest text read from `path`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::ParseError` for malformed JSON and
    /// `ManifestError::NotAnObject` when the root is not an object.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, ManifestError> {
        let path = path.into();
        let body = text.strip_prefix(BOM).unwrap_or(text);

        let value: Value = serde_json::from_str(body).map_err(|e| ManifestError::ParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let Value::Object(content) = value else {
            return Err(ManifestError::NotAnObject { path });
        };

        Ok(Self {
            format: Format::detect(body),
            content,
            source: text.to_string(),
            path,
        })
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `version` field, if present and a string.
    pub fn version(&self) -> Option<&str> {
        self.content.get("version").and_then(Value::as_str)
    }

    /// Replace the `version` field, keeping its position if it exists.
    pub fn set_version(&mut self, version: &str) {
        self.content
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// All top-level fields.
    pub fn content(&self) -> &Map<String, Value> {
        &self.content
    }

    /// Detected formatting.
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// Serialize using the detected formatting.
    pub fn render(&self) -> String {
        let body = if self.format.indent.is_empty() {
            Value::Object(self.content.clone()).to_string()
        } else {
            let indent: String = self.format.indent.chars().take(MAX_INDENT_CHARS).collect();
            render_pretty(&self.content, indent.as_bytes())
        };

        format!("{body}\n").replace('\n', &self.format.newline)
    }

    /// True when [`Manifest::render`] differs from the text that was loaded.
    ///
    /// A leading byte-order mark on the loaded text is ignored.
    pub fn is_modified(&self) -> bool {
        let source = self.source.strip_prefix(BOM).unwrap_or(&self.source);
        self.render().trim() != source.trim()
    }
}

fn render_pretty(content: &Map<String, Value>, indent: &[u8]) -> String {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    // Writes into a Vec are infallible.
    if content.serialize(&mut serializer).is_err() {
        return Value::Object(content.clone()).to_string();
    }
    String::from_utf8_lossy(&out).into_owned()
}
