//! Uploaded documents and the raw data extracted from them.

use std::{collections::BTreeMap, fmt, path::Path, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AdvisorError, Result};

/// Metadata key naming the format of the extracted text.
pub const META_FORMAT: &str = "format";
/// Metadata key describing extractor status.
pub const META_STATUS: &str = "status";
/// Value of [`META_STATUS`] on placeholder extraction results.
pub const STATUS_NOT_IMPLEMENTED: &str = "not_implemented";
/// Metadata key set when the document text had to be decoded lossily.
pub const META_ENCODING: &str = "encoding";
/// Value of [`META_ENCODING`] when invalid UTF-8 was replaced with U+FFFD.
pub const ENCODING_UTF8_LOSSY: &str = "utf8_lossy";

/// Content format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// JSON array of menu records.
    Json,
    /// PDF with an extractable text layer.
    PdfText,
    /// Scanned PDF requiring OCR.
    PdfImage,
    /// Photo or image file requiring OCR.
    Image,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Json => "json",
            DocumentKind::PdfText => "pdf_text",
            DocumentKind::PdfImage => "pdf_image",
            DocumentKind::Image => "image",
        }
    }

    /// Resolves a kind from a filename's extension, ignoring case.
    ///
    /// PDFs always resolve to [`DocumentKind::PdfText`]; the content is not
    /// inspected to tell text PDFs from scans.
    ///
    /// # Examples
    ///
    /// ```
    /// use menu_advisor::model::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_filename("menu.JSON").unwrap(), DocumentKind::Json);
    /// assert_eq!(DocumentKind::from_filename("scan.pdf").unwrap(), DocumentKind::PdfText);
    /// assert!(DocumentKind::from_filename("notes.txt").is_err());
    /// ```
    pub fn from_filename(filename: &str) -> Result<Self> {
        // Everything from the last dot of the final segment, so `.json` is JSON.
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename);
        let ext = name
            .rfind('.')
            .map(|dot| name[dot..].to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            ".json" => Ok(DocumentKind::Json),
            ".pdf" => Ok(DocumentKind::PdfText),
            ".jpg" | ".jpeg" | ".png" | ".bmp" | ".gif" => Ok(DocumentKind::Image),
            _ => Err(AdvisorError::UnsupportedType { extension: ext }),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = AdvisorError;

    /// Parses a declared kind; both `pdf_text` and `pdf-text` spellings work.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "json" => Ok(DocumentKind::Json),
            "pdf_text" => Ok(DocumentKind::PdfText),
            "pdf_image" => Ok(DocumentKind::PdfImage),
            "image" => Ok(DocumentKind::Image),
            _ => Err(AdvisorError::unsupported(s)),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a processed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Error => "error",
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Completed | DocumentStatus::Error)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit record for one ingestion attempt.
///
/// Returned to the caller on success and on failure; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSource {
    pub id: String,
    /// Declared or detected kind; `None` until detection succeeds.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<DocumentKind>,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DocumentSource {
    /// Creates a `pending` record with a fresh id.
    pub fn new(original_name: impl Into<String>, kind: Option<DocumentKind>) -> Self {
        Self {
            id: generate_document_id(),
            kind,
            original_name: original_name.into(),
            uploaded_at: Utc::now(),
            processed_at: None,
            status: DocumentStatus::Pending,
            error_message: None,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.status = DocumentStatus::Processing;
    }

    pub(crate) fn complete(&mut self) {
        self.processed_at = Some(Utc::now());
        self.status = DocumentStatus::Completed;
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.status = DocumentStatus::Error;
        self.error_message = Some(message.into());
    }
}

/// Raw text pulled from a document, before it is parsed into menus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMenuData {
    pub source_id: String,
    pub raw_text: String,
    pub extracted_at: DateTime<Utc>,
    /// Extraction reliability in `[0.0, 1.0]`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ExtractedMenuData {
    /// Creates extracted data tagged with `format`. Confidence is clamped to `[0, 1]`.
    pub fn new(
        source_id: impl Into<String>,
        raw_text: impl Into<String>,
        confidence: f64,
        format: &str,
    ) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(META_FORMAT.to_string(), format.to_string());
        Self {
            source_id: source_id.into(),
            raw_text: raw_text.into(),
            extracted_at: Utc::now(),
            confidence: confidence.clamp(0.0, 1.0),
            metadata,
        }
    }

    /// Adds a metadata tag.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The `format` tag, if present.
    pub fn format(&self) -> Option<&str> {
        self.metadata.get(META_FORMAT).map(String::as_str)
    }

    /// Returns true for diagnostic shells from unimplemented extractors.
    pub fn is_placeholder(&self) -> bool {
        self.metadata.get(META_STATUS).map(String::as_str) == Some(STATUS_NOT_IMPLEMENTED)
    }
}

fn generate_document_id() -> String {
    format!("doc_{}", Uuid::new_v4().simple())
}
