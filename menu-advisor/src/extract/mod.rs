//! Extractors that turn an uploaded document into raw menu text.

mod image;
mod json;
mod pdf;

use std::{collections::BTreeMap, io::Read};

pub use image::ImageExtractor;
pub use json::JsonExtractor;
pub use pdf::{PdfImageExtractor, PdfTextExtractor};

use crate::{
    error::{AdvisorError, ExtractionFailure, Result},
    model::{DocumentKind, ExtractedMenuData, META_STATUS, STATUS_NOT_IMPLEMENTED},
};

/// Upload size limit used when none is configured (32 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 32 << 20;

/// Outcome of a single extraction.
pub type ExtractionResult = std::result::Result<ExtractedMenuData, ExtractionFailure>;

/// Trait for format-specific extractors.
///
/// Each extractor handles exactly one [`DocumentKind`]. Extractors that are
/// not implemented yet are still registered: they fail with
/// [`AdvisorError::NotImplemented`] and attach a zero-confidence diagnostic
/// shell, so a real implementation can be swapped in later through
/// [`ExtractionDispatcher::with_extractor`].
pub trait MenuExtractor: Send + Sync + std::fmt::Debug {
    /// Returns the name of this extractor for logging.
    fn name(&self) -> &'static str;

    /// The document kind this extractor handles.
    fn kind(&self) -> DocumentKind;

    /// Reads `reader` and returns the extracted text for document `source_id`.
    fn extract(&self, source_id: &str, reader: &mut dyn Read) -> ExtractionResult;
}

/// Routes a document to the extractor registered for its kind.
///
/// # Examples
///
/// ```
/// use menu_advisor::{extract::ExtractionDispatcher, model::DocumentKind};
///
/// let dispatcher = ExtractionDispatcher::default();
/// let kind = dispatcher.resolve_kind(None, "week3.json").unwrap();
/// assert_eq!(kind, DocumentKind::Json);
///
/// let data = dispatcher.extract(kind, "doc_1", &mut "[]".as_bytes()).unwrap();
/// assert_eq!(data.confidence, 1.0);
/// assert_eq!(data.format(), Some("json"));
/// ```
#[derive(Debug)]
pub struct ExtractionDispatcher {
    extractors: BTreeMap<DocumentKind, Box<dyn MenuExtractor>>,
}

impl Default for ExtractionDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENT_BYTES)
    }
}

impl ExtractionDispatcher {
    /// Creates a dispatcher with one extractor per document kind.
    ///
    /// JSON documents larger than `max_document_bytes` are rejected.
    pub fn new(max_document_bytes: u64) -> Self {
        Self::empty()
            .with_extractor(Box::new(JsonExtractor::with_limit(max_document_bytes)))
            .with_extractor(Box::new(PdfTextExtractor))
            .with_extractor(Box::new(PdfImageExtractor))
            .with_extractor(Box::new(ImageExtractor))
    }

    /// Creates a dispatcher with no extractors registered.
    pub fn empty() -> Self {
        Self {
            extractors: BTreeMap::new(),
        }
    }

    /// Registers `extractor`, replacing any previous one for the same kind.
    pub fn with_extractor(mut self, extractor: Box<dyn MenuExtractor>) -> Self {
        self.extractors.insert(extractor.kind(), extractor);
        self
    }

    /// Uses the declared kind if there is one, otherwise the filename extension.
    pub fn resolve_kind(
        &self,
        declared: Option<DocumentKind>,
        filename: &str,
    ) -> Result<DocumentKind> {
        match declared {
            Some(kind) => Ok(kind),
            None => DocumentKind::from_filename(filename),
        }
    }

    /// Extracts raw text from `reader` with the extractor for `kind`.
    pub fn extract(
        &self,
        kind: DocumentKind,
        source_id: &str,
        reader: &mut dyn Read,
    ) -> ExtractionResult {
        let extractor = self
            .extractors
            .get(&kind)
            .ok_or_else(|| AdvisorError::unsupported(kind.as_str()))?;

        log::debug!(
            "Extracting document {} with {} extractor",
            source_id,
            extractor.name()
        );
        extractor.extract(source_id, reader)
    }

    /// Returns the names of all registered extractors.
    pub fn extractor_names(&self) -> Vec<&'static str> {
        self.extractors.values().map(|e| e.name()).collect()
    }
}

/// Builds the failure returned by extractors that are not implemented yet.
pub(crate) fn not_implemented(
    source_id: &str,
    kind: DocumentKind,
    feature: &str,
) -> ExtractionFailure {
    let error = AdvisorError::not_implemented(feature);
    let shell = ExtractedMenuData::new(source_id, error.to_string(), 0.0, kind.as_str())
        .with_meta(META_STATUS, STATUS_NOT_IMPLEMENTED);
    ExtractionFailure::with_partial(shell, error)
}
