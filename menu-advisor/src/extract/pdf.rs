//! PDF extractors. Neither text-layer extraction nor OCR exists yet.

use std::io::Read;

use super::{not_implemented, ExtractionResult, MenuExtractor};
use crate::model::DocumentKind;

/// Extracts the text layer of a PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl MenuExtractor for PdfTextExtractor {
    fn name(&self) -> &'static str {
        "pdf_text"
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::PdfText
    }

    fn extract(&self, source_id: &str, _reader: &mut dyn Read) -> ExtractionResult {
        Err(not_implemented(
            source_id,
            DocumentKind::PdfText,
            "PDF text extraction",
        ))
    }
}

/// OCRs a scanned PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfImageExtractor;

impl MenuExtractor for PdfImageExtractor {
    fn name(&self) -> &'static str {
        "pdf_image"
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::PdfImage
    }

    fn extract(&self, source_id: &str, _reader: &mut dyn Read) -> ExtractionResult {
        Err(not_implemented(
            source_id,
            DocumentKind::PdfImage,
            "PDF image OCR",
        ))
    }
}
