//! Photo/scan extractor. OCR is not wired up.

use std::io::Read;

use super::{not_implemented, ExtractionResult, MenuExtractor};
use crate::model::DocumentKind;

/// OCRs a photographed menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageExtractor;

impl MenuExtractor for ImageExtractor {
    fn name(&self) -> &'static str {
        "image"
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Image
    }

    fn extract(&self, source_id: &str, _reader: &mut dyn Read) -> ExtractionResult {
        Err(not_implemented(source_id, DocumentKind::Image, "Image OCR"))
    }
}
