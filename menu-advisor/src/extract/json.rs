//! Extractor for JSON menu payloads.

use std::io::Read;

use super::{ExtractionResult, MenuExtractor, DEFAULT_MAX_DOCUMENT_BYTES};
use crate::{
    error::AdvisorError,
    model::{DocumentKind, ExtractedMenuData, ENCODING_UTF8_LOSSY, META_ENCODING},
};

/// Reads a JSON document verbatim.
///
/// JSON is already structured, so extraction is exact: the whole stream
/// becomes the raw text with confidence 1.0. The only failures are I/O
/// errors and documents over the size limit. Bytes that are not UTF-8
/// (a Shift_JIS export, say) are replaced with U+FFFD rather than rejected.
#[derive(Debug, Clone, Copy)]
pub struct JsonExtractor {
    max_bytes: u64,
}

impl Default for JsonExtractor {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_DOCUMENT_BYTES)
    }
}

impl JsonExtractor {
    pub const fn with_limit(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl MenuExtractor for JsonExtractor {
    #[inline]
    fn name(&self) -> &'static str {
        "json"
    }

    #[inline]
    fn kind(&self) -> DocumentKind {
        DocumentKind::Json
    }

    fn extract(&self, source_id: &str, reader: &mut dyn Read) -> ExtractionResult {
        // One byte past the limit is enough to tell an oversized document.
        let mut bytes = Vec::new();
        Read::take(reader, self.max_bytes.saturating_add(1)).read_to_end(&mut bytes)?;

        if bytes.len() as u64 > self.max_bytes {
            return Err(AdvisorError::DocumentTooLarge {
                limit: self.max_bytes,
            }
            .into());
        }

        let data = match String::from_utf8(bytes) {
            Ok(text) => ExtractedMenuData::new(source_id, text, 1.0, DocumentKind::Json.as_str()),
            Err(e) => {
                // Invalid sequences become U+FFFD; the parser decides what that means.
                log::debug!(
                    "Document {} is not valid UTF-8 at byte {}, decoding lossily",
                    source_id,
                    e.utf8_error().valid_up_to()
                );
                let text = String::from_utf8_lossy(e.as_bytes()).into_owned();
                ExtractedMenuData::new(source_id, text, 1.0, DocumentKind::Json.as_str())
                    .with_meta(META_ENCODING, ENCODING_UTF8_LOSSY)
            }
        };
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;

    const PAYLOAD: &str = r#"[{"date": "2025-01-20T00:00:00Z", "main_dish": "ハンバーグ"}]"#;

    #[test]
    fn test_extract_keeps_text_verbatim() {
        let data = JsonExtractor::default()
            .extract("test_id", &mut PAYLOAD.as_bytes())
            .unwrap();

        assert_eq!(data.source_id, "test_id");
        assert_eq!(data.raw_text, PAYLOAD);
        assert_eq!(data.confidence, 1.0);
        assert_eq!(data.format(), Some("json"));
    }

    #[test]
    fn test_extract_does_not_validate_json() {
        let data = JsonExtractor::default()
            .extract("test_id", &mut "{not json".as_bytes())
            .unwrap();
        assert_eq!(data.raw_text, "{not json");
    }

    #[test]
    fn test_extract_rejects_oversized_document() {
        let failure = JsonExtractor::with_limit(8)
            .extract("test_id", &mut PAYLOAD.as_bytes())
            .unwrap_err();
        assert_eq!(failure.error.kind(), ErrorKind::DocumentTooLarge);
    }

    #[test]
    fn test_extract_at_exact_limit() {
        let data = JsonExtractor::with_limit(2)
            .extract("test_id", &mut "[]".as_bytes())
            .unwrap();
        assert_eq!(data.raw_text, "[]");
    }

    #[test]
    fn test_extract_replaces_invalid_utf8() {
        let mut payload = br#"[{"date": "2025-01-13T00:00:00Z", "main_dish": ""#.to_vec();
        payload.extend_from_slice(&[0x8c, 0x7b]);
        payload.extend_from_slice(br#""}]"#);

        let data = JsonExtractor::default()
            .extract("test_id", &mut payload.as_slice())
            .unwrap();

        assert!(data.raw_text.contains('\u{FFFD}'));
        assert_eq!(data.confidence, 1.0);
        assert_eq!(data.format(), Some("json"));
        assert_eq!(
            data.metadata.get(META_ENCODING).map(String::as_str),
            Some(ENCODING_UTF8_LOSSY)
        );
    }

    #[test]
    fn test_valid_utf8_has_no_encoding_tag() {
        let data = JsonExtractor::default()
            .extract("test_id", &mut PAYLOAD.as_bytes())
            .unwrap();
        assert!(data.metadata.get(META_ENCODING).is_none());
    }

    #[test]
    fn test_limit_inside_multibyte_character() {
        let payload = r#"[{"date": "2025-01-13T00:00:00Z", "main_dish": "鶏肉の照り焼き"}]"#;
        // Cut one byte into the three-byte 鶏.
        let limit = payload.find('鶏').unwrap() as u64;

        let failure = JsonExtractor::with_limit(limit)
            .extract("test_id", &mut payload.as_bytes())
            .unwrap_err();

        assert_eq!(failure.error.kind(), ErrorKind::DocumentTooLarge);
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"))
        }
    }

    #[test]
    fn test_extract_surfaces_io_errors() {
        let failure = JsonExtractor::default()
            .extract("test_id", &mut BrokenReader)
            .unwrap_err();
        assert_eq!(failure.error.kind(), ErrorKind::Io);
        assert!(failure.partial.is_none());
    }
}
