//! Error types for menu ingestion and suggestion.

use std::fmt;

use chrono::NaiveDate;

use crate::model::{DocumentSource, ExtractedMenuData};

/// Result type alias for advisor operations.
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Errors that can occur while ingesting menus or producing suggestions.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// The file extension or declared document kind is not recognized.
    #[error("unsupported file type: {extension}")]
    UnsupportedType {
        /// The offending extension (including the leading dot) or kind name.
        extension: String,
    },

    /// The requested extraction or parsing capability does not exist yet.
    #[error("{feature} not yet implemented")]
    NotImplemented {
        /// Human-readable name of the missing capability.
        feature: String,
    },

    /// The menu payload is not a valid JSON array of menu records.
    #[error("failed to parse JSON menu data: {0}")]
    MalformedData(#[from] serde_json::Error),

    /// No school lunch menu is stored for the requested day.
    #[error("no school lunch found for date: {date}")]
    NotFound {
        /// The requested calendar day.
        date: NaiveDate,
    },

    /// Reading the input stream or seed file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The uploaded document exceeds the configured size limit.
    #[error("document exceeds the {limit} byte limit")]
    DocumentTooLarge {
        /// Configured limit in bytes.
        limit: u64,
    },

    /// A date string could not be read as `YYYY-MM-DD`.
    #[error("invalid date '{input}', expected YYYY-MM-DD: {source}")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// Underlying chrono parse error.
        #[source]
        source: chrono::ParseError,
    },

    /// Meal type is neither breakfast nor dinner and strict checking is on.
    #[error("unknown meal type: {meal_type}")]
    UnknownMealType {
        /// The rejected meal type.
        meal_type: String,
    },

    /// Configuration error.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Fieldless discriminant of [`AdvisorError`], handy for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedType,
    NotImplemented,
    MalformedData,
    NotFound,
    Io,
    DocumentTooLarge,
    InvalidDate,
    UnknownMealType,
    InvalidConfig,
}

impl AdvisorError {
    /// Creates an unsupported type error.
    #[inline]
    pub fn unsupported(extension: impl Into<String>) -> Self {
        Self::UnsupportedType {
            extension: extension.into(),
        }
    }

    /// Creates a not-implemented error.
    #[inline]
    pub fn not_implemented(feature: impl Into<String>) -> Self {
        Self::NotImplemented {
            feature: feature.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::MalformedData(_) => ErrorKind::MalformedData,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Io(_) => ErrorKind::Io,
            Self::DocumentTooLarge { .. } => ErrorKind::DocumentTooLarge,
            Self::InvalidDate { .. } => ErrorKind::InvalidDate,
            Self::UnknownMealType { .. } => ErrorKind::UnknownMealType,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}

/// A failed extraction attempt.
///
/// Extractors that cannot produce real text still hand back a diagnostic
/// shell in `partial`. The `error` is authoritative; `partial` is only for
/// inspection and logging.
#[derive(Debug)]
pub struct ExtractionFailure {
    /// Best-effort data produced before failing, if any.
    pub partial: Option<ExtractedMenuData>,
    /// Why extraction failed.
    pub error: AdvisorError,
}

impl ExtractionFailure {
    /// Creates a failure with no partial data.
    #[inline]
    pub fn new(error: AdvisorError) -> Self {
        Self {
            partial: None,
            error,
        }
    }

    /// Creates a failure carrying a diagnostic shell.
    #[inline]
    pub fn with_partial(partial: ExtractedMenuData, error: AdvisorError) -> Self {
        Self {
            partial: Some(partial),
            error,
        }
    }
}

impl From<AdvisorError> for ExtractionFailure {
    fn from(error: AdvisorError) -> Self {
        Self::new(error)
    }
}

impl From<std::io::Error> for ExtractionFailure {
    fn from(error: std::io::Error) -> Self {
        Self::new(error.into())
    }
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

/// Step of the document pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Resolving the document kind from the filename.
    Detect,
    /// Pulling raw text out of the document.
    Extract,
    /// Turning raw text into menu records.
    Parse,
}

impl ProcessingStage {
    /// Context prefix recorded on the document's error message.
    pub fn context(&self) -> &'static str {
        match self {
            Self::Detect => "Failed to detect document type",
            Self::Extract => "Failed to extract data",
            Self::Parse => "Failed to parse menu data",
        }
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.context())
    }
}

/// Failure of a document processing run.
///
/// Carries the document record left in `error` status alongside the
/// original cause, so callers can inspect both.
#[derive(Debug, thiserror::Error)]
#[error("{stage}: {source}")]
pub struct ProcessingError {
    /// The stage that failed.
    pub stage: ProcessingStage,
    /// Tracking record in its terminal `error` state.
    pub document: Box<DocumentSource>,
    /// The lower-layer cause.
    #[source]
    pub source: AdvisorError,
}

impl ProcessingError {
    /// Returns the kind of the underlying cause.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_display() {
        let err = AdvisorError::unsupported(".txt");
        assert_eq!(err.to_string(), "unsupported file type: .txt");
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }

    #[test]
    fn test_not_found_names_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let err = AdvisorError::NotFound { date };
        assert!(err.to_string().contains("2025-01-20"));
    }

    #[test]
    fn test_malformed_from_json() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: AdvisorError = json_err.into();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert!(err.to_string().starts_with("failed to parse JSON menu data"));
    }

    #[test]
    fn test_stage_context() {
        assert_eq!(
            ProcessingStage::Extract.to_string(),
            "Failed to extract data"
        );
    }
}
