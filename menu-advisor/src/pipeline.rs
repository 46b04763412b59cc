//! Document processing: detect → extract → parse → store.

use std::{io::Read, sync::Arc};

use crate::{
    config::AdvisorConfig,
    error::{AdvisorError, ExtractionFailure, ProcessingError, ProcessingStage},
    extract::ExtractionDispatcher,
    model::{DocumentKind, DocumentSource},
    parser::ParserRegistry,
    store::MenuStore,
};

/// Result of a successful processing run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedDocument {
    /// Tracking record in its `completed` state.
    pub document: DocumentSource,
    /// Number of menus upserted into the store.
    pub menu_count: usize,
}

/// Runs uploaded documents through extraction and parsing into the store.
///
/// Each call is synchronous and independent. The store is only touched
/// after parsing succeeded, so a failed document never leaves a partial
/// batch behind.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use menu_advisor::{pipeline::DocumentProcessor, store::MenuStore};
///
/// let store = Arc::new(MenuStore::new());
/// let processor = DocumentProcessor::new(Arc::clone(&store));
///
/// let body = r#"[{"date": "2025-01-13T00:00:00Z", "main_dish": "鶏肉の照り焼き"}]"#;
/// let done = processor.process_document(None, "week.json", &mut body.as_bytes()).unwrap();
/// assert_eq!(done.document.status.as_str(), "completed");
/// assert_eq!(store.len(), 1);
///
/// let failed = processor.process_document(None, "week.pdf", &mut "%PDF".as_bytes()).unwrap_err();
/// assert_eq!(failed.document.status.as_str(), "error");
/// ```
#[derive(Debug)]
pub struct DocumentProcessor {
    store: Arc<MenuStore>,
    dispatcher: ExtractionDispatcher,
    parsers: ParserRegistry,
}

impl DocumentProcessor {
    /// Creates a processor with the default extractors and parsers.
    pub fn new(store: Arc<MenuStore>) -> Self {
        Self {
            store,
            dispatcher: ExtractionDispatcher::default(),
            parsers: ParserRegistry::default(),
        }
    }

    /// Creates a processor honoring the configured size limit.
    pub fn from_config(store: Arc<MenuStore>, config: &AdvisorConfig) -> Self {
        Self::new(store).with_dispatcher(ExtractionDispatcher::new(config.max_document_bytes))
    }

    pub fn with_dispatcher(mut self, dispatcher: ExtractionDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_parsers(mut self, parsers: ParserRegistry) -> Self {
        self.parsers = parsers;
        self
    }

    /// Processes one uploaded document.
    ///
    /// `declared` overrides extension-based detection of `filename`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessingError`] naming the failed stage. It carries the
    /// document record in `error` status, with the same message recorded in
    /// `error_message`, and the original cause as its source.
    pub fn process_document(
        &self,
        declared: Option<DocumentKind>,
        filename: &str,
        reader: &mut dyn Read,
    ) -> Result<ProcessedDocument, ProcessingError> {
        let mut document = DocumentSource::new(filename, declared);
        log::info!("Processing document {} ({})", document.id, filename);
        document.begin();

        let kind = match self.dispatcher.resolve_kind(declared, filename) {
            Ok(kind) => kind,
            Err(e) => return Err(fail(document, ProcessingStage::Detect, e)),
        };
        document.kind = Some(kind);

        let extracted = match self.dispatcher.extract(kind, &document.id, reader) {
            Ok(data) => data,
            Err(ExtractionFailure { partial, error }) => {
                if let Some(shell) = partial {
                    log::debug!(
                        "Discarding placeholder extraction for {}: confidence {}, metadata {:?}",
                        shell.source_id,
                        shell.confidence,
                        shell.metadata
                    );
                }
                return Err(fail(document, ProcessingStage::Extract, error));
            }
        };

        let menus = match self.parsers.parse(&extracted) {
            Ok(menus) => menus,
            Err(e) => return Err(fail(document, ProcessingStage::Parse, e)),
        };

        let menu_count = self.store.upsert_all(menus);
        document.complete();
        log::info!(
            "Document {} completed: {} menus stored",
            document.id,
            menu_count
        );

        Ok(ProcessedDocument {
            document,
            menu_count,
        })
    }
}

fn fail(
    mut document: DocumentSource,
    stage: ProcessingStage,
    source: AdvisorError,
) -> ProcessingError {
    let message = format!("{}: {}", stage.context(), source);
    log::warn!("Document {} failed: {}", document.id, message);
    document.fail(message);
    ProcessingError {
        stage,
        document: Box::new(document),
        source,
    }
}
