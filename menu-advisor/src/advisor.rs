//! Facade wiring the store, the document pipeline and the suggestion engine.

use std::{io::Read, path::Path, sync::Arc};

use chrono::NaiveDate;

use crate::{
    config::AdvisorConfig,
    error::{ProcessingError, Result},
    model::{DocumentKind, HomeMenuSuggestion, MealType, SchoolLunchMenu},
    pipeline::{DocumentProcessor, ProcessedDocument},
    store::{MenuStore, SeedLoad},
    suggest::SuggestionEngine,
};

/// Entry point for callers such as an HTTP layer or the CLI.
///
/// All components share one [`MenuStore`], so menus ingested through
/// [`process_document`](Self::process_document) are immediately visible to
/// [`suggest`](Self::suggest).
#[derive(Debug)]
pub struct MenuAdvisor {
    store: Arc<MenuStore>,
    processor: DocumentProcessor,
    engine: SuggestionEngine,
}

impl Default for MenuAdvisor {
    fn default() -> Self {
        Self::new(&AdvisorConfig::default())
    }
}

impl MenuAdvisor {
    /// Creates an advisor with an empty store. Does not load the seed.
    pub fn new(config: &AdvisorConfig) -> Self {
        let store = Arc::new(MenuStore::new());
        Self {
            processor: DocumentProcessor::from_config(Arc::clone(&store), config),
            engine: SuggestionEngine::from_config(Arc::clone(&store), config),
            store,
        }
    }

    /// Creates an advisor and loads the configured seed file, if any.
    ///
    /// Seed problems never stop startup: a missing, unreadable or malformed
    /// seed is logged and the advisor starts with an empty store.
    pub fn bootstrap(config: &AdvisorConfig) -> Self {
        let advisor = Self::new(config);
        if let Some(path) = &config.seed_path {
            if let Err(e) = advisor.load_seed(path) {
                log::warn!(
                    "Could not load school lunch data from {}: {}; running without seed data",
                    path.display(),
                    e
                );
            }
        }
        advisor
    }

    /// Processes one uploaded document into the store.
    pub fn process_document(
        &self,
        declared: Option<DocumentKind>,
        filename: &str,
        reader: &mut dyn Read,
    ) -> std::result::Result<ProcessedDocument, ProcessingError> {
        self.processor.process_document(declared, filename, reader)
    }

    /// Every stored menu, in storage order.
    pub fn list_menus(&self) -> Vec<SchoolLunchMenu> {
        self.store.list_all()
    }

    /// Stored menus between `from` and `to`, inclusive.
    pub fn menus_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<SchoolLunchMenu> {
        self.store.range(from, to)
    }

    /// Suggests a home meal for `day`.
    pub fn suggest(
        &self,
        day: NaiveDate,
        meal_type: impl Into<MealType>,
    ) -> Result<HomeMenuSuggestion> {
        self.engine.suggest(day, meal_type)
    }

    /// Suggests a home meal for a `YYYY-MM-DD` date string.
    pub fn suggest_iso(&self, date: &str, meal_type: &str) -> Result<HomeMenuSuggestion> {
        self.engine.suggest_iso(date, meal_type)
    }

    /// Bulk-loads menus from a JSON seed file.
    pub fn load_seed(&self, path: impl AsRef<Path>) -> Result<SeedLoad> {
        self.store.load_seed(path)
    }

    pub fn store(&self) -> &Arc<MenuStore> {
        &self.store
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_uploaded_menus_feed_suggestions() {
        let advisor = MenuAdvisor::default();
        let body = r#"[{"date": "2025-01-15T00:00:00Z", "main_dish": "豚の生姜焼き"}]"#;
        advisor
            .process_document(None, "week.json", &mut body.as_bytes())
            .unwrap();

        let dinner = advisor.suggest_iso("2025-01-15", "dinner").unwrap();
        assert_eq!(dinner.main_dish, "鯖の塩焼き");
        assert_eq!(advisor.list_menus().len(), 1);
    }

    #[test]
    fn test_bootstrap_without_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AdvisorConfig {
            seed_path: Some(dir.path().join("missing.json")),
            ..AdvisorConfig::default()
        };
        let advisor = MenuAdvisor::bootstrap(&config);
        assert!(advisor.list_menus().is_empty());
    }

    #[test]
    fn test_bootstrap_with_malformed_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"main_dish\": 1}}]").unwrap();
        let config = AdvisorConfig {
            seed_path: Some(file.path().to_path_buf()),
            ..AdvisorConfig::default()
        };
        let advisor = MenuAdvisor::bootstrap(&config);
        assert!(advisor.list_menus().is_empty());

        let err = advisor.load_seed(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
    }
}
