//! Home meal suggestions that complement the day's school lunch.

mod rules;

use std::sync::Arc;

use chrono::NaiveDate;

pub use rules::{Indicator, MenuTemplate, RuleSet, RuleSetBuilder, Selection};

use crate::{
    config::AdvisorConfig,
    error::{AdvisorError, Result},
    model::{FoodCatalog, HomeMenuSuggestion, MealType},
    store::MenuStore,
};

/// Produces [`HomeMenuSuggestion`]s from the menus in a [`MenuStore`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::DateTime;
/// use menu_advisor::{model::SchoolLunchMenu, store::MenuStore, suggest::SuggestionEngine};
///
/// let date = DateTime::parse_from_rfc3339("2025-01-13T00:00:00Z").unwrap();
/// let store = Arc::new(MenuStore::with_menus([SchoolLunchMenu::new(date, "鶏肉の照り焼き")]));
/// let engine = SuggestionEngine::new(store);
///
/// let dinner = engine.suggest(date.date_naive(), "dinner").unwrap();
/// assert_eq!(dinner.main_dish, "魚の煮付け");
/// assert_eq!(dinner.school_lunch_ref, "鶏肉の照り焼き");
/// ```
#[derive(Debug)]
pub struct SuggestionEngine {
    store: Arc<MenuStore>,
    breakfast: RuleSet,
    dinner: RuleSet,
    reject_unknown_meal_types: bool,
}

impl SuggestionEngine {
    /// Creates an engine with the built-in breakfast and dinner rules.
    pub fn new(store: Arc<MenuStore>) -> Self {
        let engine = Self {
            store,
            breakfast: RuleSet::breakfast(),
            dinner: RuleSet::dinner(),
            reject_unknown_meal_types: false,
        };
        engine.log_catalog_gaps();
        engine
    }

    pub fn from_config(store: Arc<MenuStore>, config: &AdvisorConfig) -> Self {
        let mut engine = Self::new(store);
        engine.reject_unknown_meal_types = config.reject_unknown_meal_types;
        engine
    }

    pub fn with_breakfast_rules(mut self, rules: RuleSet) -> Self {
        self.breakfast = rules;
        self.log_catalog_gaps();
        self
    }

    pub fn with_dinner_rules(mut self, rules: RuleSet) -> Self {
        self.dinner = rules;
        self.log_catalog_gaps();
        self
    }

    /// Rule set used for `meal_type`, if it has one.
    pub fn rules_for(&self, meal_type: &MealType) -> Option<&RuleSet> {
        match meal_type {
            MealType::Breakfast => Some(&self.breakfast),
            MealType::Dinner => Some(&self.dinner),
            MealType::Other(_) => None,
        }
    }

    /// Suggests a home meal for `day`.
    ///
    /// A meal type other than breakfast or dinner yields a suggestion with
    /// only the date, meal type and lunch reference filled in, unless the
    /// engine was configured to reject such meal types.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::NotFound`] if no school lunch is stored for
    /// `day`; no default suggestion is made. Returns
    /// [`AdvisorError::UnknownMealType`] for unknown meal types in strict mode.
    pub fn suggest(
        &self,
        day: NaiveDate,
        meal_type: impl Into<MealType>,
    ) -> Result<HomeMenuSuggestion> {
        let meal_type = meal_type.into();
        let lunch = self.store.lookup(day)?;
        let mut suggestion = HomeMenuSuggestion::bare(day, meal_type.clone(), &lunch.main_dish);

        match self.rules_for(&meal_type) {
            Some(rules) => {
                let selection = rules.select(&lunch.main_dish);
                match selection.indicator {
                    Some(indicator) => log::debug!(
                        "{} for {}: lunch '{}' {}",
                        meal_type,
                        day,
                        lunch.main_dish,
                        indicator
                    ),
                    None => log::debug!(
                        "{} for {}: no rule matched '{}', using default",
                        meal_type,
                        day,
                        lunch.main_dish
                    ),
                }
                selection.template.apply(&mut suggestion);
            }
            None if self.reject_unknown_meal_types => {
                return Err(AdvisorError::UnknownMealType {
                    meal_type: meal_type.to_string(),
                });
            }
            None => {
                log::debug!("No rules for meal type '{}', returning bare suggestion", meal_type);
            }
        }

        Ok(suggestion)
    }

    /// Like [`suggest`](Self::suggest) but takes the day as `YYYY-MM-DD`.
    pub fn suggest_iso(&self, date: &str, meal_type: &str) -> Result<HomeMenuSuggestion> {
        self.suggest(parse_day(date)?, meal_type)
    }

    fn log_catalog_gaps(&self) {
        let catalog = FoodCatalog::default_catalog();
        for (meal, rules) in [("breakfast", &self.breakfast), ("dinner", &self.dinner)] {
            let missing = rules.missing_from(catalog);
            if !missing.is_empty() {
                log::debug!("{} rules name uncatalogued dishes: {:?}", meal, missing);
            }
        }
    }
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|source| {
        AdvisorError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}
