//! School lunch menus and the home meals suggested against them.

use std::{convert::Infallible, fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A school lunch menu for one calendar day.
///
/// The JSON shape matches existing seed files: `date` is RFC 3339 and the
/// optional `soup`/`dessert` fields are left out when absent.
///
/// # Examples
///
/// ```
/// use menu_advisor::model::SchoolLunchMenu;
///
/// let menu: SchoolLunchMenu = serde_json::from_str(
///     r#"{"date": "2025-01-13T00:00:00Z", "main_dish": "鶏肉の照り焼き", "side_dishes": ["白米"]}"#,
/// ).unwrap();
/// assert_eq!(menu.calendar_day().to_string(), "2025-01-13");
/// assert!(menu.soup.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolLunchMenu {
    pub date: DateTime<FixedOffset>,
    #[serde(default)]
    pub main_dish: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub side_dishes: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub soup: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub dessert: Option<String>,
    #[serde(default)]
    pub nutrition: Nutrition,
}

impl SchoolLunchMenu {
    /// Creates a menu with the given date and main dish and nothing else.
    pub fn new(date: DateTime<FixedOffset>, main_dish: impl Into<String>) -> Self {
        Self {
            date,
            main_dish: main_dish.into(),
            side_dishes: Vec::new(),
            soup: None,
            dessert: None,
            nutrition: Nutrition::default(),
        }
    }

    /// Calendar day of this menu, taken in the offset the date was written in.
    #[inline]
    pub fn calendar_day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Nutrition snapshot carried through from the source document.
///
/// Values are never computed or checked, only passed along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub sodium_mg: f64,
    pub vegetables_servings: i32,
}

/// Which home meal a suggestion is for.
///
/// Anything other than `breakfast` or `dinner` is kept verbatim in
/// [`MealType::Other`] so it round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealType {
    Breakfast,
    Dinner,
    Other(String),
}

impl MealType {
    pub fn as_str(&self) -> &str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Dinner => "dinner",
            MealType::Other(raw) => raw,
        }
    }

    /// Returns true for the meal types the suggestion rules cover.
    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, MealType::Other(_))
    }
}

impl From<&str> for MealType {
    fn from(raw: &str) -> Self {
        match raw {
            "breakfast" => MealType::Breakfast,
            "dinner" => MealType::Dinner,
            other => MealType::Other(other.to_string()),
        }
    }
}

impl From<String> for MealType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "breakfast" => MealType::Breakfast,
            "dinner" => MealType::Dinner,
            _ => MealType::Other(raw),
        }
    }
}

impl From<MealType> for String {
    fn from(meal: MealType) -> Self {
        match meal {
            MealType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for MealType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A home meal suggested to complement a school lunch.
///
/// Built fresh for every request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeMenuSuggestion {
    /// Requested day at midnight UTC.
    pub date: DateTime<Utc>,
    pub meal_type: MealType,
    #[serde(default)]
    pub main_dish: String,
    #[serde(default)]
    pub side_dishes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soup: Option<String>,
    #[serde(default)]
    pub reason: String,
    /// Main dish of the school lunch that drove the decision.
    pub school_lunch_ref: String,
}

impl HomeMenuSuggestion {
    /// A suggestion with only the date, meal type and lunch reference set.
    pub fn bare(day: NaiveDate, meal_type: MealType, school_lunch_ref: impl Into<String>) -> Self {
        Self {
            date: day.and_time(chrono::NaiveTime::MIN).and_utc(),
            meal_type,
            main_dish: String::new(),
            side_dishes: Vec::new(),
            soup: None,
            reason: String::new(),
            school_lunch_ref: school_lunch_ref.into(),
        }
    }

    /// Returns true if any dish field was filled in.
    pub fn has_dishes(&self) -> bool {
        !self.main_dish.is_empty() || !self.side_dishes.is_empty() || self.soup.is_some()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let menu: SchoolLunchMenu = serde_json::from_value(json!({
            "date": "2025-01-20T00:00:00Z",
            "main_dish": "ハンバーグ",
            "side_dishes": ["野菜サラダ", "白米"],
            "soup": "コンソメスープ",
            "nutrition": {
                "calories": 700,
                "protein_g": 30.0,
                "carbs_g": 80.0,
                "fat_g": 25.0,
                "fiber_g": 5.0,
                "sodium_mg": 900,
                "vegetables_servings": 2
            }
        }))
        .unwrap();

        assert_eq!(menu.main_dish, "ハンバーグ");
        assert_eq!(menu.side_dishes, vec!["野菜サラダ", "白米"]);
        assert_eq!(menu.soup.as_deref(), Some("コンソメスープ"));
        assert_eq!(menu.dessert, None);
        assert_eq!(menu.nutrition.calories, 700);
        assert_eq!(menu.nutrition.sodium_mg, 900.0);
        assert_eq!(menu.nutrition.vegetables_servings, 2);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let menu: SchoolLunchMenu =
            serde_json::from_value(json!({"date": "2025-01-20T00:00:00Z", "side_dishes": null}))
                .unwrap();
        assert_eq!(menu.main_dish, "");
        assert!(menu.side_dishes.is_empty());
        assert_eq!(menu.nutrition, Nutrition::default());
    }

    #[test]
    fn test_empty_soup_is_omitted() {
        let menu: SchoolLunchMenu =
            serde_json::from_value(json!({"date": "2025-01-20T00:00:00Z", "soup": ""})).unwrap();
        assert_eq!(menu.soup, None);

        let out = serde_json::to_value(&menu).unwrap();
        assert!(out.get("soup").is_none());
        assert!(out.get("dessert").is_none());
        assert_eq!(out["side_dishes"], json!([]));
    }

    #[test]
    fn test_calendar_day_uses_own_offset() {
        let menu: SchoolLunchMenu =
            serde_json::from_value(json!({"date": "2025-01-20T00:00:00+09:00"})).unwrap();
        assert_eq!(
            menu.calendar_day(),
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
        );
    }

    #[test]
    fn test_meal_type_keeps_unknown_values() {
        assert_eq!(MealType::from("breakfast"), MealType::Breakfast);
        assert_eq!(MealType::from("dinner"), MealType::Dinner);
        assert_eq!(MealType::from("lunch"), MealType::Other("lunch".into()));
        assert!(!MealType::from("Dinner").is_known());

        let out = serde_json::to_value(MealType::Other("snack".into())).unwrap();
        assert_eq!(out, json!("snack"));
    }

    #[test]
    fn test_bare_suggestion_serializes_midnight_utc() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let suggestion = HomeMenuSuggestion::bare(day, MealType::Dinner, "カレーライス");
        assert!(!suggestion.has_dishes());

        let out = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(out["date"], json!("2025-01-13T00:00:00Z"));
        assert_eq!(out["meal_type"], json!("dinner"));
        assert!(out.get("soup").is_none());
    }
}
