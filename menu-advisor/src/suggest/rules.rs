//! Ordered keyword rules mapping a school main dish to a home menu.

use std::fmt;

use regex::Regex;

use crate::model::{FoodCatalog, HomeMenuSuggestion};

/// What a rule looks for in the school main dish.
#[derive(Debug, Clone)]
pub enum Indicator {
    /// Plain substring, e.g. `"魚"`.
    Contains(String),
    /// Regular expression, for rules a single substring cannot express.
    Pattern(Regex),
}

impl Indicator {
    /// Returns true if `main_dish` triggers this indicator.
    pub fn matches(&self, main_dish: &str) -> bool {
        match self {
            Indicator::Contains(needle) => main_dish.contains(needle.as_str()),
            Indicator::Pattern(re) => re.is_match(main_dish),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::Contains(needle) => write!(f, "contains '{needle}'"),
            Indicator::Pattern(re) => write!(f, "matches /{}/", re.as_str()),
        }
    }
}

/// The home menu a rule proposes.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuTemplate {
    pub main_dish: String,
    pub side_dishes: Vec<String>,
    pub soup: Option<String>,
    pub reason: String,
}

impl MenuTemplate {
    pub fn new(main_dish: &str, side_dishes: &[&str], reason: &str) -> Self {
        Self {
            main_dish: main_dish.to_string(),
            side_dishes: side_dishes.iter().map(|s| s.to_string()).collect(),
            soup: None,
            reason: reason.to_string(),
        }
    }

    pub fn with_soup(mut self, soup: &str) -> Self {
        self.soup = Some(soup.to_string());
        self
    }

    /// Every dish named by the template, main dish first.
    pub fn dishes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_dish.as_str())
            .chain(self.side_dishes.iter().map(String::as_str))
            .chain(self.soup.as_deref())
    }

    pub(crate) fn apply(&self, suggestion: &mut HomeMenuSuggestion) {
        suggestion.main_dish = self.main_dish.clone();
        suggestion.side_dishes = self.side_dishes.clone();
        suggestion.soup = self.soup.clone();
        suggestion.reason = self.reason.clone();
    }
}

#[derive(Debug, Clone)]
struct Rule {
    indicator: Indicator,
    template: MenuTemplate,
}

/// Which template a rule set picked for a main dish.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    /// The indicator that fired, or `None` when the fallback was used.
    pub indicator: Option<&'a Indicator>,
    pub template: &'a MenuTemplate,
}

/// Ordered list of (indicator, template) rules plus a fallback.
///
/// Evaluation is first-match-wins in insertion order: a main dish that
/// triggers several indicators gets the template of the earliest rule.
///
/// # Examples
///
/// ```
/// use menu_advisor::suggest::{MenuTemplate, RuleSet};
///
/// let rules = RuleSet::builder()
///     .when_contains("魚", MenuTemplate::new("卵焼き", &["のり"], "fish at lunch"))
///     .when_contains("肉", MenuTemplate::new("焼き魚（アジ）", &[], "meat at lunch"))
///     .otherwise(MenuTemplate::new("焼き鮭", &[], "default"));
///
/// // Contains both 魚 and 肉; the 魚 rule comes first.
/// assert_eq!(rules.select("魚肉ソーセージ").template.main_dish, "卵焼き");
/// assert_eq!(rules.select("うどん").template.main_dish, "焼き鮭");
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fallback: MenuTemplate,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Breakfast rules: lighter Japanese breakfasts that vary the protein.
    pub fn breakfast() -> Self {
        Self::builder()
            .when_contains(
                "魚",
                MenuTemplate::new(
                    "卵焼き",
                    &["のり", "みそ汁"],
                    "昼食で魚を摂取するため、朝食ではタンパク質として卵を提案",
                ),
            )
            .when_contains(
                "肉",
                MenuTemplate::new(
                    "焼き魚（アジ）",
                    &["野菜サラダ", "みそ汁"],
                    "昼食で肉類を摂取するため、朝食では魚でバランスを取る",
                ),
            )
            .when_contains(
                "カレー",
                MenuTemplate::new(
                    "納豆",
                    &["野菜炒め", "みそ汁"],
                    "昼食が重めのカレーのため、朝食は軽めの和食で消化を助ける",
                ),
            )
            .otherwise(MenuTemplate::new(
                "焼き鮭",
                &["おひたし", "みそ汁"],
                "栄養バランスを考慮した和食中心の朝食",
            ))
    }

    /// Dinner rules: switch the protein source away from what lunch served.
    pub fn dinner() -> Self {
        Self::builder()
            .when_contains(
                "鶏",
                MenuTemplate::new(
                    "魚の煮付け",
                    &["野菜の天ぷら", "白米"],
                    "昼食で鶏肉を摂取したため、夕食では魚でタンパク質の種類を変える",
                )
                .with_soup("すまし汁"),
            )
            .when_contains(
                "魚",
                MenuTemplate::new(
                    "豚しゃぶしゃぶ",
                    &["温野菜", "白米"],
                    "昼食で魚を摂取したため、夕食では豚肉でタンパク質の種類を変える",
                )
                .with_soup("みそ汁"),
            )
            .when_contains(
                "豚",
                MenuTemplate::new(
                    "鯖の塩焼き",
                    &["筑前煮", "白米"],
                    "昼食で豚肉を摂取したため、夕食では魚でバランスを取る",
                )
                .with_soup("わかめスープ"),
            )
            .when_contains(
                "カレー",
                MenuTemplate::new(
                    "鶏の唐揚げ",
                    &["キャベツサラダ", "白米"],
                    "昼食がスパイシーなカレーのため、夕食は優しい味付けの料理で胃を休める",
                )
                .with_soup("みそ汁"),
            )
            .otherwise(
                MenuTemplate::new(
                    "牛肉炒め",
                    &["もやし炒め", "白米"],
                    "栄養バランスを考慮したボリュームのある夕食",
                )
                .with_soup("中華スープ"),
            )
    }

    /// Picks the template for `main_dish`.
    pub fn select(&self, main_dish: &str) -> Selection<'_> {
        self.rules
            .iter()
            .find(|rule| rule.indicator.matches(main_dish))
            .map(|rule| Selection {
                indicator: Some(&rule.indicator),
                template: &rule.template,
            })
            .unwrap_or(Selection {
                indicator: None,
                template: &self.fallback,
            })
    }

    /// Dishes named by any template that `catalog` does not list.
    pub fn missing_from<'a>(&'a self, catalog: &FoodCatalog) -> Vec<&'a str> {
        let mut missing: Vec<&str> = Vec::new();
        let templates = self
            .rules
            .iter()
            .map(|rule| &rule.template)
            .chain(std::iter::once(&self.fallback));
        for dish in templates.flat_map(MenuTemplate::dishes) {
            if !catalog.contains(dish) && !missing.contains(&dish) {
                missing.push(dish);
            }
        }
        missing
    }

    /// Number of keyword rules, not counting the fallback.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builds a [`RuleSet`] one rule at a time. Order of calls is evaluation order.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
}

impl RuleSetBuilder {
    /// Adds a rule that fires when the main dish contains `needle`.
    pub fn when_contains(mut self, needle: &str, template: MenuTemplate) -> Self {
        self.rules.push(Rule {
            indicator: Indicator::Contains(needle.to_string()),
            template,
        });
        self
    }

    /// Adds a rule that fires when the main dish matches `pattern`.
    pub fn when_matches(mut self, pattern: Regex, template: MenuTemplate) -> Self {
        self.rules.push(Rule {
            indicator: Indicator::Pattern(pattern),
            template,
        });
        self
    }

    /// Finishes the rule set with the template used when nothing matches.
    pub fn otherwise(self, fallback: MenuTemplate) -> RuleSet {
        RuleSet {
            rules: self.rules,
            fallback,
        }
    }
}
