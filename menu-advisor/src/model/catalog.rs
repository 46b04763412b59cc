//! Reference table of home dishes grouped by food category.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::Nutrition;

/// Food category used for balancing meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Protein,
    Vegetables,
    Grains,
    Dairy,
    Fruits,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Protein => "protein",
            FoodCategory::Vegetables => "vegetables",
            FoodCategory::Grains => "grains",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Fruits => "fruits",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named dish in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub category: FoodCategory,
    #[serde(default)]
    pub nutrition: Nutrition,
    /// Seasons the item is typical for; empty means all year.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub season: Vec<String>,
    pub japanese: bool,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, category: FoodCategory, japanese: bool) -> Self {
        Self {
            name: name.into(),
            category,
            nutrition: Nutrition::default(),
            season: Vec::new(),
            japanese,
        }
    }

    pub fn in_season(mut self, season: &[&str]) -> Self {
        self.season = season.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Read-only collection of [`FoodItem`]s.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    items: Vec<FoodItem>,
}

static DEFAULT_CATALOG: Lazy<FoodCatalog> = Lazy::new(|| {
    use FoodCategory::*;

    let proteins = [
        "焼き鮭",
        "卵焼き",
        "納豆",
        "焼き魚（アジ）",
        "豚しゃぶしゃぶ",
        "鶏の唐揚げ",
        "魚の煮付け",
        "鯖の塩焼き",
        "牛肉炒め",
    ];
    let vegetables = [
        ("野菜サラダ", false),
        ("おひたし", true),
        ("野菜炒め", true),
        ("野菜の天ぷら", true),
        ("温野菜", true),
        ("筑前煮", true),
        ("キャベツサラダ", false),
        ("もやし炒め", true),
        ("のり", true),
    ];

    let mut items: Vec<FoodItem> = proteins
        .iter()
        .map(|name| FoodItem::new(*name, Protein, true))
        .collect();
    items.extend(
        vegetables
            .iter()
            .map(|(name, japanese)| FoodItem::new(*name, Vegetables, *japanese)),
    );
    items.extend([
        FoodItem::new("白米", Grains, true),
        FoodItem::new("玄米", Grains, true),
        FoodItem::new("パン", Grains, false),
        FoodItem::new("牛乳", Dairy, false),
        FoodItem::new("ヨーグルト", Dairy, false),
        FoodItem::new("チーズ", Dairy, false),
        FoodItem::new("みかん", Fruits, true).in_season(&["winter"]),
        FoodItem::new("りんご", Fruits, true).in_season(&["autumn", "winter"]),
        FoodItem::new("いちご", Fruits, true).in_season(&["spring"]),
        FoodItem::new("バナナ", Fruits, false),
    ]);

    FoodCatalog::new(items)
});

impl FoodCatalog {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self { items }
    }

    /// The built-in catalog of common Japanese home dishes.
    pub fn default_catalog() -> &'static FoodCatalog {
        &DEFAULT_CATALOG
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter()
    }

    pub fn by_category(&self, category: FoodCategory) -> impl Iterator<Item = &FoodItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    pub fn find(&self, name: &str) -> Option<&FoodItem> {
        self.items.iter().find(|item| item.name == name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
