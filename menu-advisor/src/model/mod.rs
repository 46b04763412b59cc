//! Data model shared by the ingestion pipeline and the suggestion engine.

mod catalog;
mod document;
mod menu;

pub use catalog::{FoodCatalog, FoodCategory, FoodItem};
pub use document::{
    DocumentKind, DocumentSource, DocumentStatus, ExtractedMenuData, ENCODING_UTF8_LOSSY,
    META_ENCODING, META_FORMAT, META_STATUS, STATUS_NOT_IMPLEMENTED,
};
pub use menu::{HomeMenuSuggestion, MealType, Nutrition, SchoolLunchMenu};
