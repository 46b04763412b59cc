//! Parsers that turn extracted text into structured menu records.

mod json;

pub use json::{parse_menu_json, JsonMenuParser};

use crate::{
    error::{AdvisorError, Result},
    model::{ExtractedMenuData, SchoolLunchMenu},
};

/// Trait for format-specific menu parsers.
///
/// A parser is selected by the `format` tag an extractor put on its
/// [`ExtractedMenuData`]. Parsers only structure data; they do not reject
/// odd values such as negative calories or empty dish names.
pub trait MenuParser: Send + Sync + std::fmt::Debug {
    /// Returns the name of this parser for logging.
    fn name(&self) -> &'static str;

    /// The `format` metadata tag this parser accepts.
    fn format(&self) -> &'static str;

    /// Parses raw text into menus, in document order.
    ///
    /// Either every record parses or an error is returned; there is no
    /// partial result.
    fn parse(&self, raw_text: &str) -> Result<Vec<SchoolLunchMenu>>;
}

/// Chooses a parser by the extracted data's format tag.
///
/// # Examples
///
/// ```
/// use menu_advisor::{model::ExtractedMenuData, parser::ParserRegistry};
///
/// let registry = ParserRegistry::default();
/// let data = ExtractedMenuData::new(
///     "doc_1",
///     r#"[{"date": "2025-01-13T00:00:00Z", "main_dish": "カレーライス"}]"#,
///     1.0,
///     "json",
/// );
/// let menus = registry.parse(&data).unwrap();
/// assert_eq!(menus[0].main_dish, "カレーライス");
/// ```
#[derive(Debug)]
pub struct ParserRegistry {
    parsers: Vec<Box<dyn MenuParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserRegistry {
    /// Creates a registry with the JSON parser.
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(JsonMenuParser)],
        }
    }

    /// Registers `parser`, replacing any parser for the same format.
    pub fn with_parser(mut self, parser: Box<dyn MenuParser>) -> Self {
        self.parsers.retain(|p| p.format() != parser.format());
        self.parsers.push(parser);
        self
    }

    /// Parses `data` with the parser for its format tag.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::NotImplemented`] when no parser handles the
    /// format, and whatever the parser returns otherwise.
    pub fn parse(&self, data: &ExtractedMenuData) -> Result<Vec<SchoolLunchMenu>> {
        let format = data.format().unwrap_or_default();
        let parser = self
            .parsers
            .iter()
            .find(|p| p.format() == format)
            .ok_or_else(|| {
                AdvisorError::not_implemented(format!("parsing for format {format}"))
            })?;

        let menus = parser.parse(&data.raw_text)?;
        log::debug!(
            "{} parser produced {} menus from {}",
            parser.name(),
            menus.len(),
            data.source_id
        );
        Ok(menus)
    }

    /// Returns the names of all registered parsers.
    pub fn parser_names(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|p| p.name()).collect()
    }
}
