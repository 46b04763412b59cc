//! Parser for JSON menu arrays.

use super::MenuParser;
use crate::{error::Result, model::SchoolLunchMenu};

/// Parses a JSON array of menu records.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMenuParser;

impl MenuParser for JsonMenuParser {
    #[inline]
    fn name(&self) -> &'static str {
        "json"
    }

    #[inline]
    fn format(&self) -> &'static str {
        "json"
    }

    fn parse(&self, raw_text: &str) -> Result<Vec<SchoolLunchMenu>> {
        parse_menu_json(raw_text)
    }
}

/// Decodes a JSON array of menus.
///
/// # Errors
///
/// Returns [`AdvisorError::MalformedData`](crate::error::AdvisorError::MalformedData)
/// naming the decode problem if the text is not a menu array.
pub fn parse_menu_json(text: &str) -> Result<Vec<SchoolLunchMenu>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;

    const WEEK: &str = r#"[
        {
            "date": "2025-01-20T00:00:00Z",
            "main_dish": "ハンバーグ",
            "side_dishes": ["野菜サラダ", "白米"],
            "soup": "コンソメスープ",
            "nutrition": {"calories": 700, "protein_g": 30.0}
        },
        {
            "date": "2025-01-21T00:00:00Z",
            "main_dish": "さばの味噌煮",
            "side_dishes": ["ひじきの煮物"],
            "dessert": "みかん"
        }
    ]"#;

    #[test]
    fn test_parse_keeps_document_order() {
        let menus = JsonMenuParser.parse(WEEK).unwrap();
        assert_eq!(menus.len(), 2);
        assert_eq!(menus[0].main_dish, "ハンバーグ");
        assert_eq!(menus[0].side_dishes.len(), 2);
        assert_eq!(menus[0].soup.as_deref(), Some("コンソメスープ"));
        assert_eq!(menus[1].dessert.as_deref(), Some("みかん"));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_menu_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_does_not_validate_values() {
        let menus = parse_menu_json(
            r#"[{"date": "2025-01-20T00:00:00Z", "main_dish": "", "nutrition": {"calories": -5}}]"#,
        )
        .unwrap();
        assert_eq!(menus[0].main_dish, "");
        assert_eq!(menus[0].nutrition.calories, -5);
    }

    #[test]
    fn test_parse_rejects_single_object() {
        let err = parse_menu_json(r#"{"date": "2025-01-20T00:00:00Z"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let err = parse_menu_json(r#"[{"date": "next monday", "main_dish": "A"}]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
    }

    #[test]
    fn test_parse_is_all_or_nothing() {
        let err = parse_menu_json(
            r#"[{"date": "2025-01-20T00:00:00Z", "main_dish": "A"}, {"main_dish": "no date"}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("date"));
    }
}
