//! Startup: configuration files and seed data.

use std::{io::Write, path::PathBuf};

use chrono::NaiveDate;
use menu_advisor::{store::SeedLoad, AdvisorConfig, ErrorKind, MenuAdvisor};
use pretty_assertions::assert_eq;

fn sample_seed() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/school_lunch_sample.json")
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

#[test]
fn test_bootstrap_loads_bundled_sample() {
    let config = AdvisorConfig {
        seed_path: Some(sample_seed()),
        ..AdvisorConfig::default()
    };

    let advisor = MenuAdvisor::bootstrap(&config);

    let menus = advisor.list_menus();
    assert_eq!(menus.len(), 5);
    assert_eq!(menus[0].main_dish, "鶏肉の照り焼き");
    assert_eq!(menus[4].soup, None);

    let dinner = advisor.suggest(day(13), "dinner").unwrap();
    assert_eq!(dinner.main_dish, "魚の煮付け");

    // さば has no 魚 character, so the default breakfast applies.
    let breakfast = advisor.suggest(day(14), "breakfast").unwrap();
    assert_eq!(breakfast.main_dish, "焼き鮭");
}

#[test]
fn test_menus_between_is_inclusive() {
    let advisor = MenuAdvisor::default();
    assert_eq!(advisor.load_seed(sample_seed()).unwrap(), SeedLoad::Loaded(5));

    let midweek: Vec<String> = advisor
        .menus_between(day(14), day(16))
        .into_iter()
        .map(|m| m.main_dish)
        .collect();

    assert_eq!(midweek, vec!["さばの味噌煮", "カレーライス", "豚の生姜焼き"]);
    assert!(advisor.menus_between(day(20), day(24)).is_empty());
}

#[test]
fn test_reloading_seed_does_not_duplicate() {
    let advisor = MenuAdvisor::default();

    advisor.load_seed(sample_seed()).unwrap();
    advisor.load_seed(sample_seed()).unwrap();

    assert_eq!(advisor.list_menus().len(), 5);
}

#[test]
fn test_missing_seed_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let advisor = MenuAdvisor::default();

    let outcome = advisor.load_seed(dir.path().join("nope.json")).unwrap();

    assert_eq!(outcome, SeedLoad::Missing);
    assert!(advisor.list_menus().is_empty());
}

#[test]
fn test_config_file_round_trip_through_bootstrap() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"seed_path": null, "reject_unknown_meal_types": true}}"#
    )
    .unwrap();

    let config = AdvisorConfig::from_file(file.path()).unwrap();
    assert_eq!(config.seed_path, None);
    assert_eq!(
        config.max_document_bytes,
        AdvisorConfig::default().max_document_bytes
    );

    let advisor = MenuAdvisor::bootstrap(&config);
    assert!(advisor.list_menus().is_empty());

    advisor.load_seed(sample_seed()).unwrap();
    let err = advisor.suggest(day(13), "lunch").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownMealType);
}

#[test]
fn test_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"max_document_bytes": "lots"}}"#).unwrap();

    let err = AdvisorConfig::from_file(file.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}

#[test]
fn test_env_style_overrides() {
    let config = AdvisorConfig::default()
        .with_overrides(|key: &str| match key {
            "MENU_ADVISOR_SEED" => Some(String::new()),
            "MENU_ADVISOR_MAX_DOCUMENT_BYTES" => Some("2048".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.seed_path, None);
    assert_eq!(config.max_document_bytes, 2048);
    assert!(!config.reject_unknown_meal_types);
}
