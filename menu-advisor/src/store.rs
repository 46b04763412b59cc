//! Process-wide catalog of school lunch menus keyed by calendar day.

use std::{
    fs, io,
    path::Path,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::NaiveDate;

use crate::{
    error::{AdvisorError, Result},
    model::SchoolLunchMenu,
    parser::parse_menu_json,
};

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The day was new; the menu was appended.
    Inserted,
    /// A menu for the day existed and was replaced in place.
    Replaced,
}

/// Outcome of loading a seed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedLoad {
    /// The seed file does not exist. Not an error.
    Missing,
    /// This many records were upserted.
    Loaded(usize),
}

/// Shared menu store.
///
/// Holds at most one menu per calendar day, in insertion order. Replacing a
/// day's menu keeps its original position. Every read and every
/// scan-and-mutate runs under one `RwLock`, so readers never see a
/// half-applied batch.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use menu_advisor::{model::SchoolLunchMenu, store::MenuStore};
///
/// let store = MenuStore::new();
/// let date = DateTime::parse_from_rfc3339("2025-01-13T00:00:00Z").unwrap();
/// store.upsert(SchoolLunchMenu::new(date, "カレーライス"));
/// store.upsert(SchoolLunchMenu::new(date, "鶏肉の照り焼き"));
///
/// let all = store.list_all();
/// assert_eq!(all.len(), 1);
/// assert_eq!(all[0].main_dish, "鶏肉の照り焼き");
/// ```
#[derive(Debug, Default)]
pub struct MenuStore {
    menus: RwLock<Vec<SchoolLunchMenu>>,
}

impl MenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated by upserting `menus` in order.
    pub fn with_menus(menus: impl IntoIterator<Item = SchoolLunchMenu>) -> Self {
        let store = Self::new();
        store.upsert_all(menus);
        store
    }

    /// Inserts `menu`, or replaces the menu already stored for its day.
    pub fn upsert(&self, menu: SchoolLunchMenu) -> Upsert {
        upsert_locked(&mut self.write(), menu)
    }

    /// Upserts every menu under a single lock acquisition.
    ///
    /// Returns the number of records written.
    pub fn upsert_all(&self, menus: impl IntoIterator<Item = SchoolLunchMenu>) -> usize {
        let mut guard = self.write();
        menus
            .into_iter()
            .map(|menu| upsert_locked(&mut guard, menu))
            .count()
    }

    /// Returns the menu for `day`.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::NotFound`] when no menu is stored for the day.
    pub fn lookup(&self, day: NaiveDate) -> Result<SchoolLunchMenu> {
        self.read()
            .iter()
            .find(|menu| menu.calendar_day() == day)
            .cloned()
            .ok_or(AdvisorError::NotFound { date: day })
    }

    /// All menus in storage order.
    pub fn list_all(&self) -> Vec<SchoolLunchMenu> {
        self.read().clone()
    }

    /// Menus whose day falls in `from..=to`, in storage order.
    pub fn range(&self, from: NaiveDate, to: NaiveDate) -> Vec<SchoolLunchMenu> {
        self.read()
            .iter()
            .filter(|menu| (from..=to).contains(&menu.calendar_day()))
            .cloned()
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Bulk-loads a JSON array of menus from `path`.
    ///
    /// A missing file is logged and reported as [`SeedLoad::Missing`]; the
    /// caller keeps running with whatever the store already holds.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Io`] if the file exists but cannot be read and
    /// [`AdvisorError::MalformedData`] if it is not a menu array. Nothing is
    /// stored in either case.
    pub fn load_seed(&self, path: impl AsRef<Path>) -> Result<SeedLoad> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "Could not load school lunch data from {}: {}; running without seed data",
                    path.display(),
                    e
                );
                return Ok(SeedLoad::Missing);
            }
            Err(e) => return Err(e.into()),
        };

        let menus = parse_menu_json(&text)?;
        let loaded = self.upsert_all(menus);
        log::info!(
            "Loaded {} school lunch menus from {}",
            loaded,
            path.display()
        );
        Ok(SeedLoad::Loaded(loaded))
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<SchoolLunchMenu>> {
        self.menus.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<SchoolLunchMenu>> {
        self.menus.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn upsert_locked(menus: &mut Vec<SchoolLunchMenu>, menu: SchoolLunchMenu) -> Upsert {
    let day = menu.calendar_day();
    match menus.iter_mut().find(|existing| existing.calendar_day() == day) {
        Some(slot) => {
            *slot = menu;
            Upsert::Replaced
        }
        None => {
            menus.push(menu);
            Upsert::Inserted
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, sync::Arc, thread};

    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;

    fn menu(date: &str, main_dish: &str) -> SchoolLunchMenu {
        SchoolLunchMenu::new(DateTime::parse_from_rfc3339(date).unwrap(), main_dish)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let store = MenuStore::new();
        assert_eq!(store.upsert(menu("2025-01-13T00:00:00Z", "A")), Upsert::Inserted);
        assert_eq!(store.upsert(menu("2025-01-14T00:00:00Z", "B")), Upsert::Inserted);
        assert_eq!(store.upsert(menu("2025-01-15T00:00:00Z", "C")), Upsert::Inserted);

        let replacement = menu("2025-01-14T12:30:00Z", "B2");
        assert_eq!(store.upsert(replacement.clone()), Upsert::Replaced);

        let all = store.list_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1], replacement);
        let names: Vec<_> = all.iter().map(|m| m.main_dish.as_str()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
    }

    #[test]
    fn test_lookup_ignores_time_of_day() {
        let store = MenuStore::with_menus([menu("2025-01-13T11:45:00Z", "鶏肉の照り焼き")]);
        let found = store.lookup(day(2025, 1, 13)).unwrap();
        assert_eq!(found.main_dish, "鶏肉の照り焼き");
    }

    #[test]
    fn test_lookup_missing_day() {
        let store = MenuStore::with_menus([menu("2025-01-13T00:00:00Z", "A")]);
        let err = store.lookup(day(2025, 1, 20)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("2025-01-20"));
    }

    #[test]
    fn test_range_is_inclusive() {
        let store = MenuStore::with_menus([
            menu("2025-01-13T00:00:00Z", "A"),
            menu("2025-01-14T00:00:00Z", "B"),
            menu("2025-01-20T00:00:00Z", "C"),
        ]);
        let week: Vec<_> = store
            .range(day(2025, 1, 13), day(2025, 1, 17))
            .into_iter()
            .map(|m| m.main_dish)
            .collect();
        assert_eq!(week, vec!["A", "B"]);
    }

    #[test]
    fn test_load_seed_missing_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = MenuStore::new();
        let outcome = store.load_seed(dir.path().join("absent.json")).unwrap();
        assert_eq!(outcome, SeedLoad::Missing);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_seed_upserts_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"date": "2025-01-13T00:00:00Z", "main_dish": "A"}},
                {{"date": "2025-01-14T00:00:00Z", "main_dish": "B"}},
                {{"date": "2025-01-13T00:00:00Z", "main_dish": "A2"}}
            ]"#
        )
        .unwrap();

        let store = MenuStore::new();
        assert_eq!(store.load_seed(file.path()).unwrap(), SeedLoad::Loaded(3));
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup(day(2025, 1, 13)).unwrap().main_dish, "A2");
    }

    #[test]
    fn test_load_seed_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let store = MenuStore::new();
        let err = store.load_seed(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_upserts_keep_one_record_per_day() {
        let store = Arc::new(MenuStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for d in 1..=5 {
                        store.upsert(menu(&format!("2025-02-0{d}T00:00:00Z"), &format!("w{i}")));
                        let _ = store.lookup(day(2025, 2, d));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 5);
    }
}
