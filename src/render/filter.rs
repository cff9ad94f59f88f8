//! Catalog filtering.

use crate::domain::{CategoryFilter, NoteRecord, Semester};
use crate::favorites::FavoriteSet;

/// The user's current view selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub semester: Semester,
    pub category: CategoryFilter,
    /// Raw search text as typed.
    pub search: String,
}

impl FilterState {
    pub fn new(semester: Semester) -> Self {
        Self {
            semester,
            category: CategoryFilter::All,
            search: String::new(),
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Returns true if `record` passes every filter.
    pub fn matches(&self, record: &NoteRecord, favorites: &FavoriteSet, needle: &str) -> bool {
        if record.semester() != self.semester {
            return false;
        }
        let category_ok = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Favorites => favorites.contains(record.id()),
            CategoryFilter::Specific(name) => record.category() == name,
        };
        category_ok && record.matches_text(needle)
    }
}

/// Returns the records visible under `state`, in catalog order.
pub fn filter_records<'a>(
    catalog: &'a [NoteRecord],
    state: &FilterState,
    favorites: &FavoriteSet,
) -> Vec<&'a NoteRecord> {
    let needle = state.search.to_lowercase();
    catalog
        .iter()
        .filter(|r| state.matches(r, favorites, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordId;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(id: &str, semester: u32, category: &str, date: &str) -> NoteRecord {
        NoteRecord::builder(
            id.parse().unwrap(),
            format!("Notes {}", id),
            Semester::new(semester).unwrap(),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
        .category(category)
        .author("R. Sen")
        .description("Lecture notes")
        .build()
    }

    fn catalog() -> Vec<NoteRecord> {
        vec![
            record("a", 1, "Organic", "2025-09-22"),
            record("b", 1, "Physical", "2025-09-20"),
        ]
    }

    fn ids(records: &[&NoteRecord]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    fn sem(n: u32) -> Semester {
        Semester::new(n).unwrap()
    }

    #[test]
    fn all_categories_keep_catalog_order() {
        let catalog = catalog();
        let state = FilterState::new(sem(1));
        let visible = filter_records(&catalog, &state, &FavoriteSet::new());
        assert_eq!(ids(&visible), vec!["a", "b"]);
    }

    #[test]
    fn specific_category_is_exact() {
        let catalog = catalog();
        let state = FilterState::new(sem(1)).with_category(CategoryFilter::Specific("Physical".into()));
        let visible = filter_records(&catalog, &state, &FavoriteSet::new());
        assert_eq!(ids(&visible), vec!["b"]);

        let state = FilterState::new(sem(1)).with_category(CategoryFilter::Specific("physical".into()));
        assert!(filter_records(&catalog, &state, &FavoriteSet::new()).is_empty());
    }

    #[test]
    fn favorites_category_uses_the_set() {
        let catalog = catalog();
        let favorites: FavoriteSet = ["b".parse::<RecordId>().unwrap()].into_iter().collect();
        let state = FilterState::new(sem(1)).with_category(CategoryFilter::Favorites);
        let visible = filter_records(&catalog, &state, &favorites);
        assert_eq!(ids(&visible), vec!["b"]);
    }

    #[test]
    fn other_semesters_are_hidden() {
        let catalog = catalog();
        let state = FilterState::new(sem(2));
        assert!(filter_records(&catalog, &state, &FavoriteSet::new()).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring_over_fields() {
        let catalog = catalog();
        let favorites = FavoriteSet::new();

        let by_category = FilterState::new(sem(1)).with_search("ORGAN");
        assert_eq!(ids(&filter_records(&catalog, &by_category, &favorites)), vec!["a"]);

        let by_author = FilterState::new(sem(1)).with_search("sen");
        assert_eq!(ids(&filter_records(&catalog, &by_author, &favorites)), vec!["a", "b"]);

        let none = FilterState::new(sem(1)).with_search("quantum");
        assert!(filter_records(&catalog, &none, &favorites).is_empty());
    }

    #[test]
    fn search_combines_with_category() {
        let catalog = catalog();
        let state = FilterState::new(sem(1))
            .with_category(CategoryFilter::Specific("Physical".into()))
            .with_search("organic");
        assert!(filter_records(&catalog, &state, &FavoriteSet::new()).is_empty());
    }

    #[test]
    fn result_is_an_ordered_subset() {
        let catalog = vec![
            record("d", 3, "Organic", "2025-09-25"),
            record("c", 3, "Inorganic", "2025-09-24"),
            record("x", 4, "Organic", "2025-09-23"),
            record("b", 3, "Organic", "2025-09-22"),
            record("a", 3, "Organic", "2025-09-21"),
        ];
        let state = FilterState::new(sem(3)).with_category(CategoryFilter::Specific("Organic".into()));
        let visible = filter_records(&catalog, &state, &FavoriteSet::new());

        assert_eq!(ids(&visible), vec!["d", "b", "a"]);
        let positions: Vec<_> = visible
            .iter()
            .map(|v| catalog.iter().position(|r| r.id() == v.id()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
