//! List filtering shared by the appointments and records views.
//!
//! A filtered view is always derived: catalog ∩ category predicate ∩ text
//! predicate, recomputed from the catalog and the current criteria and never
//! stored as its own collection.

mod categories;

pub use categories::*;

use std::sync::Arc;

use thiserror::Error;

/// Filter errors.
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("This list does not offer text search")]
    SearchUnsupported,
}

pub type FilterResult<T> = Result<T, FilterError>;

/// An item that can appear in a filterable list.
pub trait Filterable {
    /// Category selector offered by the list.
    type Category;

    /// Whether the list exposes a free-text search field.
    const SEARCHABLE: bool = true;

    fn matches_category(&self, category: &Self::Category) -> bool;

    /// Fields the free-text query is matched against.
    fn searchable_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match; `needle` must already be lowercase.
    fn matches_query(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .searchable_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

impl<T: Filterable> Filterable for Arc<T> {
    type Category = T::Category;

    const SEARCHABLE: bool = T::SEARCHABLE;

    fn matches_category(&self, category: &Self::Category) -> bool {
        (**self).matches_category(category)
    }

    fn searchable_fields(&self) -> Vec<&str> {
        (**self).searchable_fields()
    }
}

/// Result of applying a filter.
///
/// `Empty` is a real answer ("nothing matched"), and views should show their
/// empty state for it rather than a loading indicator.
#[derive(Debug, PartialEq)]
pub enum FilteredView<'a, T> {
    Matches(Vec<&'a T>),
    Empty,
}

impl<'a, T> FilteredView<'a, T> {
    pub fn items(&self) -> &[&'a T] {
        match self {
            FilteredView::Matches(items) => items,
            FilteredView::Empty => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FilteredView::Empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items().iter().copied()
    }
}

/// Filter `catalog` by category and free-text query, keeping catalog order.
pub fn apply<'a, T: Filterable>(
    catalog: &'a [T],
    category: &T::Category,
    query: &str,
) -> FilteredView<'a, T> {
    let needle = query.to_lowercase();
    let matches: Vec<&T> = catalog
        .iter()
        .filter(|item| item.matches_category(category))
        .filter(|item| item.matches_query(&needle))
        .collect();

    if matches.is_empty() {
        FilteredView::Empty
    } else {
        FilteredView::Matches(matches)
    }
}

/// Current criteria of one list view.
pub struct ListFilter<T: Filterable> {
    category: T::Category,
    query: String,
}

impl<T: Filterable> ListFilter<T> {
    pub fn new(category: T::Category) -> Self {
        Self {
            category,
            query: String::new(),
        }
    }

    pub fn category(&self) -> &T::Category {
        &self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_category(&mut self, category: T::Category) {
        self.category = category;
    }

    /// Update the search text. Lists without a search field only accept an
    /// empty query.
    pub fn set_query(&mut self, query: impl Into<String>) -> FilterResult<()> {
        let query = query.into();
        if !T::SEARCHABLE && !query.is_empty() {
            return Err(FilterError::SearchUnsupported);
        }
        self.query = query;
        Ok(())
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    /// Derive the visible items from `catalog`.
    pub fn apply<'a>(&self, catalog: &'a [T]) -> FilteredView<'a, T> {
        apply(catalog, &self.category, &self.query)
    }
}

impl<T> Default for ListFilter<T>
where
    T: Filterable,
    T::Category: Default,
{
    fn default() -> Self {
        Self::new(T::Category::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{sample_appointments, sample_records};
    use crate::models::{Appointment, Record, RecordType};

    #[test]
    fn test_all_with_empty_query_is_identity() {
        let catalog = sample_appointments();
        let view = apply(&catalog, &AppointmentCategory::All, "");
        let ids: Vec<&str> = view.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let catalog = sample_appointments();
        let view = apply(&catalog, &AppointmentCategory::All, "HEART");
        assert_eq!(view.len(), 1);
        assert_eq!(view.items()[0].doctor_name, "Dr. Michael Chen");
    }

    #[test]
    fn test_query_matches_specialty_and_location() {
        let catalog = sample_appointments();
        assert_eq!(apply(&catalog, &AppointmentCategory::All, "derma").len(), 1);
        assert_eq!(apply(&catalog, &AppointmentCategory::All, "clinic").len(), 2);
    }

    #[test]
    fn test_query_ignores_unsearched_fields() {
        let catalog = sample_appointments();
        // Time and status are not searchable.
        let view = apply(&catalog, &AppointmentCategory::All, "10:30");
        assert!(view.is_empty());
    }

    #[test]
    fn test_empty_is_distinct() {
        let catalog = sample_appointments();
        let view = apply(&catalog, &AppointmentCategory::Upcoming, "white");
        assert_eq!(view, FilteredView::Empty);
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn test_empty_catalog_is_empty_view() {
        let catalog: Vec<Appointment> = Vec::new();
        assert!(apply(&catalog, &AppointmentCategory::All, "").is_empty());
    }

    #[test]
    fn test_list_filter_defaults_to_upcoming() {
        let catalog = sample_appointments();
        let filter = ListFilter::<Appointment>::default();
        assert_eq!(filter.category(), &AppointmentCategory::Upcoming);
        assert_eq!(filter.apply(&catalog).len(), 2);
    }

    #[test]
    fn test_list_filter_tracks_criteria() {
        let catalog = sample_appointments();
        let mut filter = ListFilter::<Appointment>::default();
        filter.set_category(AppointmentCategory::All);
        filter.set_query("chen").unwrap();
        assert_eq!(filter.apply(&catalog).len(), 1);

        filter.clear_query();
        assert_eq!(filter.apply(&catalog).len(), 3);
    }

    #[test]
    fn test_records_reject_search() {
        let mut filter = ListFilter::<Record>::default();
        assert_eq!(
            filter.set_query("blood"),
            Err(FilterError::SearchUnsupported)
        );
        assert!(filter.set_query("").is_ok());
        assert_eq!(filter.query(), "");
    }

    #[test]
    fn test_records_by_type() {
        let catalog = sample_records();
        let mut filter = ListFilter::<Record>::default();
        assert_eq!(filter.apply(&catalog).len(), 3);

        filter.set_category(RecordCategory::Type(RecordType::Image));
        let view = filter.apply(&catalog);
        assert_eq!(view.len(), 1);
        assert_eq!(view.items()[0].title, "X-Ray Report");

        filter.set_category(RecordCategory::Type(RecordType::Pdf));
        assert!(filter.apply(&catalog).is_empty());
    }

    #[test]
    fn test_shared_records_filter_through_arc() {
        let catalog: Vec<Arc<Record>> = sample_records().into_iter().map(Arc::new).collect();
        let view = apply(
            &catalog,
            &RecordCategory::Department("Radiology".into()),
            "",
        );
        assert_eq!(view.len(), 1);
    }
}
