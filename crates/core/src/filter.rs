//! Filter engine: computes the visible subset of a cached collection.
//!
//! Pure functions only. The input slice is never mutated and every call
//! produces a fresh sequence in the same relative order as the input.

use std::fmt;
use std::str::FromStr;

use crate::resource::ResourceItem;

/// Category half of the predicate. `"all"` is the sentinel for no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    pub fn only(category: impl Into<String>) -> Self {
        CategoryFilter::Only(category.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL,
            CategoryFilter::Only(category) => category,
        }
    }

    /// Returns true if an item with the given category passes the filter.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search term plus category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl Predicate {
    pub fn new(search_term: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search_term: search_term.into(),
            category,
        }
    }

    pub fn matches<T: ResourceItem>(&self, item: &T) -> bool {
        self.category.matches(item.category()) && matches_search(item, &self.search_term)
    }

    pub fn apply<T: ResourceItem>(&self, items: &[T]) -> Vec<T> {
        filter_items(items, &self.search_term, &self.category)
    }
}

/// Case-insensitive substring match of `search_term` against the item's
/// searchable text. An empty term matches everything.
pub fn matches_search<T: ResourceItem>(item: &T, search_term: &str) -> bool {
    search_term.is_empty() || item.searchable_text().contains(&search_term.to_lowercase())
}

/// Returns the items passing both the category and the search condition.
pub fn filter_items<T: ResourceItem>(
    items: &[T],
    search_term: &str,
    category: &CategoryFilter,
) -> Vec<T> {
    let needle = search_term.to_lowercase();
    items
        .iter()
        .filter(|item| category.matches(item.category()))
        .filter(|item| needle.is_empty() || item.searchable_text().contains(&needle))
        .cloned()
        .collect()
}
