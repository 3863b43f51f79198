//! Deriving the visible list of games from a catalog snapshot and the current search/category
//! selection.

use itertools::Itertools;
use tracing::trace;

use crate::{
    data::{Catalog, Game, ViewMode},
    utils::contains_ignore_case,
};

/// Games whose title contains `query` (ignoring case) and, if a category is given, which belong
/// to that category
///
/// An empty query matches every title. The catalog order is kept.
pub fn apply_filters(catalog: &[Game], query: &str, category: Option<&str>) -> Vec<Game> {
    catalog
        .iter()
        .filter(|game| query.is_empty() || contains_ignore_case(&game.title, query))
        .filter(|game| category.is_none_or(|c| game.categories.iter().any(|gc| gc == c)))
        .cloned()
        .collect()
}

/// Every category used by at least one game, without duplicates, in order of first appearance
pub fn derive_categories(catalog: &[Game]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|game| game.categories.iter())
        .unique()
        .cloned()
        .collect()
}

/// Owns the transient view state (search query, selected category, display mode) and keeps the
/// visible games in sync with it.
///
/// The catalog is only ever read. Any change to the catalog, query or category recomputes the
/// visible games from scratch.
#[derive(Debug, Clone)]
pub struct LibraryView {
    catalog: Catalog,
    query: String,
    category: Option<String>,
    mode: ViewMode,
    visible: Vec<Game>,
    categories: Vec<String>,
}

impl LibraryView {
    pub fn new(catalog: Catalog, mode: ViewMode) -> Self {
        let mut view = Self {
            catalog,
            query: String::new(),
            category: None,
            mode,
            visible: Vec::new(),
            categories: Vec::new(),
        };
        view.recompute();

        view
    }

    fn recompute(&mut self) {
        self.categories = derive_categories(&self.catalog);
        self.visible = apply_filters(&self.catalog, &self.query, self.category.as_deref());

        trace!(
            "View - {} of {} games visible (query: {:?}, category: {:?})",
            self.visible.len(),
            self.catalog.len(),
            self.query,
            self.category
        );
    }

    /// Replace the catalog with a newer snapshot, keeping the current query and category
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.recompute();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    /// Select a category to filter by, or `None` (or an empty name) for all games
    pub fn select_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.is_empty());
        self.recompute();
    }

    pub fn toggle_view_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    pub fn visible(&self) -> &[Game] {
        &self.visible
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }
}
