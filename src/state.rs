//! Presentation state owned by the controller. Every user action maps to one
//! transition method here; the controller only adds I/O around them.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ThemePreset;
use crate::verses::{
    daily_verse, filter_verses, pick_random, FilterAxis, Filters, Verse, VerseStore,
};

/// Shown in place of the verse text while memory mode is on.
pub const MEMORY_MASK: &str = "______";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded {
        verses: usize,
        rejected: usize,
    },
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub theme: ThemePreset,
    pub filters: Filters,
    /// Id of the random verse on display.
    pub current_verse: Option<u32>,
    pub daily_verse: Option<u32>,
    pub memory_mode: bool,
    pub favorites: BTreeSet<u32>,
    pub load_status: LoadStatus,
}

impl AppState {
    pub fn new(theme: ThemePreset, initial_age_group: Option<String>) -> Self {
        let mut filters = Filters::default();
        filters.set(FilterAxis::AgeGroup, initial_age_group);
        Self {
            theme,
            filters,
            ..Default::default()
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn toggle_memory_mode(&mut self) {
        self.memory_mode = !self.memory_mode;
    }

    /// Add or remove the current verse. Returns the new membership, or `None`
    /// when no verse is selected.
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let id = self.current_verse?;
        if self.favorites.remove(&id) {
            Some(false)
        } else {
            self.favorites.insert(id);
            Some(true)
        }
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    pub fn current_is_favorite(&self) -> bool {
        self.current_verse.is_some_and(|id| self.is_favorite(id))
    }

    /// The verse text as it should be displayed.
    pub fn display_text<'a>(&self, verse: &'a Verse) -> &'a str {
        if self.memory_mode {
            MEMORY_MASK
        } else {
            &verse.text
        }
    }

    /// Draw a new random verse from the filtered pool. Keeps the previous one
    /// when the pool is empty. Returns whether a verse was drawn.
    pub fn show_another<R: Rng + ?Sized>(&mut self, store: &VerseStore, rng: &mut R) -> bool {
        let pool = filter_verses(store.verses(), &self.filters);
        match pick_random(&pool, rng) {
            Some(verse) => {
                debug!(id = verse.id, pool = pool.len(), "random verse selected");
                self.current_verse = Some(verse.id);
                true
            }
            None => false,
        }
    }

    /// Change one filter axis and redraw from the new pool.
    pub fn set_filter<R: Rng + ?Sized>(
        &mut self,
        axis: FilterAxis,
        value: Option<String>,
        store: &VerseStore,
        rng: &mut R,
    ) -> bool {
        self.filters.set(axis, value);
        self.show_another(store, rng)
    }

    pub fn clear_filters<R: Rng + ?Sized>(&mut self, store: &VerseStore, rng: &mut R) -> bool {
        self.filters = Filters::default();
        self.show_another(store, rng)
    }

    /// A fresh collection arrived: pick the day's verse from the whole
    /// collection and a random one from the filtered pool.
    pub fn collection_loaded<R: Rng + ?Sized>(
        &mut self,
        store: &VerseStore,
        rejected: usize,
        day_of_month: u32,
        rng: &mut R,
    ) {
        self.load_status = LoadStatus::Loaded {
            verses: store.len(),
            rejected,
        };
        self.daily_verse = daily_verse(store.verses(), day_of_month).map(|v| v.id);
        self.show_another(store, rng);
    }

    pub fn load_failed(&mut self, reason: String) {
        self.load_status = LoadStatus::Failed(reason);
    }

    pub fn pool_size(&self, store: &VerseStore) -> usize {
        filter_verses(store.verses(), &self.filters).len()
    }
}
