use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::verse::Verse;

/// Which of the three filter controls a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterAxis {
    AgeGroup,
    Topic,
    Book,
}

impl FilterAxis {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AgeGroup => "Age Group",
            Self::Topic => "Topic",
            Self::Book => "Book",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::AgeGroup => Self::Topic,
            Self::Topic => Self::Book,
            Self::Book => Self::AgeGroup,
        }
    }
}

/// Active filter values. `None` or an empty string leaves that axis open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub age_group: Option<String>,
    pub topic: Option<String>,
    pub book: Option<String>,
}

impl Filters {
    pub fn get(&self, axis: FilterAxis) -> Option<&str> {
        let value = match axis {
            FilterAxis::AgeGroup => &self.age_group,
            FilterAxis::Topic => &self.topic,
            FilterAxis::Book => &self.book,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, axis: FilterAxis, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match axis {
            FilterAxis::AgeGroup => self.age_group = value,
            FilterAxis::Topic => self.topic = value,
            FilterAxis::Book => self.book = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.get(FilterAxis::AgeGroup).is_none()
            && self.get(FilterAxis::Topic).is_none()
            && self.get(FilterAxis::Book).is_none()
    }

    pub fn matches(&self, verse: &Verse) -> bool {
        self.get(FilterAxis::AgeGroup)
            .map_or(true, |age| verse.age_group == age)
            && self.get(FilterAxis::Topic).map_or(true, |topic| verse.has_topic(topic))
            && self.get(FilterAxis::Book).map_or(true, |book| verse.book == book)
    }
}

/// The filtered pool, in collection order.
pub fn filter_verses<'a>(verses: &'a [Verse], filters: &Filters) -> Vec<&'a Verse> {
    verses.iter().filter(|v| filters.matches(v)).collect()
}

/// Distinct values for each filter control, derived from the full collection
/// in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterIndex {
    pub age_groups: Vec<String>,
    pub topics: Vec<String>,
    pub books: Vec<String>,
}

impl FilterIndex {
    pub fn build(verses: &[Verse]) -> Self {
        Self {
            age_groups: distinct(verses.iter().map(|v| v.age_group.as_str())),
            topics: distinct(verses.iter().flat_map(|v| v.topic.iter().map(String::as_str))),
            books: distinct(verses.iter().map(|v| v.book.as_str())),
        }
    }

    pub fn values(&self, axis: FilterAxis) -> &[String] {
        match axis {
            FilterAxis::AgeGroup => &self.age_groups,
            FilterAxis::Topic => &self.topics,
            FilterAxis::Book => &self.books,
        }
    }

    /// Step through "All" followed by each value. Returns the new filter value.
    pub fn cycle(&self, axis: FilterAxis, current: Option<&str>, forward: bool) -> Option<String> {
        let values = self.values(axis);
        if values.is_empty() {
            return None;
        }

        // Position 0 is "All", value i sits at i + 1.
        let slots = values.len() + 1;
        let pos = current
            .and_then(|c| values.iter().position(|v| v == c))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (pos + 1) % slots
        } else {
            (pos + slots - 1) % slots
        };

        next.checked_sub(1).map(|i| values[i].clone())
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}
