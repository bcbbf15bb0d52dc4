use super::filter::FilterIndex;
use super::verse::Verse;

/// The loaded collection plus the filter-control values derived from it.
#[derive(Debug, Clone, Default)]
pub struct VerseStore {
    verses: Vec<Verse>,
    index: FilterIndex,
}

impl VerseStore {
    pub fn new(verses: Vec<Verse>) -> Self {
        let index = FilterIndex::build(&verses);
        Self { verses, index }
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn index(&self) -> &FilterIndex {
        &self.index
    }

    pub fn get(&self, id: u32) -> Option<&Verse> {
        self.verses.iter().find(|v| v.id == id)
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verses::verse::fixtures::john_and_psalm;

    #[test]
    fn store_indexes_on_construction() {
        let store = VerseStore::new(john_and_psalm());
        assert_eq!(store.len(), 2);
        assert_eq!(store.index().books, vec!["John", "Psalm"]);
        assert_eq!(store.get(2).map(|v| v.book.as_str()), Some("Psalm"));
        assert!(store.get(9).is_none());
    }

    #[test]
    fn default_store_is_empty() {
        let store = VerseStore::default();
        assert!(store.is_empty());
        assert!(store.index().topics.is_empty());
    }
}
