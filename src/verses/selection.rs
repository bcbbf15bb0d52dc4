use chrono::{Datelike, Local};
use rand::Rng;

use super::verse::Verse;

/// Uniform pick over the pool. `None` for an empty pool so callers keep their
/// previous selection.
pub fn pick_random<'a, R: Rng + ?Sized>(pool: &[&'a Verse], rng: &mut R) -> Option<&'a Verse> {
    if pool.is_empty() {
        return None;
    }
    let index = rng.random_range(0..pool.len());
    Some(pool[index])
}

/// Verse of the day: `day_of_month mod len` over the unfiltered collection.
pub fn daily_verse(verses: &[Verse], day_of_month: u32) -> Option<&Verse> {
    if verses.is_empty() {
        return None;
    }
    let index = day_of_month as usize % verses.len();
    verses.get(index)
}

/// Local calendar day, 1 through 31.
pub fn today_day_of_month() -> u32 {
    Local::now().day()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::verses::filter::{filter_verses, Filters};
    use crate::verses::verse::fixtures::john_and_psalm;

    #[test]
    fn random_pick_from_single_member_pool() {
        let verses = john_and_psalm();
        let filters = Filters {
            age_group: Some("preteens".into()),
            ..Default::default()
        };
        let pool = filter_verses(&verses, &filters);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            assert_eq!(pick_random(&pool, &mut rng).map(|v| v.id), Some(2));
        }
    }

    #[test]
    fn random_pick_reaches_every_member() {
        let verses = john_and_psalm();
        let pool = filter_verses(&verses, &Filters::default());
        let mut rng = StdRng::seed_from_u64(42);

        let seen: HashSet<u32> = (0..200)
            .filter_map(|_| pick_random(&pool, &mut rng))
            .map(|v| v.id)
            .collect();
        assert_eq!(seen, HashSet::from([1, 2]));
    }

    #[test]
    fn random_pick_from_empty_pool_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_random(&[], &mut rng).is_none());
    }

    #[test]
    fn daily_verse_uses_day_modulo_len() {
        let verses = john_and_psalm();
        assert_eq!(daily_verse(&verses, 5).map(|v| v.id), Some(2));
        assert_eq!(daily_verse(&verses, 4).map(|v| v.id), Some(1));
        assert_eq!(daily_verse(&verses, 31).map(|v| v.id), Some(2));
    }

    #[test]
    fn daily_verse_is_deterministic() {
        let verses = john_and_psalm();
        for day in 1..=31 {
            assert_eq!(daily_verse(&verses, day), daily_verse(&verses, day));
        }
    }

    #[test]
    fn daily_verse_of_empty_collection_is_none() {
        assert!(daily_verse(&[], 12).is_none());
    }

    #[test]
    fn today_is_a_calendar_day() {
        assert!((1..=31).contains(&today_day_of_month()));
    }
}
