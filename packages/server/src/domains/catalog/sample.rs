//! Feed sampling policies.
//!
//! Two deliberately different behaviors:
//! - [`sample_daily`] is seeded by the calendar date: the bestseller and
//!   new-title charts stay stable (and shareable) for a whole day, then
//!   rotate;
//! - [`sample_random`] reshuffles on every call, so the curated widget
//!   shows fresh picks on each page load.
//!
//! Both return the input unchanged when it already fits the requested
//! count.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Pick `count` items with a shuffle seeded by `date`.
///
/// Same date and input ⇒ same subset in the same order.
pub fn sample_daily<T>(mut items: Vec<T>, count: usize, date: NaiveDate) -> Vec<T> {
    if items.len() <= count {
        return items;
    }
    let mut rng = StdRng::seed_from_u64(date.num_days_from_ce() as u64);
    items.shuffle(&mut rng);
    items.truncate(count);
    items
}

/// Pick `count` items with an unseeded shuffle.
pub fn sample_random<T>(mut items: Vec<T>, count: usize) -> Vec<T> {
    if items.len() <= count {
        return items;
    }
    items.shuffle(&mut rand::thread_rng());
    items.truncate(count);
    items
}

/// Candidate pool size for a feed of `count` items: ten times the ask,
/// at least 50, so sampling has something to choose from.
pub fn fetch_pool_size(count: usize) -> u32 {
    (count * 10).max(50) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn items() -> Vec<u32> {
        (0..50).collect()
    }

    #[test]
    fn test_daily_is_stable_within_a_day() {
        let today = date(2025, 3, 14);
        let first = sample_daily(items(), 5, today);
        let second = sample_daily(items(), 5, today);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_daily_rotates_across_days() {
        let a = sample_daily(items(), 10, date(2025, 3, 14));
        let b = sample_daily(items(), 10, date(2025, 3, 15));
        // 10 of 50 in seeded order; two days agreeing would mean the
        // seed is being ignored.
        assert_ne!(a, b);
    }

    #[test]
    fn test_small_input_returned_unchanged() {
        let few = vec![1, 2, 3];
        assert_eq!(sample_daily(few.clone(), 5, date(2025, 1, 1)), few);
        assert_eq!(sample_random(few.clone(), 5), few);
        assert_eq!(sample_random(few.clone(), 3), few);
    }

    #[test]
    fn test_random_returns_requested_count() {
        let picked = sample_random(items(), 7);
        assert_eq!(picked.len(), 7);
        for item in &picked {
            assert!(*item < 50);
        }
    }

    #[test]
    fn test_fetch_pool_size() {
        assert_eq!(fetch_pool_size(3), 50);
        assert_eq!(fetch_pool_size(5), 50);
        assert_eq!(fetch_pool_size(10), 100);
    }
}
