use chrono::{Datelike, NaiveDate};

use crate::models::{Action, Button, Keyboard};
use crate::services::render_cache::GridCache;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const PADDING_LABEL: &str = " ";
const MIN_WEEKS: usize = 5;

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Day numbers of the month laid out Monday-first, padded with `None` on both
/// sides to whole weeks. Always at least five weeks, so a 28-day February
/// starting on a Monday gets a blank trailing week.
pub fn month_cells(year: i32, month: u32) -> Vec<Option<u32>> {
    let leading = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_monday() as usize)
        .unwrap_or(0);
    let days = days_in_month(year, month);

    let mut cells: Vec<Option<u32>> = Vec::with_capacity(42);
    cells.extend(std::iter::repeat(None).take(leading));
    cells.extend((1..=days).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    while cells.len() < MIN_WEEKS * 7 {
        cells.extend([None; 7]);
    }
    cells
}

/// Builds the weekday header plus one row per week for `today`'s month.
/// Days before `today` are rendered but inert.
pub fn build_month_grid(today: NaiveDate) -> Keyboard {
    let (year, month) = (today.year(), today.month());
    let mut grid = Keyboard::default();

    grid.push_row(WEEKDAY_LABELS.iter().map(|l| Button::inert(*l)).collect());

    for week in month_cells(year, month).chunks(7) {
        let row = week
            .iter()
            .map(|cell| match cell {
                Some(day) if *day >= today.day() => {
                    match NaiveDate::from_ymd_opt(year, month, *day) {
                        Some(date) => Button::new(day.to_string(), Action::Date(date)),
                        None => Button::inert(day.to_string()),
                    }
                }
                Some(day) => Button::inert(day.to_string()),
                None => Button::inert(PADDING_LABEL),
            })
            .collect();
        grid.push_row(row);
    }

    grid
}

/// Month grid for `today`, served from `cache` when this `(year, month)` was
/// built before. A cached grid keeps the selectable days of the day it was
/// first built on.
pub fn month_calendar(cache: &dyn GridCache, today: NaiveDate) -> Keyboard {
    let (year, month) = (today.year(), today.month());
    if let Some(grid) = cache.get(year, month) {
        return grid;
    }

    let grid = build_month_grid(today);
    if cache.put(year, month, grid.clone()) {
        tracing::debug!(year, month, "cached month calendar");
    }
    grid
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::services::render_cache::InMemoryGridCache;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[derive(Default)]
    struct CountingCache {
        inner: InMemoryGridCache,
        puts: AtomicUsize,
    }

    impl GridCache for CountingCache {
        fn get(&self, year: i32, month: u32) -> Option<Keyboard> {
            self.inner.get(year, month)
        }

        fn put(&self, year: i32, month: u32, grid: Keyboard) -> bool {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.inner.put(year, month, grid)
        }
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2400));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2400, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 6), 30);
        assert_eq!(days_in_month(2025, 9), 30);
        assert_eq!(days_in_month(2025, 11), 30);
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_cells_match_chrono_for_every_month() {
        for year in [1900, 2000, 2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let cells = month_cells(year, month);
                let days: Vec<u32> = cells.iter().flatten().copied().collect();
                let expected = days_in_month(year, month);
                assert_eq!(days, (1..=expected).collect::<Vec<_>>());
                assert_eq!(cells.len() % 7, 0);

                let weeks = cells.len() / 7;
                assert!((5..=6).contains(&weeks), "{year}-{month}: {weeks} weeks");

                // Day 1 sits in its weekday column.
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let column = cells.iter().position(|c| *c == Some(1)).unwrap();
                assert_eq!(column, first.weekday().num_days_from_monday() as usize);
                // Leading padding never spans a whole week. Trailing padding
                // only does so to reach five weeks.
                assert!(column < 7);
                let trailing = cells.len() - (column + expected as usize);
                assert!(trailing < 7 || weeks == 5);
            }
        }
    }

    #[test]
    fn test_june_2025_layout() {
        // 2025-06-01 is a Sunday.
        let grid = build_month_grid(date("2025-06-10"));
        assert_eq!(grid.rows.len(), 1 + 6);

        let header: Vec<&str> = grid.rows[0].iter().map(|b| b.label.as_str()).collect();
        assert_eq!(header, WEEKDAY_LABELS);
        assert!(grid.rows[0].iter().all(|b| !b.is_selectable()));

        assert!(grid.rows[1][..6].iter().all(|b| b.label == " " && !b.is_selectable()));
        assert_eq!(grid.rows[1][6].label, "1");
        assert_eq!(grid.rows[6][0].label, "30");
        assert!(grid.rows[6][1..].iter().all(|b| b.label == " "));
        assert!(grid.rows[1..].iter().all(|row| row.len() == 7));
    }

    #[test]
    fn test_february_2021_gets_blank_fifth_week() {
        // 2021-02-01 is a Monday and the month has 28 days.
        let grid = build_month_grid(date("2021-02-01"));
        assert_eq!(grid.rows.len(), 1 + 5);
        assert_eq!(grid.rows[1][0].label, "1");
        assert_eq!(grid.rows[4][6].label, "28");
        assert_eq!(grid.rows[5].len(), 7);
        assert!(grid.rows[5].iter().all(|b| b.label == " " && !b.is_selectable()));
    }

    #[test]
    fn test_every_month_has_five_or_six_weeks() {
        for year in 2000..2030 {
            for month in 1..=12 {
                let grid = build_month_grid(NaiveDate::from_ymd_opt(year, month, 1).unwrap());
                let weeks = grid.rows.len() - 1;
                assert!((5..=6).contains(&weeks), "{year}-{month:02}: {weeks} weeks");
            }
        }
    }

    #[test]
    fn test_past_days_are_inert() {
        let grid = build_month_grid(date("2025-06-10"));
        for button in grid.rows[1..].iter().flatten() {
            let Ok(day) = button.label.parse::<u32>() else {
                assert!(!button.is_selectable());
                continue;
            };
            if day < 10 {
                assert_eq!(button.action, Action::Noop, "day {day}");
            } else {
                let expected = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
                assert_eq!(button.action, Action::Date(expected));
            }
        }
    }

    #[test]
    fn test_calendar_served_from_cache() {
        let cache = CountingCache::default();
        let first = month_calendar(&cache, date("2025-06-10"));
        let second = month_calendar(&cache, date("2025-06-10"));
        assert_eq!(first, second);
        assert_eq!(cache.puts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cached_grid_keeps_original_cutoff() {
        let cache = InMemoryGridCache::new();
        let early = month_calendar(&cache, date("2025-06-05"));
        let later = month_calendar(&cache, date("2025-06-20"));
        assert_eq!(early, later);

        // Day 10 stays selectable even though the 20th is now "today".
        let day_10 = later
            .buttons()
            .find(|b| b.label == "10")
            .unwrap();
        assert!(day_10.is_selectable());
    }

    #[test]
    fn test_months_cached_separately() {
        let cache = InMemoryGridCache::new();
        let june = month_calendar(&cache, date("2025-06-10"));
        let july = month_calendar(&cache, date("2025-07-01"));
        assert_ne!(june, july);
        assert_eq!(cache.len(), 2);
    }
}
