//! Timeline and calendar views over an entry snapshot.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::entry::MoodEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

#[derive(Debug, Clone, Default)]
pub struct TimelineFilter {
    /// Case-insensitive substring matched against title and content.
    pub query: Option<String>,
    /// Exact color token.
    pub color: Option<String>,
    pub order: SortOrder,
}

impl TimelineFilter {
    fn matches(&self, entry: &MoodEntry, needle: Option<&str>) -> bool {
        let matches_search = needle.map_or(true, |needle| {
            entry.title.to_lowercase().contains(needle)
                || entry.content.to_lowercase().contains(needle)
        });
        let matches_color = self
            .color
            .as_deref()
            .map_or(true, |color| entry.color == color);
        matches_search && matches_color
    }
}

/// Entries matching `filter`, ordered by timestamp.
pub fn filter_timeline(entries: &[MoodEntry], filter: &TimelineFilter) -> Vec<MoodEntry> {
    let needle = filter
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<MoodEntry> = entries
        .iter()
        .filter(|e| filter.matches(e, needle.as_deref()))
        .cloned()
        .collect();

    match filter.order {
        SortOrder::Newest => matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::Oldest => matched.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
    }
    matched
}

/// Distinct colors in order of first appearance.
pub fn unique_colors(entries: &[MoodEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|e| seen.insert(e.color.as_str()))
        .map(|e| e.color.clone())
        .collect()
}

/// Entries written on `date`, earliest first.
pub fn entries_on(entries: &[MoodEntry], date: NaiveDate) -> Vec<MoodEntry> {
    let mut day: Vec<MoodEntry> = entries.iter().filter(|e| e.date == date).cloned().collect();
    day.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    day
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub entries: Vec<MoodEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

/// Month grid padded to whole Sunday-to-Saturday weeks. Returns `None` when
/// `year`/`month` do not name a representable month.
pub fn calendar_month(entries: &[MoodEntry], year: i32, month: u32) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;

    let start = first.checked_sub_days(Days::new(first.weekday().num_days_from_sunday().into()))?;
    let end = last.checked_add_days(Days::new((6 - last.weekday().num_days_from_sunday()).into()))?;

    let mut by_date: HashMap<NaiveDate, Vec<MoodEntry>> = HashMap::new();
    for entry in entries.iter().filter(|e| e.date >= start && e.date <= end) {
        by_date.entry(entry.date).or_default().push(entry.clone());
    }

    let days = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| {
            let mut day_entries = by_date.remove(&date).unwrap_or_default();
            day_entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            CalendarDay {
                date,
                in_month: date.month() == month,
                entries: day_entries,
            }
        })
        .collect();

    Some(CalendarMonth { year, month, days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Weekday};

    fn entry(id: &str, title: &str, content: &str, color: &str, ts: &str) -> MoodEntry {
        let timestamp = DateTime::parse_from_rfc3339(ts).unwrap();
        MoodEntry {
            id: id.to_string(),
            user_id: None,
            title: title.to_string(),
            content: content.to_string(),
            color: color.to_string(),
            icon: "Sun".to_string(),
            date: timestamp.date_naive(),
            timestamp,
        }
    }

    fn sample() -> Vec<MoodEntry> {
        vec![
            entry("a", "楽しい一日", "友達と遊んだ", "#FFD700", "2025-10-13T10:00:00+09:00"),
            entry("b", "Quiet afternoon", "Reading in the rain", "#87CEEB", "2025-10-13T14:00:00+09:00"),
            entry("c", "New challenge", "Started a PROJECT", "#FF6B6B", "2025-10-12T09:00:00+09:00"),
            entry("d", "Walk", "Morning walk", "#87CEEB", "2025-10-01T07:00:00+09:00"),
        ]
    }

    fn ids(entries: &[MoodEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn default_filter_sorts_newest_first() {
        let result = filter_timeline(&sample(), &TimelineFilter::default());
        assert_eq!(ids(&result), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn oldest_first() {
        let filter = TimelineFilter {
            order: SortOrder::Oldest,
            ..Default::default()
        };
        assert_eq!(ids(&filter_timeline(&sample(), &filter)), vec!["d", "c", "a", "b"]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let filter = TimelineFilter {
            query: Some("project".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_timeline(&sample(), &filter)), vec!["c"]);

        let filter = TimelineFilter {
            query: Some("  QUIET ".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_timeline(&sample(), &filter)), vec!["b"]);
    }

    #[test]
    fn blank_query_matches_everything() {
        let filter = TimelineFilter {
            query: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(filter_timeline(&sample(), &filter).len(), 4);
    }

    #[test]
    fn color_filter_is_exact() {
        let filter = TimelineFilter {
            color: Some("#87CEEB".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_timeline(&sample(), &filter)), vec!["b", "d"]);

        let filter = TimelineFilter {
            color: Some("#87ceeb".into()),
            ..Default::default()
        };
        assert!(filter_timeline(&sample(), &filter).is_empty());
    }

    #[test]
    fn unique_colors_keep_first_appearance() {
        assert_eq!(unique_colors(&sample()), vec!["#FFD700", "#87CEEB", "#FF6B6B"]);
    }

    #[test]
    fn entries_on_a_day_earliest_first() {
        let day = NaiveDate::from_ymd_opt(2025, 10, 13).unwrap();
        let mut entries = sample();
        entries.reverse();
        assert_eq!(ids(&entries_on(&entries, day)), vec!["a", "b"]);
    }

    #[test]
    fn calendar_pads_to_whole_weeks() {
        let month = calendar_month(&sample(), 2025, 10).unwrap();

        // October 2025 starts on a Wednesday and ends on a Friday
        let first = month.days.first().unwrap();
        let last = month.days.last().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 9, 28).unwrap());
        assert_eq!(first.date.weekday(), Weekday::Sun);
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(last.date.weekday(), Weekday::Sat);
        assert_eq!(month.days.len() % 7, 0);
        assert!(!first.in_month);

        let oct13 = month
            .days
            .iter()
            .find(|d| d.date == NaiveDate::from_ymd_opt(2025, 10, 13).unwrap())
            .unwrap();
        assert!(oct13.in_month);
        assert_eq!(ids(&oct13.entries), vec!["a", "b"]);
    }

    #[test]
    fn calendar_handles_december() {
        let month = calendar_month(&[], 2025, 12).unwrap();
        assert_eq!(month.days.last().unwrap().date, NaiveDate::from_ymd_opt(2026, 1, 3).unwrap());
    }

    #[test]
    fn calendar_rejects_invalid_month() {
        assert!(calendar_month(&[], 2025, 13).is_none());
        assert!(calendar_month(&[], 2025, 0).is_none());
    }
}
