//! # Mood statistics
//!
//! Pure aggregations over a snapshot of diary entries. Every function takes
//! the entries by slice, never mutates them, and recomputes from scratch,
//! so the five views can be produced in any order (or concurrently) from the
//! same snapshot.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrorKind};
use crate::models::entry::MoodEntry;
use crate::models::icon::{resolve_icon, IconHandle, MoodIcon};

/// Number of days covered by the trailing trend, today included.
pub const TREND_DAYS: usize = 7;

/// Language used for display labels in derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelLocale {
    #[default]
    Ja,
    En,
}

impl std::str::FromStr for LabelLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Self::Ja),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            other => Err(format!("unsupported label locale: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorBucket {
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeSlot {
    /// Display order of the buckets.
    pub const ORDER: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    /// Morning 5-11, afternoon 12-17, evening 18-23, night 0-4.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeSlot::Morning,
            12..=17 => TimeSlot::Afternoon,
            18..=23 => TimeSlot::Evening,
            _ => TimeSlot::Night,
        }
    }

    pub fn label(self, locale: LabelLocale) -> &'static str {
        match (self, locale) {
            (TimeSlot::Morning, LabelLocale::Ja) => "朝 (5-11時)",
            (TimeSlot::Afternoon, LabelLocale::Ja) => "昼 (12-17時)",
            (TimeSlot::Evening, LabelLocale::Ja) => "夜 (18-23時)",
            (TimeSlot::Night, LabelLocale::Ja) => "深夜 (0-4時)",
            (TimeSlot::Morning, LabelLocale::En) => "Morning (5-11)",
            (TimeSlot::Afternoon, LabelLocale::En) => "Afternoon (12-17)",
            (TimeSlot::Evening, LabelLocale::En) => "Evening (18-23)",
            (TimeSlot::Night, LabelLocale::En) => "Night (0-4)",
        }
    }

    fn index(self) -> usize {
        match self {
            TimeSlot::Morning => 0,
            TimeSlot::Afternoon => 1,
            TimeSlot::Evening => 2,
            TimeSlot::Night => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlotBucket {
    pub slot: TimeSlot,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StreakSummary {
    pub current_streak: usize,
    pub max_streak: usize,
    pub total_distinct_days: usize,
}

/// The most frequent icon. `icon: None` with `count: 0` means there were no
/// entries at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IconUsage {
    pub icon: Option<String>,
    pub count: usize,
}

impl IconUsage {
    pub fn none() -> Self {
        Self::default()
    }

    /// Registry handle for the winning icon; the sentinel resolves to the
    /// fallback.
    pub fn handle(&self) -> IconHandle {
        self.icon
            .as_deref()
            .map_or(IconHandle::Fallback, resolve_icon)
    }
}

/// Counts entries per exact color string, most used first.
///
/// Colors with equal counts keep the order in which they first appear in
/// `entries`.
pub fn color_distribution(entries: &[MoodEntry]) -> Vec<ColorBucket> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<ColorBucket> = Vec::new();

    for entry in entries {
        match positions.get(entry.color.as_str()) {
            Some(&pos) => buckets[pos].count += 1,
            None => {
                positions.insert(entry.color.as_str(), buckets.len());
                buckets.push(ColorBucket {
                    color: entry.color.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, which preserves first-appearance order for ties
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

/// Buckets entries by the local hour of their timestamp. Always returns the
/// four slots in [`TimeSlot::ORDER`].
pub fn time_of_day_distribution(
    entries: &[MoodEntry],
    locale: LabelLocale,
) -> [TimeSlotBucket; 4] {
    let mut counts = [0usize; 4];
    for entry in entries {
        counts[TimeSlot::from_hour(entry.timestamp.hour()).index()] += 1;
    }

    TimeSlot::ORDER.map(|slot| TimeSlotBucket {
        slot,
        label: slot.label(locale),
        count: counts[slot.index()],
    })
}

/// Entries per day for the seven calendar days ending on `now`'s date,
/// oldest first. Days without entries are reported with a zero count.
pub fn weekly_trend(
    entries: &[MoodEntry],
    now: DateTime<FixedOffset>,
    locale: LabelLocale,
) -> [TrendPoint; TREND_DAYS] {
    let today = now.date_naive();

    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for entry in entries {
        *per_day.entry(entry.date).or_default() += 1;
    }

    std::array::from_fn(|i| {
        let back = (TREND_DAYS - 1 - i) as u64;
        let date = today
            .checked_sub_days(Days::new(back))
            .unwrap_or(NaiveDate::MIN);
        TrendPoint {
            date,
            label: trend_label(date, locale),
            count: per_day.get(&date).copied().unwrap_or(0),
        }
    })
}

fn trend_label(date: NaiveDate, locale: LabelLocale) -> String {
    match locale {
        LabelLocale::Ja => format!("{}日({})", date.day(), weekday_ja(date.weekday())),
        LabelLocale::En => format!("{} {}", date.day(), date.format("%a")),
    }
}

fn weekday_ja(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "日",
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
    }
}

/// Consecutive-day statistics over the distinct entry dates.
///
/// The current streak only counts while the latest active day is today or
/// yesterday relative to `now`; otherwise it is reported as zero even though
/// the data itself ends in a run.
pub fn streak_summary(entries: &[MoodEntry], now: DateTime<FixedOffset>) -> StreakSummary {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let mut run = 0usize;
    let mut max_run = 0usize;
    let mut last: Option<NaiveDate> = None;

    for &day in &days {
        run = match last {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        max_run = max_run.max(run);
        last = Some(day);
    }

    let today = now.date_naive();
    let yesterday = today.pred_opt();
    let current_streak = match last {
        Some(latest) if latest == today || Some(latest) == yesterday => run,
        _ => 0,
    };

    StreakSummary {
        current_streak,
        max_streak: max_run,
        total_distinct_days: days.len(),
    }
}

/// The icon used most often.
///
/// Among icons that end with the same count, the one that first appears in
/// `entries` wins.
pub fn most_used_icon(entries: &[MoodEntry]) -> IconUsage {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for entry in entries {
        let icon = entry.icon.as_str();
        match positions.get(icon) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(icon, counts.len());
                counts.push((icon, 1));
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(icon, count) in &counts {
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((icon, count));
        }
    }

    match best {
        Some((icon, count)) => IconUsage {
            icon: Some(icon.to_string()),
            count,
        },
        None => IconUsage::none(),
    }
}

/// Checks the date/timestamp contract for every entry in the snapshot.
pub fn validate_entries(entries: &[MoodEntry]) -> Result<(), ValidationError> {
    for entry in entries {
        let local = entry.local_date();
        if entry.date != local {
            return Err(ValidationError {
                kind: ValidationErrorKind::MalformedEntry,
                entry_id: entry.id.clone(),
                reason: format!(
                    "date {} does not match timestamp day {}",
                    entry.date, local
                ),
            });
        }
    }
    Ok(())
}

/// Every statistics view computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub generated_for: NaiveDate,
    pub total_entries: usize,
    pub colors: Vec<ColorBucket>,
    pub time_of_day: [TimeSlotBucket; 4],
    pub weekly_trend: [TrendPoint; TREND_DAYS],
    pub streak: StreakSummary,
    pub most_used_icon: IconUsage,
    pub most_used_glyph: MoodIcon,
}

impl StatsReport {
    /// Validates the snapshot, then runs every aggregation on it. Either the
    /// whole report is produced or the call fails.
    pub fn compute(
        entries: &[MoodEntry],
        now: DateTime<FixedOffset>,
        locale: LabelLocale,
    ) -> Result<Self, ValidationError> {
        validate_entries(entries)?;

        let most_used_icon = most_used_icon(entries);
        Ok(Self {
            generated_for: now.date_naive(),
            total_entries: entries.len(),
            colors: color_distribution(entries),
            time_of_day: time_of_day_distribution(entries, locale),
            weekly_trend: weekly_trend(entries, now, locale),
            streak: streak_summary(entries, now),
            most_used_glyph: most_used_icon.handle().icon(),
            most_used_icon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(ts).unwrap()
    }

    fn entry(id: &str, color: &str, icon: &str, ts: &str) -> MoodEntry {
        let timestamp = at(ts);
        MoodEntry {
            id: id.to_string(),
            user_id: None,
            title: format!("title {id}"),
            content: format!("content {id}"),
            color: color.to_string(),
            icon: icon.to_string(),
            date: timestamp.date_naive(),
            timestamp,
        }
    }

    fn on_days(days: &[&str]) -> Vec<MoodEntry> {
        days.iter()
            .enumerate()
            .map(|(i, day)| entry(&i.to_string(), "#fff", "Sun", &format!("{day}T12:00:00+09:00")))
            .collect()
    }

    fn today() -> DateTime<FixedOffset> {
        at("2025-10-14T20:00:00+09:00")
    }

    // ── color distribution ──────────────────────────────────────────────

    #[test]
    fn colors_sorted_by_count_with_first_seen_tie_break() {
        let entries = vec![
            entry("1", "#bfdbfe", "Cloud", "2025-10-10T09:00:00Z"),
            entry("2", "#fef08a", "Sun", "2025-10-10T10:00:00Z"),
            entry("3", "#fecaca", "Flame", "2025-10-11T09:00:00Z"),
            entry("4", "#fef08a", "Sun", "2025-10-12T09:00:00Z"),
            entry("5", "#fecaca", "Flame", "2025-10-12T19:00:00Z"),
        ];

        let buckets = color_distribution(&entries);
        let summary: Vec<(&str, usize)> =
            buckets.iter().map(|b| (b.color.as_str(), b.count)).collect();
        assert_eq!(
            summary,
            vec![("#fef08a", 2), ("#fecaca", 2), ("#bfdbfe", 1)]
        );
    }

    #[test]
    fn colors_match_exactly_without_normalization() {
        let entries = vec![
            entry("1", "#FFD700", "Sun", "2025-10-10T09:00:00Z"),
            entry("2", "#ffd700", "Sun", "2025-10-10T10:00:00Z"),
            entry("3", "not-a-color", "Sun", "2025-10-10T11:00:00Z"),
        ];

        let buckets = color_distribution(&entries);
        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|b| b.count == 1));
    }

    #[test]
    fn color_counts_sum_to_entry_count() {
        let entries = vec![
            entry("1", "#a", "Sun", "2025-10-10T09:00:00Z"),
            entry("2", "#b", "Sun", "2025-10-10T10:00:00Z"),
            entry("3", "#a", "Sun", "2025-10-10T11:00:00Z"),
            entry("4", "#c", "Sun", "2025-10-10T12:00:00Z"),
            entry("5", "#a", "Sun", "2025-10-10T13:00:00Z"),
        ];

        let total: usize = color_distribution(&entries).iter().map(|b| b.count).sum();
        assert_eq!(total, entries.len());
    }

    #[test]
    fn color_counts_survive_reordering() {
        let entries = vec![
            entry("1", "#a", "Sun", "2025-10-10T09:00:00Z"),
            entry("2", "#b", "Sun", "2025-10-10T10:00:00Z"),
            entry("3", "#a", "Sun", "2025-10-10T11:00:00Z"),
            entry("4", "#c", "Sun", "2025-10-10T12:00:00Z"),
            entry("5", "#b", "Sun", "2025-10-10T13:00:00Z"),
            entry("6", "#a", "Sun", "2025-10-10T14:00:00Z"),
        ];
        let counts = |entries: &[MoodEntry]| -> BTreeSet<(String, usize)> {
            color_distribution(entries)
                .into_iter()
                .map(|b| (b.color, b.count))
                .collect()
        };

        let reversed: Vec<MoodEntry> = entries.iter().rev().cloned().collect();
        let mut rotated = entries.clone();
        rotated.rotate_left(2);

        assert_eq!(counts(&entries), counts(&reversed));
        assert_eq!(counts(&entries), counts(&rotated));
    }

    #[test]
    fn color_distribution_is_idempotent() {
        let entries = vec![
            entry("1", "#b", "Sun", "2025-10-10T09:00:00Z"),
            entry("2", "#a", "Sun", "2025-10-10T10:00:00Z"),
            entry("3", "#a", "Sun", "2025-10-10T11:00:00Z"),
        ];
        assert_eq!(color_distribution(&entries), color_distribution(&entries));
    }

    #[test]
    fn no_entries_no_colors() {
        assert!(color_distribution(&[]).is_empty());
    }

    // ── time of day ─────────────────────────────────────────────────────

    #[test]
    fn every_hour_lands_in_its_slot() {
        for hour in 0..24 {
            let expected = match hour {
                5..=11 => TimeSlot::Morning,
                12..=17 => TimeSlot::Afternoon,
                18..=23 => TimeSlot::Evening,
                _ => TimeSlot::Night,
            };
            assert_eq!(TimeSlot::from_hour(hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn slot_boundaries_are_inclusive() {
        let entries = vec![
            entry("1", "#a", "Sun", "2025-10-10T04:59:00+09:00"),
            entry("2", "#a", "Sun", "2025-10-10T05:00:00+09:00"),
            entry("3", "#a", "Sun", "2025-10-10T11:59:00+09:00"),
            entry("4", "#a", "Sun", "2025-10-10T12:00:00+09:00"),
            entry("5", "#a", "Sun", "2025-10-10T17:59:00+09:00"),
            entry("6", "#a", "Sun", "2025-10-10T18:00:00+09:00"),
            entry("7", "#a", "Sun", "2025-10-10T23:59:00+09:00"),
            entry("8", "#a", "Sun", "2025-10-10T00:00:00+09:00"),
        ];

        let counts: Vec<usize> = time_of_day_distribution(&entries, LabelLocale::Ja)
            .iter()
            .map(|b| b.count)
            .collect();
        assert_eq!(counts, vec![2, 2, 2, 2]);
    }

    #[test]
    fn hour_uses_the_entry_offset() {
        // 23:30 UTC is 08:30 the next morning in +09:00
        let entries = vec![entry("1", "#a", "Sun", "2025-10-10T08:30:00+09:00")];
        let buckets = time_of_day_distribution(&entries, LabelLocale::En);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[2].count, 0);
    }

    #[test]
    fn empty_input_still_yields_four_slots() {
        let buckets = time_of_day_distribution(&[], LabelLocale::Ja);
        let slots: Vec<TimeSlot> = buckets.iter().map(|b| b.slot).collect();
        assert_eq!(slots, TimeSlot::ORDER.to_vec());
        assert!(buckets.iter().all(|b| b.count == 0));
        assert_eq!(buckets[0].label, "朝 (5-11時)");
        assert_eq!(buckets[3].label, "深夜 (0-4時)");
    }

    // ── weekly trend ────────────────────────────────────────────────────

    #[test]
    fn trend_covers_seven_days_ending_today() {
        let entries = on_days(&["2025-10-08", "2025-10-14", "2025-10-14", "2025-10-01"]);
        let trend = weekly_trend(&entries, today(), LabelLocale::Ja);

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2025, 10, 8).unwrap());
        assert_eq!(trend[6].date, today().date_naive());
        assert!(trend.windows(2).all(|w| w[0].date.succ_opt() == Some(w[1].date)));

        let counts: Vec<usize> = trend.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn trend_counts_by_entry_date_field() {
        let mut entry = entry("1", "#a", "Sun", "2025-10-14T10:00:00+09:00");
        entry.date = NaiveDate::from_ymd_opt(2025, 10, 13).unwrap();

        let trend = weekly_trend(&[entry], today(), LabelLocale::Ja);
        assert_eq!(trend[5].count, 1);
        assert_eq!(trend[6].count, 0);
    }

    #[test]
    fn trend_crosses_year_boundary() {
        let now = at("2026-01-03T08:00:00+00:00");
        let entries = on_days(&["2025-12-28", "2025-12-31", "2026-01-03"]);
        let trend = weekly_trend(&entries, now, LabelLocale::En);

        let dates: Vec<String> = trend.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(
            dates,
            vec![
                "2025-12-28",
                "2025-12-29",
                "2025-12-30",
                "2025-12-31",
                "2026-01-01",
                "2026-01-02",
                "2026-01-03"
            ]
        );
        let counts: Vec<usize> = trend.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn trend_crosses_leap_day() {
        let now = at("2024-03-02T12:00:00+00:00");
        let trend = weekly_trend(&[], now, LabelLocale::En);
        assert_eq!(trend[4].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
    }

    #[test]
    fn trend_labels_follow_locale() {
        let ja = weekly_trend(&[], today(), LabelLocale::Ja);
        assert_eq!(ja[6].label, "14日(火)");
        assert_eq!(ja[0].label, "8日(水)");

        let en = weekly_trend(&[], today(), LabelLocale::En);
        assert_eq!(en[6].label, "14 Tue");
    }

    #[test]
    fn trend_today_follows_the_reference_offset() {
        // Same instant, different local days
        let tokyo = at("2025-10-14T01:00:00+09:00");
        let utc = tokyo.with_timezone(&FixedOffset::east_opt(0).unwrap());
        assert_eq!(
            weekly_trend(&[], tokyo, LabelLocale::En)[6].date.to_string(),
            "2025-10-14"
        );
        assert_eq!(
            weekly_trend(&[], utc, LabelLocale::En)[6].date.to_string(),
            "2025-10-13"
        );
    }

    // ── streaks ─────────────────────────────────────────────────────────

    fn summary(current: usize, max: usize, total: usize) -> StreakSummary {
        StreakSummary {
            current_streak: current,
            max_streak: max,
            total_distinct_days: total,
        }
    }

    #[test]
    fn streak_three_days_through_today() {
        let entries = on_days(&["2025-10-12", "2025-10-13", "2025-10-14"]);
        assert_eq!(streak_summary(&entries, today()), summary(3, 3, 3));
    }

    #[test]
    fn streak_with_gaps() {
        let entries = on_days(&["2025-10-10", "2025-10-12", "2025-10-14"]);
        assert_eq!(streak_summary(&entries, today()), summary(1, 1, 3));
    }

    #[test]
    fn streak_broken_by_passage_of_time() {
        let entries = on_days(&["2025-10-10", "2025-10-11", "2025-10-12"]);
        assert_eq!(streak_summary(&entries, today()), summary(0, 3, 3));
    }

    #[test]
    fn streak_empty() {
        assert_eq!(streak_summary(&[], today()), summary(0, 0, 0));
    }

    #[test]
    fn streak_alive_through_yesterday() {
        let entries = on_days(&["2025-10-13"]);
        assert_eq!(streak_summary(&entries, today()), summary(1, 1, 1));
    }

    #[test]
    fn streak_single_entry_today() {
        let entries = on_days(&["2025-10-14"]);
        assert_eq!(streak_summary(&entries, today()), summary(1, 1, 1));
    }

    #[test]
    fn streak_counts_each_day_once() {
        let entries = on_days(&[
            "2025-10-13",
            "2025-10-13",
            "2025-10-14",
            "2025-10-14",
            "2025-10-14",
        ]);
        assert_eq!(streak_summary(&entries, today()), summary(2, 2, 2));
    }

    #[test]
    fn streak_max_from_earlier_run() {
        let entries = on_days(&[
            "2025-10-01",
            "2025-10-02",
            "2025-10-03",
            "2025-10-04",
            "2025-10-10",
            "2025-10-13",
            "2025-10-14",
        ]);
        assert_eq!(streak_summary(&entries, today()), summary(2, 4, 7));
    }

    #[test]
    fn streak_across_month_and_year_boundaries() {
        let now = at("2026-01-01T09:00:00+00:00");
        let entries = on_days(&["2025-12-30", "2025-12-31", "2026-01-01"]);
        assert_eq!(streak_summary(&entries, now), summary(3, 3, 3));

        let now = at("2025-03-01T09:00:00+00:00");
        let entries = on_days(&["2025-02-27", "2025-02-28"]);
        assert_eq!(streak_summary(&entries, now), summary(2, 2, 2));
    }

    #[test]
    fn streak_ignores_input_order() {
        let mut entries = on_days(&["2025-10-14", "2025-10-10", "2025-10-12", "2025-10-13", "2025-10-11"]);
        let forward = streak_summary(&entries, today());
        entries.reverse();
        assert_eq!(streak_summary(&entries, today()), forward);
        assert_eq!(forward, summary(5, 5, 5));
    }

    #[test]
    fn streak_with_future_latest_day_is_not_current() {
        let entries = on_days(&["2025-10-14", "2025-10-15"]);
        assert_eq!(streak_summary(&entries, today()), summary(0, 2, 2));
    }

    #[test]
    fn streak_uses_latest_day_not_membership_of_today() {
        // yesterday and two days before, with an isolated older day
        let entries = on_days(&["2025-10-01", "2025-10-12", "2025-10-13"]);
        assert_eq!(streak_summary(&entries, today()), summary(2, 2, 3));
    }

    // ── icons ───────────────────────────────────────────────────────────

    #[test]
    fn most_used_icon_of_nothing_is_sentinel() {
        let usage = most_used_icon(&[]);
        assert_eq!(usage, IconUsage { icon: None, count: 0 });
        assert!(usage.handle().is_fallback());
    }

    #[test]
    fn most_used_icon_counts() {
        let entries = vec![
            entry("1", "#a", "Heart", "2025-10-10T09:00:00Z"),
            entry("2", "#a", "Sun", "2025-10-10T09:00:00Z"),
            entry("3", "#a", "Heart", "2025-10-10T09:00:00Z"),
            entry("4", "#a", "Sun", "2025-10-10T09:00:00Z"),
            entry("5", "#a", "Heart", "2025-10-10T09:00:00Z"),
        ];
        let usage = most_used_icon(&entries);
        assert_eq!(usage.icon.as_deref(), Some("Heart"));
        assert_eq!(usage.count, 3);
        assert_eq!(usage.handle().icon(), MoodIcon::Heart);
    }

    #[test]
    fn icon_tie_goes_to_first_appearance() {
        let entries = vec![
            entry("1", "#a", "Sun", "2025-10-10T09:00:00Z"),
            entry("2", "#a", "Moon", "2025-10-10T09:00:00Z"),
            entry("3", "#a", "Moon", "2025-10-10T09:00:00Z"),
            entry("4", "#a", "Sun", "2025-10-10T09:00:00Z"),
        ];
        let usage = most_used_icon(&entries);
        assert_eq!(usage.icon.as_deref(), Some("Sun"));
        assert_eq!(usage.count, 2);

        let reversed: Vec<MoodEntry> = entries.into_iter().rev().collect();
        assert_eq!(most_used_icon(&reversed).icon.as_deref(), Some("Sun"));
    }

    #[test]
    fn icon_ranking_is_idempotent() {
        let entries = vec![
            entry("1", "#a", "Leaf", "2025-10-10T09:00:00Z"),
            entry("2", "#a", "Star", "2025-10-10T09:00:00Z"),
            entry("3", "#a", "Star", "2025-10-10T09:00:00Z"),
        ];
        let first = most_used_icon(&entries);
        assert_eq!(first, most_used_icon(&entries));
        assert_eq!(first.icon.as_deref(), Some("Star"));
    }

    #[test]
    fn unknown_icon_still_wins_but_renders_as_fallback() {
        let entries = vec![entry("1", "#a", "Unicorn", "2025-10-10T09:00:00Z")];
        let usage = most_used_icon(&entries);
        assert_eq!(usage.icon.as_deref(), Some("Unicorn"));
        assert_eq!(usage.handle().icon(), MoodIcon::Circle);
    }

    // ── report ──────────────────────────────────────────────────────────

    #[test]
    fn report_is_idempotent() {
        let entries = vec![
            entry("1", "#a", "Sun", "2025-10-13T09:00:00+09:00"),
            entry("2", "#b", "Zap", "2025-10-14T22:00:00+09:00"),
        ];
        let first = StatsReport::compute(&entries, today(), LabelLocale::Ja).unwrap();
        let second = StatsReport::compute(&entries, today(), LabelLocale::Ja).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total_entries, 2);
        assert_eq!(first.streak, summary(2, 2, 2));
        assert_eq!(first.generated_for, today().date_naive());
    }

    #[test]
    fn report_rejects_date_that_disagrees_with_timestamp() {
        let mut bad = entry("bad", "#a", "Sun", "2025-10-14T10:00:00+09:00");
        bad.date = NaiveDate::from_ymd_opt(2025, 10, 12).unwrap();
        let entries = vec![entry("ok", "#a", "Sun", "2025-10-14T09:00:00+09:00"), bad];

        let err = StatsReport::compute(&entries, today(), LabelLocale::Ja).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MalformedEntry);
        assert_eq!(err.entry_id, "bad");
    }

    #[test]
    fn report_over_empty_snapshot() {
        let report = StatsReport::compute(&[], today(), LabelLocale::En).unwrap();
        assert_eq!(report.total_entries, 0);
        assert!(report.colors.is_empty());
        assert_eq!(report.weekly_trend.len(), 7);
        assert_eq!(report.streak, StreakSummary::default());
        assert_eq!(report.most_used_icon, IconUsage::none());
        assert_eq!(report.most_used_glyph, MoodIcon::Circle);
    }

    #[test]
    fn parses_label_locales() {
        assert_eq!("ja".parse::<LabelLocale>().unwrap(), LabelLocale::Ja);
        assert_eq!("EN".parse::<LabelLocale>().unwrap(), LabelLocale::En);
        assert!("fr".parse::<LabelLocale>().is_err());
    }
}
