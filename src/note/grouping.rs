use std::collections::HashMap;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::Note;
use crate::pins::PinnedSet;

pub const PINNED: &str = "pinned";
pub const TODAY: &str = "today";
pub const YESTERDAY: &str = "yesterday";
pub const LAST_7_DAYS: &str = "7";
pub const LAST_30_DAYS: &str = "30";
pub const OLDER: &str = "older";

/// One entry of the category order: a key and its section label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub label: String,
}

impl Category {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// The built-in display order of categories.
pub fn default_category_order() -> Vec<Category> {
    vec![
        Category::new(PINNED, "Pinned"),
        Category::new(TODAY, "Today"),
        Category::new(YESTERDAY, "Yesterday"),
        Category::new(LAST_7_DAYS, "Previous 7 Days"),
        Category::new(LAST_30_DAYS, "Previous 30 Days"),
        Category::new(OLDER, "Older"),
    ]
}

/// Notes partitioned by category key. Order within a group is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedNotes {
    groups: HashMap<String, Vec<Note>>,
}

impl GroupedNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[Note]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Append a note to the group `key`, preserving insertion order.
    pub fn push(&mut self, key: impl Into<String>, note: Note) {
        self.groups.entry(key.into()).or_default().push(note);
    }

    /// Replace a whole group.
    pub fn insert(&mut self, key: impl Into<String>, notes: Vec<Note>) {
        self.groups.insert(key.into(), notes);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Total number of notes across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Category key for an unpinned note created at `created_at`, seen from `now`.
/// Days are calendar days in the local time zone.
pub fn age_category(created_at: DateTime<Utc>, now: DateTime<Utc>) -> &'static str {
    age_category_in(created_at, now, &Local)
}

/// Like [`age_category`], counting calendar days in `tz`.
pub fn age_category_in<Tz: TimeZone>(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> &'static str {
    let days = now
        .with_timezone(tz)
        .date_naive()
        .signed_duration_since(created_at.with_timezone(tz).date_naive())
        .num_days();
    match days {
        i64::MIN..=0 => TODAY,
        1 => YESTERDAY,
        2..=7 => LAST_7_DAYS,
        8..=30 => LAST_30_DAYS,
        _ => OLDER,
    }
}

/// Group notes for the browse view: pinned notes first, the rest by age.
/// Notes within each group are sorted newest first.
pub fn group_notes(notes: &[Note], pinned: &PinnedSet, now: DateTime<Utc>) -> GroupedNotes {
    let mut sorted: Vec<&Note> = notes.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut grouped = GroupedNotes::new();
    for note in sorted {
        let key = if pinned.contains(&note.slug) {
            PINNED
        } else {
            age_category(note.created_at, now)
        };
        grouped.push(key, note.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn make_note(slug: &str, days_ago: i64) -> Note {
        let mut note = Note::new(slug, slug, slug);
        note.created_at = now() - Duration::days(days_ago);
        note
    }

    #[test]
    fn age_category_buckets_by_calendar_day() {
        let age = |days: i64| age_category_in(now() - Duration::days(days), now(), &Utc);
        assert_eq!(age(0), TODAY);
        assert_eq!(age(1), YESTERDAY);
        assert_eq!(age(5), LAST_7_DAYS);
        assert_eq!(age(20), LAST_30_DAYS);
        assert_eq!(age(90), OLDER);
    }

    #[test]
    fn age_category_treats_future_notes_as_today() {
        assert_eq!(
            age_category_in(now() + Duration::days(3), now(), &Utc),
            TODAY
        );
    }

    #[test]
    fn age_category_uses_the_given_zone_calendar() {
        // 02:00 UTC is still the previous evening five hours west of UTC
        let created = Utc.with_ymd_and_hms(2024, 6, 15, 2, 0, 0).unwrap();
        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(age_category_in(created, now(), &Utc), TODAY);
        assert_eq!(age_category_in(created, now(), &west), YESTERDAY);
    }

    #[test]
    fn group_notes_puts_pinned_notes_in_pinned_group() {
        let notes = vec![make_note("a", 0), make_note("b", 40)];
        let mut pinned = PinnedSet::new();
        pinned.insert("b");

        let grouped = group_notes(&notes, &pinned, now());
        assert_eq!(grouped.get(PINNED).map(<[Note]>::len), Some(1));
        assert_eq!(grouped.get(TODAY).map(<[Note]>::len), Some(1));
        assert!(grouped.get(OLDER).is_none());
    }

    #[test]
    fn group_notes_orders_newest_first_within_group() {
        let notes = vec![make_note("old", 6), make_note("new", 3), make_note("mid", 4)];
        let grouped = group_notes(&notes, &PinnedSet::new(), now());

        let slugs: Vec<&str> = grouped
            .get(LAST_7_DAYS)
            .unwrap()
            .iter()
            .map(|n| n.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
    }

    #[test]
    fn empty_grouping_reports_empty() {
        let grouped = group_notes(&[], &PinnedSet::new(), now());
        assert!(grouped.is_empty());
        assert_eq!(grouped.len(), 0);
    }
}
