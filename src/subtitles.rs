use std::borrow::Cow;

use serde::Serialize;

use crate::entities;
use crate::timestamp;

/// Duration assumed for a caption that arrives without one.
pub const DEFAULT_DURATION_SECONDS: f64 = 3.0;

/// One caption unit as received from the collaborator.
///
/// Entries are immutable once built; a new fetch replaces the whole collection.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CaptionEntry {
    start_seconds: f64,
    duration_seconds: Option<f64>,
    raw_text: String,
}

impl CaptionEntry {
    /// Build an entry. Negative or non-finite times are clamped to zero. A duration that is
    /// not a positive number is treated as missing, so the entry falls back to
    /// [`DEFAULT_DURATION_SECONDS`].
    pub fn new(start_seconds: f64, duration_seconds: Option<f64>, raw_text: impl Into<String>) -> Self {
        let start_seconds = if start_seconds.is_finite() && start_seconds > 0.0 {
            start_seconds
        } else {
            0.0
        };
        let duration_seconds = duration_seconds.filter(|d| d.is_finite() && *d > 0.0);

        Self {
            start_seconds,
            duration_seconds,
            raw_text: raw_text.into(),
        }
    }

    pub fn start_seconds(&self) -> f64 {
        self.start_seconds
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration_seconds
    }

    /// Text as received, possibly containing HTML character references.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Start plus duration, using [`DEFAULT_DURATION_SECONDS`] when no duration was sent.
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds.unwrap_or(DEFAULT_DURATION_SECONDS)
    }

    /// Text with character references resolved.
    pub fn decoded_text(&self) -> Cow<'_, str> {
        entities::decode(&self.raw_text)
    }

    /// Start time as `H:MM:SS` / `MM:SS`, truncated to whole seconds.
    pub fn formatted_start(&self) -> String {
        timestamp::format_display(self.start_seconds)
    }
}

/// Free-function form of [`CaptionEntry::decoded_text`].
pub fn decode_text(entry: &CaptionEntry) -> Cow<'_, str> {
    entry.decoded_text()
}

/// Free-function form of [`CaptionEntry::formatted_start`].
pub fn formatted_start(entry: &CaptionEntry) -> String {
    entry.formatted_start()
}

/// Caption entries in the order they were received.
///
/// There is no way to reorder or edit entries in place; filtering builds a new collection.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct SubtitleCollection {
    entries: Vec<CaptionEntry>,
}

/// Shared empty collection for callers that have nothing loaded yet.
pub(crate) static EMPTY: SubtitleCollection = SubtitleCollection::new(Vec::new());

impl SubtitleCollection {
    pub const fn new(entries: Vec<CaptionEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CaptionEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaptionEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    /// End time of the last-ending entry, or zero for an empty collection.
    pub fn total_duration(&self) -> f64 {
        self.entries
            .iter()
            .map(CaptionEntry::end_seconds)
            .fold(0.0, f64::max)
    }
}

impl FromIterator<CaptionEntry> for SubtitleCollection {
    fn from_iter<I: IntoIterator<Item = CaptionEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SubtitleCollection {
    type Item = &'a CaptionEntry;
    type IntoIter = std::slice::Iter<'a, CaptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_defaults_to_three_seconds_after_start() {
        let entry = CaptionEntry::new(10.0, None, "hi");
        assert_eq!(entry.end_seconds(), 13.0);

        let entry = CaptionEntry::new(10.0, Some(1.5), "hi");
        assert_eq!(entry.end_seconds(), 11.5);
    }

    #[test]
    fn bad_times_are_normalized() {
        let entry = CaptionEntry::new(-1.0, Some(f64::NAN), "hi");
        assert_eq!(entry.start_seconds(), 0.0);
        assert_eq!(entry.duration_seconds(), None);
    }

    #[test]
    fn zero_duration_falls_back_to_default() {
        let entry = CaptionEntry::new(1.0, Some(0.0), "x");
        assert_eq!(entry.duration_seconds(), None);
        assert_eq!(entry.end_seconds(), 4.0);
    }

    #[test]
    fn accessors_decode_and_format() {
        let entry = CaptionEntry::new(65.7, None, "A &amp; B");
        assert_eq!(decode_text(&entry), "A & B");
        assert_eq!(formatted_start(&entry), "01:05");
        assert_eq!(entry.raw_text(), "A &amp; B");
    }

    #[test]
    fn collection_preserves_insertion_order() {
        let collection: SubtitleCollection = [
            CaptionEntry::new(5.0, None, "second in time, first received"),
            CaptionEntry::new(1.0, None, "first in time"),
        ]
        .into_iter()
        .collect();

        let texts: Vec<&str> = collection.iter().map(CaptionEntry::raw_text).collect();
        assert_eq!(texts, ["second in time, first received", "first in time"]);
        assert_eq!(collection.total_duration(), 8.0);
    }

    #[test]
    fn empty_collection_has_zero_duration() {
        let collection = SubtitleCollection::default();
        assert!(collection.is_empty());
        assert_eq!(collection.total_duration(), 0.0);
    }
}
