//! Case-insensitive substring search over decoded caption text.
//!
//! Matching happens on the *decoded* text, so searching for `&` finds `&amp;` in the raw
//! payload, and highlight offsets always point into the decoded string.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::subtitles::{CaptionEntry, SubtitleCollection};

/// One entry that survived the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    /// Position of the entry in the unfiltered collection.
    pub index: usize,
    pub entry: &'a CaptionEntry,
    /// Decoded text the spans refer to.
    pub text: String,
    /// Byte ranges of every match in `text`, left to right, non-overlapping.
    pub spans: Vec<Range<usize>>,
}

impl SearchHit<'_> {
    /// Render `text` with each span wrapped in `open`/`close` (e.g. `<mark>`/`</mark>`).
    pub fn marked(&self, open: &str, close: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + self.spans.len() * (open.len() + close.len()));
        let mut pos = 0;
        for span in &self.spans {
            out.push_str(&self.text[pos..span.start]);
            out.push_str(open);
            out.push_str(&self.text[span.clone()]);
            out.push_str(close);
            pos = span.end;
        }
        out.push_str(&self.text[pos..]);
        out
    }
}

/// The filtered, highlight-annotated view of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a> {
    /// The trimmed term, or `None` when the search was empty.
    pub term: Option<String>,
    pub hits: Vec<SearchHit<'a>>,
}

impl SearchResult<'_> {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The visible entries as a new collection, in original order.
    pub fn visible(&self) -> SubtitleCollection {
        self.hits.iter().map(|hit| hit.entry.clone()).collect()
    }
}

/// Filter `collection` down to entries whose decoded text contains `term`, ignoring case.
///
/// The term is trimmed first; an empty term keeps every entry and reports no spans.
pub fn filter<'a>(collection: &'a SubtitleCollection, term: &str) -> SearchResult<'a> {
    let term = term.trim();
    if term.is_empty() {
        let hits = collection
            .iter()
            .enumerate()
            .map(|(index, entry)| SearchHit {
                index,
                entry,
                text: entry.decoded_text().into_owned(),
                spans: Vec::new(),
            })
            .collect();
        return SearchResult { term: None, hits };
    }

    let matcher = Matcher::new(term);
    let hits = collection
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let text = entry.decoded_text();
            let spans = matcher.spans(&text);
            if spans.is_empty() {
                return None;
            }
            Some(SearchHit {
                index,
                entry,
                text: text.into_owned(),
                spans,
            })
        })
        .collect();

    SearchResult {
        term: Some(term.to_owned()),
        hits,
    }
}

enum Matcher<'t> {
    Regex(Regex),
    /// Terms too large for the regex size limit are scanned char by char.
    Folded(&'t str),
}

impl<'t> Matcher<'t> {
    fn new(term: &'t str) -> Self {
        match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Self::Regex(re),
            Err(err) => {
                debug!(term_len = term.len(), error = %err, "search term too large for regex, scanning");
                Self::Folded(term)
            }
        }
    }

    fn spans(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            Self::Regex(re) => re.find_iter(text).map(|m| m.range()).collect(),
            Self::Folded(term) => folded_spans(text, term),
        }
    }
}

/// Leftmost, non-overlapping case-insensitive matches of `term` in `text`, as byte ranges
/// into `text`.
fn folded_spans(text: &str, term: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        match folded_prefix_len(&text[pos..], term) {
            Some(len) => {
                spans.push(pos..pos + len);
                pos += len;
            }
            None => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    spans
}

/// Byte length of the prefix of `text` that equals `term` ignoring case, if any.
fn folded_prefix_len(text: &str, term: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    let mut end = 0;
    for want in term.chars() {
        let (at, got) = chars.next()?;
        if !got.to_lowercase().eq(want.to_lowercase()) {
            return None;
        }
        end = at + got.len_utf8();
    }
    Some(end)
}
