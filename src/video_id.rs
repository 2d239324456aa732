//! Video identifier extraction and validation.
//!
//! Two independent checks live here:
//! - [`extract`] is the single source of truth for the identifier value.
//! - [`is_valid`] is a coarse shape check that only drives user-facing feedback.
//!
//! They disagree on purpose for some inputs (for example a link whose identifier runs past
//! 11 characters passes `is_valid` but fails `extract`), so callers must not use one in place
//! of the other.

use std::fmt;

use regex::Regex;

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| Regex::new($re).expect("identifier pattern must be valid"))
    }};
}

/// Number of characters in a video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// A validated 11-character video identifier drawn from `[A-Za-z0-9_-]`.
///
/// The only way to obtain one is [`extract`], so holding a `VideoId` means the value has
/// already been validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Medium-size preview image for this video.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video identifier from a link or a bare identifier.
///
/// Links are tried first (`youtube.com/watch?v=`, `youtu.be/`, `youtube.com/embed/`,
/// `youtube.com/v/`), then the whole trimmed input as a bare identifier. Only the first marker
/// in the input counts: the text right after it must be a run of exactly 11 allowed
/// characters, otherwise the input is rejected even if a later marker would yield one.
pub fn extract(input: &str) -> Option<VideoId> {
    let marker = regex!(r"youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/");
    if let Some(found) = marker.find(input) {
        let run = regex!(r"^([A-Za-z0-9_-]{11})(?:$|[^A-Za-z0-9_-])");
        return run
            .captures(&input[found.end()..])
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_owned()));
    }

    let trimmed = input.trim();
    if is_bare_id(trimmed) {
        return Some(VideoId(trimmed.to_owned()));
    }

    None
}

/// Coarse shape check for user feedback while typing.
///
/// Accepts a link that starts with one of the known hosts followed by 11 allowed characters
/// (anything may follow), or a bare identifier.
pub fn is_valid(input: &str) -> bool {
    let link = regex!(
        r"^(https?://)?(www\.)?(youtube\.com/(watch\?v=|embed/|v/)|youtu\.be/)[A-Za-z0-9_-]{11}"
    );
    let trimmed = input.trim();
    link.is_match(trimmed) || is_bare_id(trimmed)
}

fn is_bare_id(s: &str) -> bool {
    regex!(r"^[A-Za-z0-9_-]{11}$").is_match(s)
}

/// What a front end should show for the current contents of its input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Nothing typed yet; show nothing.
    Empty,
    /// Recognized link; the identifier can be previewed.
    Valid(VideoId),
    /// Not something we can fetch.
    Invalid,
}

pub fn validation_feedback(input: &str) -> Feedback {
    if input.trim().is_empty() {
        return Feedback::Empty;
    }
    if !is_valid(input) {
        return Feedback::Invalid;
    }
    match extract(input) {
        Some(id) => Feedback::Valid(id),
        None => Feedback::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(input: &str) -> Option<String> {
        extract(input).map(|v| v.as_str().to_owned())
    }

    #[test]
    fn extracts_from_every_link_shape() {
        for input in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&list=PLrAXtmRdnEQy",
            "https://youtu.be/dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ?t=30",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "http://youtube.com/v/dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
        ] {
            assert_eq!(id(input).as_deref(), Some("dQw4w9WgXcQ"), "input: {input}");
        }
    }

    #[test]
    fn extracts_bare_identifier_after_trimming() {
        assert_eq!(id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(id("  a_b-c_d-e_f \n").as_deref(), Some("a_b-c_d-e_f"));
    }

    #[test]
    fn rejects_garbage_and_wrong_lengths() {
        assert_eq!(id("not a url"), None);
        assert_eq!(id("dQw4w9WgXc"), None);
        assert_eq!(id("dQw4w9WgXcQQ"), None);
        assert_eq!(id(""), None);
        assert_eq!(id("https://vimeo.com/123456789"), None);
    }

    #[test]
    fn rejects_malformed_identifier_inside_a_good_link() {
        assert_eq!(id("https://youtu.be/dQw4w9WgXc"), None);
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQQ"), None);
        assert_eq!(id("https://www.youtube.com/watch?v=dQw4w9!gXcQ"), None);
    }

    #[test]
    fn later_link_does_not_rescue_a_malformed_first_identifier() {
        let input = "https://youtu.be/dQw4w9WgXcQQ?next=youtu.be/abcdefghijk";
        assert!(is_valid(input));
        assert_eq!(id(input), None);
        assert_eq!(validation_feedback(input), Feedback::Invalid);

        assert_eq!(
            id("https://youtu.be/dQw4w9WgXcQ?next=youtu.be/abcdefghijk").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn coarse_check_is_less_strict_than_extraction() {
        let too_long = "https://youtu.be/dQw4w9WgXcQQ";
        assert!(is_valid(too_long));
        assert_eq!(extract(too_long), None);
    }

    #[test]
    fn coarse_check_requires_a_known_host_prefix() {
        assert!(is_valid("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid("youtu.be/dQw4w9WgXcQ"));
        assert!(is_valid("dQw4w9WgXcQ"));
        assert!(!is_valid("https://m.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(!is_valid("https://youtu.be/short"));
        assert!(!is_valid("not a url"));
    }

    #[test]
    fn extraction_is_deterministic() {
        let input = "https://youtu.be/dQw4w9WgXcQ";
        assert_eq!(extract(input), extract(input));
    }

    #[test]
    fn feedback_tracks_typing() {
        assert_eq!(validation_feedback("   "), Feedback::Empty);
        assert_eq!(validation_feedback("https://youtu"), Feedback::Invalid);
        assert_eq!(validation_feedback("https://youtu.be/dQw4w9WgXcQQ"), Feedback::Invalid);
        match validation_feedback("https://youtu.be/dQw4w9WgXcQ") {
            Feedback::Valid(v) => assert_eq!(
                v.thumbnail_url(),
                "https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg"
            ),
            other => panic!("unexpected feedback: {other:?}"),
        }
    }
}
