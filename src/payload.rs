//! Wire types for the captioning collaborator.
//!
//! Numbers in caption entries may arrive as JSON numbers or as strings (`"1.250"`), so they
//! are read loosely here and validated in [`CaptionResponse::into_captions`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, NO_SUBTITLES_MESSAGE, Result};
use crate::subtitles::{CaptionEntry, SubtitleCollection};

/// What we ask the collaborator for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionRequest {
    /// The extracted video identifier. The field name is the backend's.
    pub url: String,
    pub lang: String,
}

/// A seconds field that may be a JSON number or a numeric string.
///
/// Anything else (`null`, booleans, a missing field) lands in `Other` so it can be reported as
/// a malformed entry instead of failing the whole body at the JSON layer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Seconds {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for Seconds {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

impl Seconds {
    fn parse(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().ok()?,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    fn raw(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Other(v) => v.to_string(),
        }
    }
}

/// One caption entry as sent by the collaborator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawCaption {
    #[serde(default)]
    pub start: Seconds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dur: Option<Seconds>,
    #[serde(default)]
    pub text: String,
}

/// The collaborator's response body, success or failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub subtitles: Vec<RawCaption>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub language_name: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CaptionResponse {
    /// Validate the response and turn it into a collection.
    ///
    /// - `success: false` fails with the collaborator's message, or the generic one.
    /// - `success: true` with no entries fails with [`Error::EmptyResult`].
    /// - Any entry whose `start` is not a non-negative number fails the whole response with
    ///   [`Error::MalformedPayload`]; we never silently drop entries.
    /// - A `dur` that doesn't parse, or is zero, is treated as missing.
    pub fn into_captions(self) -> Result<SubtitleCollection> {
        if !self.success {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| NO_SUBTITLES_MESSAGE.to_owned());
            return Err(Error::Collaborator(message));
        }

        if self.subtitles.is_empty() {
            return Err(Error::EmptyResult);
        }

        self.subtitles
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let start = raw
                    .start
                    .parse()
                    .filter(|s| *s >= 0.0)
                    .ok_or_else(|| Error::MalformedPayload {
                        index,
                        value: raw.start.raw(),
                    })?;
                let dur = raw.dur.as_ref().and_then(Seconds::parse);
                Ok(CaptionEntry::new(start, dur, raw.text))
            })
            .collect::<Result<Vec<_>>>()
            .map(SubtitleCollection::new)
    }
}
