//! High-level API: one fetch session driving identifier validation, the collaborator call,
//! and the loaded subtitles that search and export read from.
//!
//! The state machine is `Idle → Pending → {Succeeded | Failed}`, and a terminal state accepts
//! a new `submit`. `submit` takes `&mut self`, so the borrow checker already guarantees
//! single-flight: a second fetch can't start while the first future is alive.
//!
//! A failed fetch never clears what an earlier fetch loaded. The loaded result (collection,
//! identifier, language) is built off to the side and swapped in with one assignment, so
//! readers see either the old result or the new one, never a mix.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::export;
use crate::export_format::ExportFormat;
use crate::languages::{self, DEFAULT_LANGUAGE};
use crate::payload::{CaptionRequest, CaptionResponse};
use crate::search::{self, SearchResult};
use crate::service::CaptionService;
use crate::subtitles::{self, SubtitleCollection};
use crate::video_id::{self, VideoId};

/// Shown when the input doesn't look like a link or identifier at all.
pub const INVALID_LINK_MESSAGE: &str = "Invalid link. Enter a valid YouTube link";

/// Shown when the input looks like a link but no identifier could be pulled out of it.
pub const NO_VIDEO_ID_MESSAGE: &str = "Could not extract video ID";

/// Lifecycle of the session's current (or last) fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Pending {
        video_id: VideoId,
        language: String,
    },
    Succeeded {
        video_id: VideoId,
        language: String,
        language_name: String,
        count: usize,
    },
    Failed {
        video_id: VideoId,
        message: String,
    },
}

impl FetchState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Pending { video_id, language } => write!(f, "pending ({video_id}, {language})"),
            Self::Succeeded {
                video_id, count, ..
            } => write!(f, "succeeded ({video_id}, {count} lines)"),
            Self::Failed { video_id, message } => write!(f, "failed ({video_id}): {message}"),
        }
    }
}

/// Everything a successful fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSubtitles {
    pub video_id: VideoId,
    pub language: String,
    pub language_name: String,
    pub subtitles: SubtitleCollection,
}

impl LoadedSubtitles {
    /// One-line header, e.g. `42 lines • Language: EN`.
    pub fn summary(&self) -> String {
        format!(
            "{} lines • Language: {}",
            self.subtitles.len(),
            self.language.to_uppercase()
        )
    }
}

type Observer = Box<dyn FnMut(&FetchState) + Send>;

/// A caption fetch session over a [`CaptionService`].
///
/// Construct once per front end and keep it around; search and export always read the most
/// recent successful fetch.
pub struct FetchSession<S: CaptionService> {
    service: S,
    state: FetchState,
    loaded: Option<Arc<LoadedSubtitles>>,
    observer: Option<Observer>,
}

impl<S: CaptionService> FetchSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: FetchState::Idle,
            loaded: None,
            observer: None,
        }
    }

    /// Call `f` on every state change, including the move into `Pending`.
    ///
    /// Replaces any previously registered callback.
    pub fn on_transition(&mut self, f: impl FnMut(&FetchState) + Send + 'static) {
        self.observer = Some(Box::new(f));
    }

    /// Validate `input`, fetch captions for it in `language`, and load them on success.
    ///
    /// Input problems return `Err` right away and leave the session untouched; the
    /// collaborator is not contacted. Once the fetch starts, every outcome is reported through
    /// the returned terminal state instead: `Succeeded`, or `Failed` with a message fit for
    /// display. An empty `language` means [`DEFAULT_LANGUAGE`].
    pub async fn submit(&mut self, input: &str, language: &str) -> Result<&FetchState> {
        let video_id = validate(input)?;
        let language = match language.trim() {
            "" => DEFAULT_LANGUAGE.to_owned(),
            lang => lang.to_owned(),
        };

        self.transition(FetchState::Pending {
            video_id: video_id.clone(),
            language: language.clone(),
        });

        // Keyed by the extracted identifier; the collaborator accepts a bare one.
        let request = CaptionRequest {
            url: video_id.as_str().to_owned(),
            lang: language.clone(),
        };
        let outcome = match self.service.fetch_captions(&request).await {
            Ok(resp) => accept(resp, &video_id, &language),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(loaded) => {
                let next = FetchState::Succeeded {
                    video_id,
                    language: loaded.language.clone(),
                    language_name: loaded.language_name.clone(),
                    count: loaded.subtitles.len(),
                };
                info!(
                    video_id = %loaded.video_id,
                    language = %loaded.language,
                    count = loaded.subtitles.len(),
                    "subtitles loaded"
                );
                self.loaded = Some(Arc::new(loaded));
                self.transition(next);
            }
            Err(err) => {
                warn!(%video_id, error = %err, "subtitle fetch failed");
                self.transition(FetchState::Failed {
                    video_id,
                    message: err.to_string(),
                });
            }
        }

        Ok(&self.state)
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The most recent successful fetch, shared so callers can hold on to a consistent
    /// snapshot across later fetches.
    pub fn current(&self) -> Option<Arc<LoadedSubtitles>> {
        self.loaded.clone()
    }

    /// Identifier of the loaded subtitles (not of a later failed attempt).
    pub fn video_id(&self) -> Option<&VideoId> {
        self.loaded.as_deref().map(|l| &l.video_id)
    }

    /// Loaded subtitles, or an empty collection before the first success.
    pub fn subtitles(&self) -> &SubtitleCollection {
        self.loaded
            .as_deref()
            .map_or(&subtitles::EMPTY, |l| &l.subtitles)
    }

    pub fn search(&self, term: &str) -> SearchResult<'_> {
        search::filter(self.subtitles(), term)
    }

    pub fn export_plain_text(&self) -> String {
        export::to_plain_text(self.subtitles())
    }

    pub fn export_srt(&self) -> String {
        export::to_srt(self.subtitles())
    }

    pub fn export(&self, format: ExportFormat) -> String {
        export::encode(self.subtitles(), format)
    }

    /// Download name for the loaded subtitles, e.g. `subtitles_<id>.srt`.
    pub fn export_file_name(&self, format: ExportFormat) -> Option<String> {
        self.video_id().map(|id| format.file_name(id))
    }

    /// Write the loaded subtitles into `dir` under their download name.
    pub fn write_export(&self, dir: &Path, format: ExportFormat) -> Result<PathBuf> {
        let loaded = self
            .loaded
            .as_deref()
            .ok_or_else(|| Error::msg("nothing to export: no subtitles loaded"))?;
        export::write_to_dir(dir, &loaded.video_id, &loaded.subtitles, format)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn transition(&mut self, next: FetchState) {
        debug!(from = %self.state, to = %next, "fetch state transition");
        self.state = next;
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }
}

/// Check user input the way the front end reports it: empty, not link-shaped, or
/// link-shaped without an extractable identifier.
pub fn validate(input: &str) -> Result<VideoId> {
    if input.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    if !video_id::is_valid(input) {
        return Err(Error::validation(INVALID_LINK_MESSAGE));
    }
    video_id::extract(input).ok_or_else(|| Error::validation(NO_VIDEO_ID_MESSAGE))
}

fn accept(resp: CaptionResponse, video_id: &VideoId, requested: &str) -> Result<LoadedSubtitles> {
    let language = resp
        .language
        .clone()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| requested.to_owned());
    let language_name = resp
        .language_name
        .clone()
        .unwrap_or_else(|| languages::language_name(&language).to_owned());
    let reported_count = resp.count;

    let subtitles = resp.into_captions()?;

    if let Some(count) = reported_count.filter(|c| *c != subtitles.len()) {
        warn!(
            reported = count,
            received = subtitles.len(),
            "caption count disagrees with entries received"
        );
    }

    Ok(LoadedSubtitles {
        video_id: video_id.clone(),
        language,
        language_name,
        subtitles,
    })
}
