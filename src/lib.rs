//! `subgrab`: fetch time-coded video captions, search them, and export them.
//!
//! This crate provides:
//! - Video identifier extraction and validation
//! - A fetch session over a pluggable captioning service
//! - The in-memory subtitle model with HTML entity decoding
//! - Case-insensitive search with highlight spans
//! - Plain-text and SRT export, as strings or streamed to a writer
//!
//! The library is UI-agnostic: a front end calls `submit`, `search` and the export functions
//! and renders what comes back.

mod error;

pub use error::{Error, NO_SUBTITLES_MESSAGE, Result};

// High-level API (most consumers should start here).
pub mod session;

// Input parsing.
pub mod video_id;

// Subtitle data model and text handling.
pub mod entities;
pub mod subtitles;
pub mod timestamp;

// Search and highlighting.
pub mod search;

// Export selection and encoder interfaces.
pub mod caption_encoder;
pub mod export;
pub mod export_format;

// Encoders that serialize caption entries into subtitle formats.
pub mod plain_text_encoder;
pub mod srt_encoder;

// Collaborator boundary.
pub mod languages;
pub mod payload;
pub mod service;
pub mod services;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub use export_format::ExportFormat;
pub use session::{FetchSession, FetchState, LoadedSubtitles};
pub use subtitles::{CaptionEntry, SubtitleCollection};
pub use video_id::VideoId;

#[cfg(feature = "http")]
pub use services::http::{HttpCaptionService, HttpServiceConfig};

#[cfg(feature = "logging")]
pub use logging::init as init_logging;
