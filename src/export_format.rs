use crate::video_id::VideoId;

/// The supported export formats for a subtitle collection.
///
/// `ValueEnum` (behind the `cli` feature) lets the CLI take this directly as a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    /// `[MM:SS] text` lines.
    Txt,

    /// SubRip subtitles.
    Srt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Srt => "srt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain",
            Self::Srt => "text/srt",
        }
    }

    /// Download name for the export of `video_id`, e.g. `subtitles_dQw4w9WgXcQ.srt`.
    pub fn file_name(self, video_id: &VideoId) -> String {
        format!("subtitles_{video_id}.{}", self.extension())
    }
}
