use std::io::Write;

use crate::Result;
use crate::caption_encoder::CaptionEncoder;
use crate::subtitles::CaptionEntry;
use crate::timestamp::format_srt;

/// A `CaptionEncoder` that writes SubRip (`.srt`) cues.
///
/// Design:
/// - Cues are numbered from 1 in the order they are written.
/// - Every cue, including the last, is followed by a blank line.
/// - There is no header, so closing without entries writes nothing.
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// Sequence number of the next cue.
    next_index: usize,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            next_index: 1,
            closed: false,
        }
    }
}

impl<W: Write> CaptionEncoder for SrtEncoder<W> {
    /// Write a single cue in SRT format.
    fn write_entry(&mut self, entry: &CaptionEntry) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write entry: encoder is already closed",
            ));
        }

        self.w
            .write_all(format_block(self.next_index, entry).as_bytes())?;
        self.next_index += 1;
        self.w.flush()?;

        Ok(())
    }

    /// SRT has no trailer, so closing only flushes. Later calls do nothing.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// One complete SRT cue for `entry` at 1-based position `index`, blank line included.
pub(crate) fn format_block(index: usize, entry: &CaptionEntry) -> String {
    // SRT timestamps use `HH:MM:SS,mmm`.
    let start = format_srt(entry.start_seconds());
    let end = format_srt(entry.end_seconds());

    format!("{index}\n{start} --> {end}\n{}\n\n", entry.decoded_text())
}
