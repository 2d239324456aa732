use std::io::Write;

use crate::Result;
use crate::caption_encoder::CaptionEncoder;
use crate::subtitles::CaptionEntry;

/// A `CaptionEncoder` that writes `[MM:SS] text` lines.
///
/// Lines are separated by a single newline with no trailing newline, so the streamed output
/// matches [`crate::export::to_plain_text`] exactly.
pub struct PlainTextEncoder<W: Write> {
    /// The underlying writer we stream lines into.
    w: W,

    /// Whether the next line is the first one (no separator before it).
    first: bool,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> PlainTextEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            first: true,
            closed: false,
        }
    }
}

impl<W: Write> CaptionEncoder for PlainTextEncoder<W> {
    fn write_entry(&mut self, entry: &CaptionEntry) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write entry: encoder is already closed",
            ));
        }

        if !self.first {
            self.w.write_all(b"\n")?;
        }
        self.first = false;

        self.w.write_all(format_line(entry).as_bytes())?;
        self.w.flush()?;

        Ok(())
    }

    /// Lines are joined, not terminated, so there is nothing left to write here.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// One plain-text line for `entry`, without a line terminator.
pub(crate) fn format_line(entry: &CaptionEntry) -> String {
    format!("[{}] {}", entry.formatted_start(), entry.decoded_text())
}
