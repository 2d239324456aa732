use crate::Result;
use crate::subtitles::CaptionEntry;

/// Streaming sink for caption entries, one format per implementation.
pub trait CaptionEncoder {
    fn write_entry(&mut self, entry: &CaptionEntry) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
