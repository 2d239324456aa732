//! Whole-collection exports.
//!
//! The string functions here are total: they never fail, and the empty collection encodes to
//! an empty string. Their output is byte-for-byte what the streaming encoders produce.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Result;
use crate::caption_encoder::CaptionEncoder;
use crate::export_format::ExportFormat;
use crate::plain_text_encoder::{self, PlainTextEncoder};
use crate::srt_encoder::{self, SrtEncoder};
use crate::subtitles::SubtitleCollection;
use crate::video_id::VideoId;

/// One `[MM:SS] text` line per entry, joined by `\n`, no trailing newline.
pub fn to_plain_text(collection: &SubtitleCollection) -> String {
    collection
        .iter()
        .map(plain_text_encoder::format_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// SubRip cues numbered from 1, each followed by a blank line.
pub fn to_srt(collection: &SubtitleCollection) -> String {
    collection
        .iter()
        .enumerate()
        .map(|(i, entry)| srt_encoder::format_block(i + 1, entry))
        .collect()
}

/// Encode `collection` into `format` as a string.
pub fn encode(collection: &SubtitleCollection, format: ExportFormat) -> String {
    match format {
        ExportFormat::Txt => to_plain_text(collection),
        ExportFormat::Srt => to_srt(collection),
    }
}

/// Stream `collection` into `w` in `format`.
pub fn write_to<W: Write>(collection: &SubtitleCollection, format: ExportFormat, w: W) -> Result<()> {
    // We keep this explicit (no trait objects) like the string functions above.
    match format {
        ExportFormat::Txt => {
            let mut encoder = PlainTextEncoder::new(w);
            let run_res = write_all(&mut encoder, collection);
            merge_run_and_close(run_res, encoder.close())
        }
        ExportFormat::Srt => {
            let mut encoder = SrtEncoder::new(w);
            let run_res = write_all(&mut encoder, collection);
            merge_run_and_close(run_res, encoder.close())
        }
    }
}

/// Write `collection` to `dir/subtitles_<id>.<ext>` and return the path.
pub fn write_to_dir(
    dir: &Path,
    video_id: &VideoId,
    collection: &SubtitleCollection,
    format: ExportFormat,
) -> Result<PathBuf> {
    let path = dir.join(format.file_name(video_id));
    let file = File::create(&path)?;
    write_to(collection, format, BufWriter::new(file))?;

    debug!(path = %path.display(), entries = collection.len(), "export written");
    Ok(path)
}

fn write_all<E: CaptionEncoder>(encoder: &mut E, collection: &SubtitleCollection) -> Result<()> {
    for entry in collection {
        encoder.write_entry(entry)?;
    }
    Ok(())
}

fn merge_run_and_close(run_res: Result<()>, close_res: Result<()>) -> Result<()> {
    match (run_res, close_res) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err),
        (Err(err), _) => Err(err),
    }
}
