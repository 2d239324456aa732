//! Display and SRT time formatting.

/// Format seconds for on-screen display: `H:MM:SS`, or `MM:SS` when under an hour.
///
/// The sub-second part is truncated, not rounded, so a caption at 59.9s shows as `00:59`.
pub fn format_display(seconds: f64) -> String {
    let total_s = whole_seconds(seconds);

    let s = total_s % 60;
    let m = (total_s / 60) % 60;
    let h = total_s / 3600;

    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Format seconds into an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Rounding policy:
/// - We round to the nearest millisecond; collaborators send three-decimal strings and
///   `f64` parsing would otherwise drop a millisecond now and then (`1.001 * 1000.0`).
pub fn format_srt(seconds: f64) -> String {
    let total_ms = millis(seconds);

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    }
}

fn millis(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}
