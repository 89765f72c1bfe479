// In: src/plot.rs

//! Terminal visualization of a run: two stacked character panels, original
//! signal above, reconstruction below.
//!
//! Everything here renders into plain `String`s so it can be unit tested
//! without a terminal. Each panel buckets the samples into columns and fills
//! the vertical span between the bucket's min and max, which keeps fast
//! oscillations visible even when thousands of samples share one column.

use crate::harness::RunOutcome;

const FILL: char = '#';
const BLANK: char = ' ';

/// Renders one signal as a `width x height` character panel with a caption.
pub fn render_panel(caption: &str, samples: &[f32], width: usize, height: usize) -> String {
    let width = width.max(1);
    let height = height.max(1);

    if samples.is_empty() {
        return format!("{}: (empty signal)\n", caption);
    }

    let (mut lo, mut hi) = value_range(samples);
    if hi - lo < f32::EPSILON {
        // Flat signal: open the band so it draws mid-panel instead of
        // dividing by zero.
        lo -= 0.5;
        hi += 0.5;
    }

    let columns = bucket_extents(samples, width);
    let span = hi - lo;
    let mut out = String::with_capacity((width + 8) * (height + 2));
    out.push_str(&format!(
        "{} ({} samples, range [{:.3}, {:.3}])\n",
        caption,
        samples.len(),
        lo,
        hi
    ));

    for row in 0..height {
        // Row 0 is the top band of the value range.
        let band_hi = hi - span * row as f32 / height as f32;
        let band_lo = hi - span * (row + 1) as f32 / height as f32;
        for &(col_lo, col_hi) in &columns {
            let hit = col_hi >= band_lo && col_lo < band_hi + f32::EPSILON;
            out.push(if hit { FILL } else { BLANK });
        }
        out.push('\n');
    }
    out
}

/// Renders the stacked original/reconstruction pair for a finished run.
pub fn render_outcome(outcome: &RunOutcome, width: usize, height: usize) -> String {
    let mut out = render_panel("original", &outcome.original, width, height);
    out.push('\n');
    out.push_str(&render_panel(
        "reconstructed",
        &outcome.reconstructed,
        width,
        height,
    ));
    out
}

fn value_range(samples: &[f32]) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &v in samples {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}

/// Splits the samples into `width` contiguous buckets (or fewer when there
/// are fewer samples than columns) and records each bucket's (min, max).
fn bucket_extents(samples: &[f32], width: usize) -> Vec<(f32, f32)> {
    let columns = width.min(samples.len());
    (0..columns)
        .map(|c| {
            let start = c * samples.len() / columns;
            let end = ((c + 1) * samples.len() / columns).max(start + 1);
            value_range(&samples[start..end])
        })
        .collect()
}
