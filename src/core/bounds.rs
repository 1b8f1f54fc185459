//! Geometry helpers: sample ranges + terminal size plumbing.

use terminal_size::{Height, Width, terminal_size};

use crate::core::constants::{ASPECT_RATIO, FALLBACK_COLUMNS, FALLBACK_LINES};

/// Inclusive range of every finite sample across all columns, without padding.
///
/// * If there are no finite samples at all the fallback is `(0.0, 1.0)`.
/// * If *all* finite samples are identical we expand by +-0.5 so the bins
///   still have non-zero width.
#[must_use]
pub fn sample_range<S: AsRef<[f64]>>(columns: &[S]) -> (f64, f64) {
    let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);

    for v in columns.iter().flat_map(|c| c.as_ref().iter()) {
        if v.is_finite() {
            low = low.min(*v);
            high = high.max(*v);
        }
    }

    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }

    if (high - low).abs() < f64::EPSILON {
        return (low - 0.5, high + 0.5);
    }

    (low, high)
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(FALLBACK_COLUMNS), Height(FALLBACK_LINES)))
}

/// Lines that keep a constant aspect ratio for `columns`, capped by the
/// terminal height (one line is left for the prompt).
#[must_use]
pub fn default_lines(columns: usize, term_lines: u16) -> usize {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let by_aspect = (columns as f64 / ASPECT_RATIO) as usize + 1;
    by_aspect
        .min(usize::from(term_lines).saturating_sub(1))
        .max(1)
}

/// Convert terminal dimensions into the default `(columns, lines)` budget.
/// The last terminal column is left free so wrapping never kicks in.
#[must_use]
pub fn default_dims((w, h): (u16, u16)) -> (usize, usize) {
    let columns = usize::from(w).saturating_sub(1).max(1);
    (columns, default_lines(columns, h))
}
