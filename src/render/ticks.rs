//! Axis labels.
//!
//! Every bin block is prefixed by a fixed-width axis column: either a tick
//! (edge value + `_`) or blank padding.  The width depends only on the
//! [`TickFormat`], never on the values, so all rows line up.

use crate::core::{
    config::TickFormat,
    constants::{NO_TICK_MARK, TICK_MARK},
};

/// Text columns of an engineering label, trailing space included.
const ENGINEERING_WIDTH: usize = 9;
/// Text columns of a scientific label, trailing space included.
const SCIENTIFIC_WIDTH: usize = 10;

/// `% .2e`-style scientific notation: sign slot, two decimals, signed
/// two-digit exponent.  Non-finite values are right-aligned to the same width.
#[must_use]
pub fn sci(value: f64) -> String {
    if !value.is_finite() {
        let text = if value.is_nan() {
            "nan"
        } else if value > 0.0 {
            "inf"
        } else {
            "-inf"
        };
        return format!("{text:>9}");
    }
    let raw = format!("{value:.2e}");
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if mantissa.starts_with('-') { "" } else { " " };
    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{sign}{mantissa}e{exp_sign}{:02}", exp.unsigned_abs())
}

/// Power of ten (multiple of 3) that brings the largest edge into `[1, 1000)`.
fn shared_exponent(edges: &[f64]) -> i32 {
    let max_abs = edges
        .iter()
        .filter(|e| e.is_finite())
        .fold(0.0_f64, |m, e| m.max(e.abs()));
    if max_abs < f64::MIN_POSITIVE || (1.0..1000.0).contains(&max_abs) {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation)]
    let decade = max_abs.log10().floor() as i32;
    decade.div_euclid(3) * 3
}

/// [`shared_exponent`], bumped once more if the largest mantissa would
/// round up to 1000 in the three printed decimals.
fn label_exponent(edges: &[f64]) -> i32 {
    let exp = shared_exponent(edges);
    let max_abs = edges
        .iter()
        .filter(|e| e.is_finite())
        .fold(0.0_f64, |m, e| m.max(e.abs()));
    if (max_abs / 10f64.powi(exp) * 1000.0).round() >= 1_000_000.0 {
        exp + 3
    } else {
        exp
    }
}

/// Formats edge values for one histogram.
#[derive(Clone, Debug)]
pub struct Ticks {
    format: TickFormat,
    exponent: i32,
}

impl Ticks {
    #[must_use]
    pub fn new(format: TickFormat, edges: &[f64]) -> Self {
        let exponent = match format {
            TickFormat::Engineering => label_exponent(edges),
            TickFormat::Scientific => 0,
        };
        Self { format, exponent }
    }

    /// Columns taken by a label, without the tick mark.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        match self.format {
            TickFormat::Engineering => ENGINEERING_WIDTH,
            TickFormat::Scientific => SCIENTIFIC_WIDTH,
        }
    }

    /// Columns taken by the whole axis prefix of a row.
    #[inline]
    #[must_use]
    pub const fn axis_width(&self) -> usize {
        self.width() + TICK_MARK.len()
    }

    #[inline]
    #[must_use]
    pub const fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Edge value as printed on the axis (no tick mark).
    #[must_use]
    pub fn label(&self, edge: f64) -> String {
        match self.format {
            TickFormat::Engineering => {
                let scaled = edge / 10f64.powi(self.exponent);
                format!("{scaled:>8.3} ")
            }
            TickFormat::Scientific => format!("{} ", sci(edge)),
        }
    }

    pub fn push_tick(&self, buf: &mut String, edge: f64) {
        buf.push_str(&self.label(edge));
        buf.push_str(TICK_MARK);
    }

    pub fn push_blank(&self, buf: &mut String) {
        buf.extend(std::iter::repeat_n(' ', self.width()));
        buf.push_str(NO_TICK_MARK);
    }

    /// ` ×1e<exp>` when edges are printed scaled, otherwise nothing.
    #[must_use]
    pub fn annotation(&self) -> Option<String> {
        (self.exponent != 0).then(|| format!(" \u{d7}1e{}", self.exponent))
    }
}
