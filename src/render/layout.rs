//! Whole-histogram layout.
//!
//! ### Workflow
//! 1. [`HistFormatter::new`] validates the edges and plans how many lines
//!    every bin gets (the row budget).  This depends on the edges and the
//!    line budget only, never on counts.
//! 2. [`HistFormatter::format`] derives the symbol scale from the counts,
//!    then assembles title, axis header, one block per bin and the optional
//!    legend / summary into a single string.
//!
//! The line budget is a target, not a guarantee: flooring per-bin budgets and
//! the one-line minimum can make the result a few lines shorter or longer.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    core::{
        config::RenderConfig,
        constants::{AXIS_ORIGIN, LABEL_WIDTH, LEGEND_INDENT, ROUNDING_GUARD, SUMMARY_LINES},
        error::{ConfigError, HistError},
        stats::{Summary, bin_centers},
    },
    render::{
        bin_row::BinFormatter,
        cell::Cell,
        ticks::{Ticks, sci},
    },
};

/// Columns taken by one value in a Tot/Avg/Std line, leading space included.
const STAT_WIDTH: usize = 10;

// --- Helpers ---

fn push_spaces(buf: &mut String, n: usize) {
    buf.extend(std::iter::repeat_n(' ', n));
}

/// Centre `text` in `width` display columns, clipping it if it is too long.
fn push_centered(buf: &mut String, text: &str, width: usize) {
    let mut used = 0;
    let mut clipped = String::with_capacity(text.len());
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        clipped.push(ch);
        used += w;
    }
    let pad = width - used;
    push_spaces(buf, pad / 2);
    buf.push_str(&clipped);
    push_spaces(buf, pad - pad / 2);
}

fn validate_edges(edges: &[f64]) -> Result<(), ConfigError> {
    if edges.len() < 2 {
        return Err(ConfigError::TooFewEdges(edges.len()));
    }
    if let Some(index) = edges.iter().position(|e| !e.is_finite()) {
        return Err(ConfigError::NonFiniteEdge { index });
    }
    for (i, w) in edges.windows(2).enumerate() {
        if w[1] <= w[0] {
            return Err(ConfigError::NonIncreasingEdges {
                index: i + 1,
                low: w[0],
                high: w[1],
            });
        }
    }
    Ok(())
}

/// Copy the counts, checking their shape and zeroing NaNs.
fn sanitize_counts<S: AsRef<[f64]>>(
    counts: &[S],
    bins: usize,
) -> Result<Vec<Vec<f64>>, ConfigError> {
    if counts.is_empty() {
        return Err(ConfigError::NoSeries);
    }
    counts
        .iter()
        .enumerate()
        .map(|(series, c)| {
            let c = c.as_ref();
            if c.len() == bins {
                Ok(c.iter().map(|v| if v.is_nan() { 0.0 } else { *v }).collect())
            } else {
                Err(ConfigError::LengthMismatch {
                    series,
                    expected: bins,
                    got: c.len(),
                })
            }
        })
        .collect()
}

/// Lines available to the bins once title, axis header and footer are reserved.
#[must_use]
pub fn usable_rows(config: &RenderConfig) -> usize {
    let mut reserved = 1;
    if !config.title.is_empty() {
        reserved += 1;
    }
    if config.summary {
        reserved += SUMMARY_LINES;
    } else if config.has_labels() {
        reserved += 1;
    }
    config.lines.saturating_sub(reserved).max(1)
}

/// Lines per bin: proportional to bin width, or one each.  Never below 1.
#[must_use]
pub fn row_budget(edges: &[f64], config: &RenderConfig) -> Vec<usize> {
    let widths: Vec<f64> = edges.windows(2).map(|w| w[1] - w[0]).collect();
    let Some((first, last)) = edges.first().zip(edges.last()) else {
        return Vec::new();
    };

    let mut line_scale = if config.scale_bin_width {
        #[allow(clippy::cast_precision_loss)]
        let rows = usable_rows(config) as f64;
        (last - first) / rows * ROUNDING_GUARD
    } else {
        widths.iter().copied().fold(0.0, f64::max)
    };
    if !(line_scale.is_finite() && line_scale > 0.0) {
        log::debug!("degenerate line scale {line_scale}, using 1");
        line_scale = 1.0;
    }

    widths
        .iter()
        .map(|w| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let lines = (w / line_scale).floor().max(0.0) as usize;
            lines.max(1)
        })
        .collect()
}

/// Symbol scale plus the value the axis header announces for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolScale {
    /// Counts per character cell (per line in count-area mode).
    pub per_cell: f64,
    /// Aggregate content of the bin that fills the width, or the override.
    pub peak: f64,
}

/// Formats histograms sharing one set of bin edges and one configuration.
#[derive(Clone, Debug)]
pub struct HistFormatter {
    edges: Vec<f64>,
    config: RenderConfig,
    ticks: Ticks,
    bin_lines: Vec<usize>,
}

impl HistFormatter {
    pub fn new(edges: &[f64], config: RenderConfig) -> Result<Self, ConfigError> {
        validate_edges(edges)?;
        let ticks = Ticks::new(config.tick_format, edges);
        let bin_lines = row_budget(edges, &config);
        log::debug!(
            "{} bins over {} planned lines, tick exponent {}",
            bin_lines.len(),
            bin_lines.iter().sum::<usize>(),
            ticks.exponent()
        );
        Ok(Self {
            edges: edges.to_vec(),
            config,
            ticks,
            bin_lines,
        })
    }

    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn bin_lines(&self) -> &[usize] {
        &self.bin_lines
    }

    /// Cells available right of the axis.
    #[inline]
    #[must_use]
    pub fn hist_width(&self) -> usize {
        self.config
            .columns
            .saturating_sub(self.ticks.axis_width())
            .max(1)
    }

    /// Derive the symbol scale from sanitized counts (`counts[series][bin]`).
    #[must_use]
    pub fn symbol_scale(&self, counts: &[Vec<f64>]) -> SymbolScale {
        let aggregate = |bin: usize| {
            let values = counts.iter().map(|c| c[bin]);
            if self.config.stack {
                values.sum::<f64>()
            } else {
                values.fold(f64::NEG_INFINITY, f64::max)
            }
        };

        let mut widest = (0.0, 0.0);
        for (bin, &lines) in self.bin_lines.iter().enumerate() {
            let total = aggregate(bin);
            #[allow(clippy::cast_precision_loss)]
            let content = if self.config.count_area {
                total / lines as f64
            } else {
                total
            };
            if content > widest.0 {
                widest = (content, total);
            }
        }

        let (content, peak) = match self.config.max_count {
            Some(m) => (m, m),
            None => widest,
        };
        #[allow(clippy::cast_precision_loss)]
        let mut per_cell = content / self.hist_width() as f64 * ROUNDING_GUARD;
        if !(per_cell.is_finite() && per_cell > 0.0) {
            log::debug!("degenerate symbol scale {per_cell}, using 1");
            per_cell = 1.0;
        }
        SymbolScale { per_cell, peak }
    }

    /// Render one histogram.  `counts` holds one slice of bin contents per series.
    pub fn format<S: AsRef<[f64]>>(&self, counts: &[S]) -> Result<String, HistError> {
        let bins = self.bin_lines.len();
        let counts = sanitize_counts(counts, bins)?;
        let scale = self.symbol_scale(&counts);
        log::debug!(
            "{} series, {:.4} counts per cell, peak {}",
            counts.len(),
            scale.per_cell,
            scale.peak
        );

        let mut out = String::new();
        if !self.config.title.is_empty() {
            push_centered(&mut out, &self.config.title, self.config.columns);
            out.push('\n');
        }

        let integral = counts
            .iter()
            .flatten()
            .chain(std::iter::once(&scale.peak))
            .all(|c| c.fract().abs() < f64::EPSILON);
        self.push_header(&mut out, scale.peak, integral);

        let formatter = BinFormatter::new(
            &self.config,
            &self.ticks,
            counts.len(),
            scale.per_cell,
            self.hist_width(),
        );
        let mut bin_counts = Vec::with_capacity(counts.len());
        for (bin, &lines) in self.bin_lines.iter().enumerate() {
            bin_counts.clear();
            bin_counts.extend(counts.iter().map(|c| c[bin]));
            formatter.format_bin(
                &mut out,
                self.edges[bin],
                self.edges[bin + 1],
                &bin_counts,
                lines,
            )?;
        }

        if self.config.summary {
            self.push_summary(&mut out, &counts, false)?;
        } else if self.config.has_labels() {
            self.push_summary(&mut out, &counts, true)?;
        }
        Ok(out)
    }

    /// First tick, optional exponent, peak value flush right over ` ╷`.
    fn push_header(&self, out: &mut String, peak: f64, integral: bool) {
        self.ticks.push_tick(out, self.edges[0]);
        let annotation = self.ticks.annotation().unwrap_or_default();
        out.push_str(&annotation);

        let peak_text = if integral {
            format!("{peak:.0}")
        } else {
            sci(peak).trim_start().to_owned()
        };
        let room = self.hist_width();
        let used = annotation.width() + AXIS_ORIGIN.width();
        if used + peak_text.len() <= room {
            push_spaces(out, room - used - peak_text.len());
            out.push_str(&peak_text);
        } else {
            push_spaces(out, room.saturating_sub(used));
        }
        out.push_str(AXIS_ORIGIN);
        out.push('\n');
    }

    /// Legend line, then Tot/Avg/Std unless `legend_only`.
    fn push_summary(
        &self,
        out: &mut String,
        counts: &[Vec<f64>],
        legend_only: bool,
    ) -> Result<(), HistError> {
        let composing = self.config.composes(counts.len());
        let mut legend = String::new();
        let mut widths = Vec::with_capacity(counts.len());
        for i in 0..counts.len() {
            let style = self.config.style(i);
            let label = self.config.label(i);
            let label_width = label.width().max(LABEL_WIDTH);

            legend.push(' ');
            Cell::new(
                style.symbol,
                style.fg,
                style.bg,
                self.config.use_color,
                composing,
            )?
            .render_into(&mut legend, true);
            legend.push(' ');
            legend.push_str(label);
            push_spaces(&mut legend, label_width - label.width());
            widths.push(3 + label_width);
        }

        let pad = self
            .config
            .columns
            .saturating_sub(LEGEND_INDENT + widths.iter().sum::<usize>())
            / 2;
        push_spaces(out, pad + LEGEND_INDENT);
        out.push_str(&legend);
        out.push('\n');
        if legend_only {
            return Ok(());
        }

        let centers = bin_centers(&self.edges);
        let summaries: Vec<Summary> = counts.iter().map(|c| Summary::of(&centers, c)).collect();
        let lines: [(&str, fn(&Summary) -> f64); 3] = [
            ("Tot:", |s| s.total),
            ("Avg:", |s| s.mean),
            ("Std:", |s| s.std),
        ];
        for (name, value) in lines {
            push_spaces(out, pad);
            out.push_str(name);
            for (summary, width) in summaries.iter().zip(&widths) {
                out.push(' ');
                out.push_str(&sci(value(summary)));
                push_spaces(out, width.saturating_sub(STAT_WIDTH));
            }
            out.push('\n');
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(columns: usize, lines: usize) -> crate::core::config::RenderConfigBuilder {
        RenderConfig::builder()
            .columns(columns)
            .lines(lines)
            .use_color(false)
    }

    #[test]
    fn uniform_bins_get_one_line_each_when_space_is_tight() {
        let cfg = plain(20, 6).build().unwrap();
        assert_eq!(row_budget(&[0.0, 1.0, 2.0, 3.0, 4.0], &cfg), vec![1, 1, 1, 1]);
    }

    #[test]
    fn wide_bins_get_proportionally_more_lines() {
        let cfg = plain(40, 7).build().unwrap();
        assert_eq!(row_budget(&[0.0, 1.0, 3.0, 4.0], &cfg), vec![1, 3, 1]);
    }

    #[test]
    fn uniform_rows_force_one_line_per_bin() {
        let cfg = plain(40, 50).scale_bin_width(false).build().unwrap();
        assert_eq!(row_budget(&[0.0, 1.0, 3.0, 4.0], &cfg), vec![1, 1, 1]);
    }

    #[test]
    fn title_and_summary_reserve_lines() {
        let cfg = plain(40, 10).title("t").summary(true).build().unwrap();
        assert_eq!(usable_rows(&cfg), 4);
        let cfg = plain(40, 10).labels(["a"]).build().unwrap();
        assert_eq!(usable_rows(&cfg), 8);
        // never below one line
        let cfg = plain(40, 3).summary(true).build().unwrap();
        assert_eq!(usable_rows(&cfg), 1);
    }

    #[test]
    fn edges_must_increase_strictly() {
        let cfg = plain(40, 10).build().unwrap();
        assert!(matches!(
            HistFormatter::new(&[0.0, 2.0, 1.0], cfg.clone()),
            Err(ConfigError::NonIncreasingEdges { index: 2, .. })
        ));
        assert!(matches!(
            HistFormatter::new(&[0.0, 0.0], cfg.clone()),
            Err(ConfigError::NonIncreasingEdges { index: 1, .. })
        ));
        assert!(matches!(
            HistFormatter::new(&[1.0], cfg.clone()),
            Err(ConfigError::TooFewEdges(1))
        ));
        assert!(matches!(
            HistFormatter::new(&[0.0, f64::NAN], cfg),
            Err(ConfigError::NonFiniteEdge { index: 1 })
        ));
    }

    #[test]
    fn counts_must_match_the_bins() {
        let f = HistFormatter::new(&[0.0, 1.0, 2.0], plain(40, 10).build().unwrap()).unwrap();
        assert!(matches!(
            f.format(&[vec![1.0, 2.0], vec![1.0]]),
            Err(HistError::Config(ConfigError::LengthMismatch {
                series: 1,
                expected: 2,
                got: 1
            }))
        ));
        assert!(matches!(
            f.format::<Vec<f64>>(&[]),
            Err(HistError::Config(ConfigError::NoSeries))
        ));
    }

    #[test]
    fn symbol_scale_fills_the_width_with_the_peak() {
        let f = HistFormatter::new(&[0.0, 1.0, 2.0, 3.0, 4.0], plain(20, 6).build().unwrap())
            .unwrap();
        let s = f.symbol_scale(&[vec![5.0, 3.0, 0.0, 8.0]]);
        assert!((s.per_cell - 8.0 / 10.0 * ROUNDING_GUARD).abs() < 1e-12);
        assert!((s.peak - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stacking_sums_and_overlay_takes_the_max() {
        let edges = [0.0, 1.0, 2.0];
        let counts = [vec![2.0, 4.0], vec![6.0, 1.0]];
        let stacked = HistFormatter::new(&edges, plain(30, 4).stack(true).build().unwrap())
            .unwrap()
            .symbol_scale(&counts);
        assert!((stacked.peak - 8.0).abs() < f64::EPSILON);
        let overlaid = HistFormatter::new(&edges, plain(30, 4).build().unwrap())
            .unwrap()
            .symbol_scale(&counts);
        assert!((overlaid.peak - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_counts_fall_back_to_unit_scale() {
        let f = HistFormatter::new(&[0.0, 1.0], plain(30, 4).build().unwrap()).unwrap();
        let s = f.symbol_scale(&[vec![0.0]]);
        assert!((s.per_cell - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn override_replaces_the_peak() {
        let cfg = plain(30, 4).max_count(100.0).build().unwrap();
        let f = HistFormatter::new(&[0.0, 1.0], cfg).unwrap();
        let s = f.symbol_scale(&[vec![5.0]]);
        assert!((s.peak - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn header_puts_the_peak_over_the_axis_origin() {
        let f = HistFormatter::new(&[0.0, 1.0, 2.0, 3.0, 4.0], plain(20, 6).build().unwrap())
            .unwrap();
        let out = f.format(&[vec![5.0, 3.0, 0.0, 8.0]]).unwrap();
        let header = out.lines().next().unwrap();
        assert_eq!(header, "   0.000 _       8 \u{2577}");
    }

    #[test]
    fn title_is_centered_and_clipped() {
        let mut s = String::new();
        push_centered(&mut s, "abc", 8);
        assert_eq!(s, "  abc   ");
        s.clear();
        push_centered(&mut s, "abcdefgh", 4);
        assert_eq!(s, "abcd");
    }
}
