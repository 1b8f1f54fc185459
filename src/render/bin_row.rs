//! One bin to text: `rows` lines of axis prefix + a run of composed cells.
//!
//! Every line of a bin carries the same run of cells; only the axis prefix
//! changes (one labelled line, blank padding on the rest).  The run is built
//! and rendered once per bin.

use crate::{
    core::{
        config::{RenderConfig, SeriesStyle},
        error::HistError,
    },
    render::{cell::Cell, ticks::Ticks},
};

/// Counts-per-cell scale for a bin drawn over `rows` lines.
#[inline]
fn effective_scale(scale: f64, rows: usize, count_area: bool) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let s = if count_area { scale * rows as f64 } else { scale };
    if s.is_finite() && s > 0.0 { s } else { 1.0 }
}

/// Formats bins with a fixed symbol scale.
#[derive(Debug)]
pub struct BinFormatter<'a> {
    config: &'a RenderConfig,
    ticks: &'a Ticks,
    styles: Vec<SeriesStyle>,
    composing: bool,
    scale: f64,
    max_width: usize,
}

impl<'a> BinFormatter<'a> {
    /// * `series` -- number of count series per bin
    /// * `scale` -- counts per character cell (per line in count-area mode)
    /// * `max_width` -- cells available right of the axis
    #[must_use]
    pub fn new(
        config: &'a RenderConfig,
        ticks: &'a Ticks,
        series: usize,
        scale: f64,
        max_width: usize,
    ) -> Self {
        Self {
            config,
            ticks,
            styles: (0..series).map(|i| config.style(i)).collect(),
            composing: config.composes(series),
            scale,
            max_width,
        }
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Cells each series contributes to a bin drawn over `rows` lines.
    #[must_use]
    pub fn heights(&self, counts: &[f64], rows: usize) -> Vec<usize> {
        let scale = effective_scale(self.scale, rows, self.config.count_area);
        counts
            .iter()
            .map(|&c| {
                let c = if c.is_finite() { c.max(0.0) } else { 0.0 };
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let h = (c / scale).floor() as usize;
                h.min(self.max_width)
            })
            .collect()
    }

    fn new_cell(&self, style: SeriesStyle) -> Result<Cell, HistError> {
        Cell::new(
            style.symbol,
            style.fg,
            style.bg,
            self.config.use_color,
            self.composing,
        )
    }

    /// Lay the series out side by side (stack) or on top of each other (overlay).
    pub fn cells(&self, heights: &[usize]) -> Result<Vec<Cell>, HistError> {
        let mut line: Vec<Cell> = Vec::new();
        for (&h, &style) in heights.iter().zip(&self.styles) {
            if h == 0 {
                continue;
            }
            if self.config.stack {
                for _ in 0..h {
                    line.push(self.new_cell(style)?);
                }
            } else {
                let reach = h.min(line.len());
                for cell in &mut line[..reach] {
                    cell.add(style.symbol, style.fg, style.bg)?;
                }
                while line.len() < h {
                    line.push(self.new_cell(style)?);
                }
            }
        }
        line.truncate(self.max_width);
        Ok(line)
    }

    /// Append the `rows` lines of one bin to `out`.
    ///
    /// `lower`/`upper` are the bin edges; which one is printed depends on
    /// `label_top_edge`.
    pub fn format_bin(
        &self,
        out: &mut String,
        lower: f64,
        upper: f64,
        counts: &[f64],
        rows: usize,
    ) -> Result<(), HistError> {
        let rows = rows.max(1);
        let heights = self.heights(counts, rows);
        log::trace!("bin [{lower}, {upper}): {rows} rows, heights {heights:?}");

        let mut run = String::new();
        for cell in self.cells(&heights)? {
            cell.render_into(&mut run, true);
        }

        for line in 0..rows {
            let labelled = if self.config.label_top_edge {
                line == 0
            } else {
                line + 1 == rows
            };
            if labelled {
                let edge = if self.config.label_top_edge { lower } else { upper };
                self.ticks.push_tick(out, edge);
            } else {
                self.ticks.push_blank(out);
            }
            out.push_str(&run);
            out.push('\n');
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TickFormat;
    use pretty_assertions::assert_eq;

    fn config(symbols: &str, fg: &str, stack: bool) -> RenderConfig {
        RenderConfig::builder()
            .columns(40)
            .lines(10)
            .symbols(symbols)
            .fg_colors(fg)
            .bg_colors("0")
            .use_color(false)
            .stack(stack)
            .build()
            .unwrap()
    }

    fn ticks() -> Ticks {
        Ticks::new(TickFormat::Engineering, &[0.0, 10.0])
    }

    #[test]
    fn heights_floor_and_scale_with_rows_in_area_mode() {
        let cfg = config("|", "W", false);
        let t = ticks();
        let f = BinFormatter::new(&cfg, &t, 2, 1.0, 30);
        assert_eq!(f.heights(&[5.0, 2.9], 1), vec![5, 2]);
        assert_eq!(f.heights(&[5.0, 2.9], 2), vec![2, 1]);
    }

    #[test]
    fn nan_and_negative_counts_draw_nothing() {
        let cfg = config("|", "W", false);
        let t = ticks();
        let f = BinFormatter::new(&cfg, &t, 2, 1.0, 30);
        assert_eq!(f.heights(&[f64::NAN, -3.0], 1), vec![0, 0]);
    }

    #[test]
    fn zero_scale_falls_back_to_one() {
        let cfg = config("|", "W", false);
        let t = ticks();
        let f = BinFormatter::new(&cfg, &t, 1, 0.0, 30);
        assert_eq!(f.heights(&[4.0], 3), vec![4]);
    }

    #[test]
    fn heights_are_clipped_to_the_available_width() {
        let cfg = config("|", "W", false);
        let t = ticks();
        let f = BinFormatter::new(&cfg, &t, 1, 0.5, 6);
        assert_eq!(f.heights(&[10.0], 1), vec![6]);
    }

    #[test]
    fn stack_lays_series_end_to_end() {
        let cfg = config("|=", "WR", true);
        let t = ticks();
        let f = BinFormatter::new(&cfg, &t, 2, 1.0, 30);
        let cells = f.cells(&[2, 3]).unwrap();
        let glyphs: Vec<char> = cells.iter().map(Cell::base).collect();
        assert_eq!(glyphs, vec!['|', '|', '=', '=', '=']);
    }

    #[test]
    fn overlay_composites_onto_shared_positions() {
        let cfg = config("|=", "WW", false);
        let t = ticks();
        let f = BinFormatter::new(&cfg, &t, 2, 1.0, 30);
        let cells = f.cells(&[2, 4]).unwrap();
        let glyphs: Vec<char> = cells.iter().map(Cell::base).collect();
        assert_eq!(glyphs, vec!['#', '#', '=', '=']);

        let cells = f.cells(&[4, 1]).unwrap();
        let glyphs: Vec<char> = cells.iter().map(Cell::base).collect();
        assert_eq!(glyphs, vec!['#', '|', '|', '|']);
    }

    #[test]
    fn bottom_edge_is_labelled_on_the_last_line() {
        let cfg = config("|", "W", false);
        let t = ticks();
        let f = BinFormatter::new(&cfg, &t, 1, 1.0, 30);
        let mut out = String::new();
        f.format_bin(&mut out, 0.0, 2.0, &[6.0], 2).unwrap();
        let bar = "\u{2502}".repeat(3);
        assert_eq!(
            out,
            format!("{}{bar}\n   2.000 _{bar}\n", " ".repeat(10))
        );
    }

    #[test]
    fn top_edge_is_labelled_on_the_first_line() {
        let cfg = RenderConfig::builder()
            .columns(40)
            .lines(10)
            .symbols("|")
            .use_color(false)
            .label_top_edge(true)
            .build()
            .unwrap();
        let t = ticks();
        let f = BinFormatter::new(&cfg, &t, 1, 1.0, 30);
        let mut out = String::new();
        f.format_bin(&mut out, 0.0, 2.0, &[0.0], 2).unwrap();
        assert_eq!(out, format!("   0.000 _\n{}\n", " ".repeat(10)));
    }
}
