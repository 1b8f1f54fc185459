//! Run-time configuration object + fluent builder.

use crate::core::{
    bounds::{default_dims, default_lines, terminal_geometry},
    color::{Color, parse_cycle},
    constants::{
        ALLOWED_SYMBOLS, COMPOSING_SYMBOLS, DEFAULT_BG_COLORS, DEFAULT_FG_COLORS,
        DEFAULT_SYMBOLS, FALLBACK_COLUMNS, FALLBACK_LINES,
    },
    error::ConfigError,
};

/// How edge values are printed on the axis.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TickFormat {
    /// Fixed-point mantissas sharing one power-of-ten exponent, shown once
    /// in the axis header.
    #[default]
    Engineering,
    /// Every edge in its own `±d.dde±xx` notation.
    Scientific,
}

/// Symbol and colours drawn for one series.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SeriesStyle {
    pub symbol: char,
    pub fg: Color,
    pub bg: Color,
}

impl SeriesStyle {
    #[inline]
    #[must_use]
    pub fn is_composing(&self) -> bool {
        COMPOSING_SYMBOLS.contains(self.symbol)
    }
}

/// Immutable parameters handed to the layout engine.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub symbols: Vec<char>,
    pub fg_colors: Vec<Color>,
    pub bg_colors: Vec<Color>,
    pub stack: bool,
    pub count_area: bool,
    pub scale_bin_width: bool,
    pub tick_format: TickFormat,
    pub label_top_edge: bool,
    pub use_color: bool,
    pub columns: usize,
    pub lines: usize,
    pub title: String,
    pub labels: Vec<String>,
    pub summary: bool,
    pub max_count: Option<f64>,
}

#[inline]
fn cycled<T: Copy>(items: &[T], i: usize, fallback: T) -> T {
    if items.is_empty() {
        fallback
    } else {
        items[i % items.len()]
    }
}

impl RenderConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::new()
    }

    /// Style of series `i`; short cycles repeat.
    #[must_use]
    pub fn style(&self, i: usize) -> SeriesStyle {
        SeriesStyle {
            symbol: cycled(&self.symbols, i, ' '),
            fg: cycled(&self.fg_colors, i, Color::Default),
            bg: cycled(&self.bg_colors, i, Color::Default),
        }
    }

    /// Label of series `i`; an empty label list labels nothing.
    #[must_use]
    pub fn label(&self, i: usize) -> &str {
        if self.labels.is_empty() {
            ""
        } else {
            &self.labels[i % self.labels.len()]
        }
    }

    /// Whether cells of a histogram with `series` series need a compose slot.
    #[must_use]
    pub fn composes(&self, series: usize) -> bool {
        (0..series).any(|i| self.style(i).is_composing())
    }

    /// Whether a legend line is worth printing.
    #[must_use]
    pub fn has_labels(&self) -> bool {
        self.labels.iter().any(|l| !l.is_empty())
    }
}

impl Default for RenderConfig {
    /// Default styling on an 80×30 grid, independent of the real terminal.
    fn default() -> Self {
        let (columns, lines) = default_dims((FALLBACK_COLUMNS, FALLBACK_LINES));
        Self {
            symbols: DEFAULT_SYMBOLS.chars().collect(),
            fg_colors: vec![Color::BrightWhite; 5],
            bg_colors: vec![
                Color::BrightBlack,
                Color::Default,
                Color::Default,
                Color::Default,
                Color::Default,
            ],
            stack: false,
            count_area: true,
            scale_bin_width: true,
            tick_format: TickFormat::default(),
            label_top_edge: false,
            use_color: true,
            columns,
            lines,
            title: String::new(),
            labels: Vec::new(),
            summary: false,
            max_count: None,
        }
    }
}

/// Fluent builder; symbol and colour strings are validated in `build`.
#[derive(Debug, Default)]
pub struct RenderConfigBuilder {
    symbols: Option<String>,
    fg_colors: Option<String>,
    bg_colors: Option<String>,
    stack: bool,
    height_mode: bool,
    uniform_rows: bool,
    tick_format: TickFormat,
    label_top_edge: bool,
    use_color: Option<bool>,
    columns: Option<usize>,
    lines: Option<usize>,
    title: Option<String>,
    labels: Vec<String>,
    summary: bool,
    max_count: Option<f64>,
}

impl RenderConfigBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn symbols(mut self, s: impl Into<String>) -> Self {
        self.symbols = Some(s.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn fg_colors(mut self, c: impl Into<String>) -> Self {
        self.fg_colors = Some(c.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn bg_colors(mut self, c: impl Into<String>) -> Self {
        self.bg_colors = Some(c.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn stack(mut self, on: bool) -> Self {
        self.stack = on;
        self
    }
    /// `true` (default) encodes counts by area, `false` by row length alone.
    #[inline]
    #[must_use]
    pub fn count_area(mut self, on: bool) -> Self {
        self.height_mode = !on;
        self
    }
    /// `true` (default) gives wider bins proportionally more lines.
    #[inline]
    #[must_use]
    pub fn scale_bin_width(mut self, on: bool) -> Self {
        self.uniform_rows = !on;
        self
    }
    #[inline]
    #[must_use]
    pub fn tick_format(mut self, f: TickFormat) -> Self {
        self.tick_format = f;
        self
    }
    #[inline]
    #[must_use]
    pub fn label_top_edge(mut self, on: bool) -> Self {
        self.label_top_edge = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn use_color(mut self, on: bool) -> Self {
        self.use_color = Some(on);
        self
    }
    #[inline]
    #[must_use]
    pub fn columns(mut self, n: usize) -> Self {
        self.columns = Some(n);
        self
    }
    #[inline]
    #[must_use]
    pub fn lines(mut self, n: usize) -> Self {
        self.lines = Some(n);
        self
    }
    #[inline]
    #[must_use]
    pub fn columns_opt(mut self, n: Option<usize>) -> Self {
        if n.is_some() {
            self.columns = n;
        }
        self
    }
    #[inline]
    #[must_use]
    pub fn lines_opt(mut self, n: Option<usize>) -> Self {
        if n.is_some() {
            self.lines = n;
        }
        self
    }
    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }
    #[inline]
    #[must_use]
    pub fn summary(mut self, on: bool) -> Self {
        self.summary = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn max_count(mut self, m: f64) -> Self {
        self.max_count = Some(m);
        self
    }
    #[inline]
    #[must_use]
    pub fn max_count_opt(mut self, m: Option<f64>) -> Self {
        self.max_count = m;
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let symbols: Vec<char> = match self.symbols.as_deref() {
            None => DEFAULT_SYMBOLS.chars().collect(),
            Some("") => vec![' '],
            Some(s) => s.chars().collect(),
        };
        if let Some(&bad) = symbols.iter().find(|c| !ALLOWED_SYMBOLS.contains(**c)) {
            return Err(ConfigError::InvalidSymbol(bad));
        }
        let fg_colors = parse_cycle(self.fg_colors.as_deref().unwrap_or(DEFAULT_FG_COLORS))?;
        let bg_colors = parse_cycle(self.bg_colors.as_deref().unwrap_or(DEFAULT_BG_COLORS))?;

        if let Some(m) = self.max_count {
            if !(m.is_finite() && m > 0.0) {
                return Err(ConfigError::InvalidMaxCount(m));
            }
        }

        let (columns, lines) = match (self.columns, self.lines) {
            (Some(c), Some(l)) => (c, l),
            (columns, lines) => {
                let (term_w, term_h) = terminal_geometry();
                let (dc, _) = default_dims((term_w.0, term_h.0));
                let columns = columns.unwrap_or(dc);
                let lines = lines.unwrap_or_else(|| default_lines(columns, term_h.0));
                (columns, lines)
            }
        };
        if columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }

        let use_color = self.use_color.unwrap_or_else(|| {
            fg_colors
                .iter()
                .chain(bg_colors.iter())
                .any(|c| !c.is_default())
        });

        Ok(RenderConfig {
            symbols,
            fg_colors,
            bg_colors,
            stack: self.stack,
            count_area: !self.height_mode,
            scale_bin_width: !self.uniform_rows,
            tick_format: self.tick_format,
            label_top_edge: self.label_top_edge,
            use_color,
            columns,
            lines,
            title: self.title.unwrap_or_default(),
            labels: self.labels,
            summary: self.summary,
            max_count: self.max_count,
        })
    }
}

/// Ergonomic `?` on a builder chain.
impl From<RenderConfigBuilder> for Result<RenderConfig, ConfigError> {
    fn from(b: RenderConfigBuilder) -> Self {
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized() -> RenderConfigBuilder {
        RenderConfig::builder().columns(40).lines(12)
    }

    #[test]
    fn defaults_follow_the_documented_cycles() {
        let cfg = sized().build().unwrap();
        assert_eq!(cfg.symbols, vec![' ', '|', '=', '/', '\\']);
        assert_eq!(cfg.style(0).fg, Color::BrightWhite);
        assert_eq!(cfg.style(0).bg, Color::BrightBlack);
        assert_eq!(cfg.style(1).bg, Color::Default);
        assert!(cfg.count_area);
        assert!(cfg.scale_bin_width);
        assert!(!cfg.stack);
        assert!(cfg.use_color);
    }

    #[test]
    fn styles_cycle_modulo_their_length() {
        let cfg = sized().symbols("|=").fg_colors("rgb").build().unwrap();
        assert_eq!(cfg.style(2).symbol, '|');
        assert_eq!(cfg.style(3).fg, Color::Red);
        assert_eq!(cfg.style(5).symbol, '=');
    }

    #[test]
    fn use_color_is_inferred_from_the_palette() {
        let plain = sized().fg_colors("0").bg_colors("").build().unwrap();
        assert!(!plain.use_color);
        let forced = sized().fg_colors("0").bg_colors("0").use_color(true).build().unwrap();
        assert!(forced.use_color);
    }

    #[test]
    fn default_config_matches_default_builder_styles() {
        let built = RenderConfig::builder().columns(79).lines(23).build().unwrap();
        let default = RenderConfig::default();
        assert_eq!(default.fg_colors, built.fg_colors);
        assert_eq!(default.bg_colors, built.bg_colors);
        assert_eq!((default.columns, default.lines), (79, 23));
    }

    #[test]
    fn builder_converts_into_a_result() {
        let cfg: Result<RenderConfig, ConfigError> = sized().title("t").into();
        assert_eq!(cfg.unwrap().title, "t");
    }

    #[test]
    fn empty_symbols_draw_blanks() {
        let cfg = sized().symbols("").build().unwrap();
        assert_eq!(cfg.symbols, vec![' ']);
    }

    #[test]
    fn bad_symbol_and_colour_are_rejected() {
        assert!(matches!(
            sized().symbols("|*").build(),
            Err(ConfigError::InvalidSymbol('*'))
        ));
        assert!(matches!(
            sized().fg_colors("Wz").build(),
            Err(ConfigError::Color(_))
        ));
        assert!(matches!(
            sized().max_count(-1.0).build(),
            Err(ConfigError::InvalidMaxCount(_))
        ));
        assert!(matches!(
            RenderConfig::builder().columns(0).lines(5).build(),
            Err(ConfigError::ZeroColumns)
        ));
    }

    #[test]
    fn labels_cycle_and_compose_detection() {
        let cfg = sized().labels(["A", "B"]).symbols("=/").build().unwrap();
        assert_eq!(cfg.label(3), "B");
        assert!(cfg.has_labels());
        assert!(!sized().labels([""]).build().unwrap().has_labels());
        assert!(!cfg.composes(1));
        assert!(cfg.composes(2));
    }
}
