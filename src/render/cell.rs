//! One character position of the histogram grid.
//!
//! A cell is an accumulator: every series whose mark reaches this position
//! calls [`Cell::add`], and the cell folds the marks into at most one base
//! glyph plus one compose glyph.
//!
//! * Same foreground: marks combine. `|` and `=` merge into `#`, diagonals go
//!   to the compose slot where `/` and `\` merge into `X`; any other pair
//!   keeps the newest diagonal.
//! * Different foreground, nonspace mark: the newcomer takes over the base
//!   layer and its colour, then combines as above.
//! * Any non-transparent background overwrites the background.

use crate::core::{
    color::{Color, push_sgr},
    constants::{ALLOWED_SYMBOLS, COMPOSING_SYMBOLS},
    error::HistError,
};

/// Drawn for blank cells with a background, so copy-pasted output keeps
/// the shape of the histogram.
const FULL_BLOCK: char = '\u{2588}';
/// Zero-width combining mark appended when a cell could compose but doesn't.
const COMPOSE_FILLER: &str = "\u{034F}";

#[inline]
fn is_diagonal(symbol: char) -> bool {
    COMPOSING_SYMBOLS.contains(symbol)
}

#[inline]
const fn combine_base(current: char, incoming: char) -> char {
    match (current, incoming) {
        ('|', '=') | ('=', '|') | ('#', '=' | '|') => '#',
        (kept, ' ') => kept,
        (_, newest) => newest,
    }
}

#[inline]
const fn combine_compose(current: char, incoming: char) -> char {
    match (current, incoming) {
        ('/', '\\') | ('\\', '/') => 'X',
        (_, newest) => newest,
    }
}

#[inline]
const fn base_glyph(base: char) -> char {
    match base {
        '|' => '\u{2502}',
        '=' => '\u{2550}',
        '#' => '\u{256A}',
        other => other,
    }
}

#[inline]
const fn compose_glyph(compose: char) -> &'static str {
    match compose {
        '\\' => "\u{20E5}",
        '/' => "\u{20EB}",
        'X' => "\u{20E5}\u{20EB}",
        _ => COMPOSE_FILLER,
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    base: char,
    /// `None`: composition disabled for this bin. `Some(' ')`: enabled, empty.
    compose: Option<char>,
    fg: Color,
    bg: Color,
    use_color: bool,
}

impl Cell {
    /// An empty cell that immediately receives one mark.
    pub fn new(
        symbol: char,
        fg: Color,
        bg: Color,
        use_color: bool,
        composing: bool,
    ) -> Result<Self, HistError> {
        let mut cell = Self {
            base: ' ',
            compose: composing.then_some(' '),
            fg,
            bg,
            use_color,
        };
        cell.add(symbol, fg, bg)?;
        Ok(cell)
    }

    pub fn add(&mut self, symbol: char, fg: Color, bg: Color) -> Result<(), HistError> {
        if !ALLOWED_SYMBOLS.contains(symbol) {
            return Err(HistError::InvalidSymbol(symbol));
        }

        if fg != self.fg && symbol != ' ' {
            // a distinct colour takes over the base layer
            self.base = ' ';
            self.fg = fg;
        }
        if fg == self.fg {
            if is_diagonal(symbol) {
                let current = self.compose.unwrap_or(' ');
                self.compose = Some(combine_compose(current, symbol));
            } else {
                self.base = combine_base(self.base, symbol);
            }
        }

        if !bg.is_default() {
            self.bg = bg;
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn base(&self) -> char {
        self.base
    }

    #[inline]
    #[must_use]
    pub fn compose(&self) -> Option<char> {
        self.compose
    }

    #[inline]
    #[must_use]
    pub fn fg(&self) -> Color {
        self.fg
    }

    #[inline]
    #[must_use]
    pub fn bg(&self) -> Color {
        self.bg
    }

    fn is_blank(&self) -> bool {
        self.base == ' ' && matches!(self.compose, None | Some(' '))
    }

    fn push_color(&self, buf: &mut String, fg: Color, bg: Color) {
        if self.use_color {
            push_sgr(buf, fg, bg);
        }
    }

    /// Append the styled glyph to `buf`.
    pub fn render_into(&self, buf: &mut String, reset: bool) {
        if self.is_blank() && !self.bg.is_default() {
            // block in the background colour, opposite brightness behind it
            // so it stays visible inside a terminal selection
            self.push_color(buf, self.bg, self.bg.complement());
            buf.push(FULL_BLOCK);
        } else {
            self.push_color(buf, self.fg, self.bg);
            buf.push(base_glyph(self.base));
            if let Some(c) = self.compose {
                buf.push_str(compose_glyph(c));
            }
        }
        if reset {
            self.push_color(buf, Color::Default, Color::Default);
        }
    }

    #[must_use]
    pub fn render(&self, reset: bool) -> String {
        let mut out = String::with_capacity(24);
        self.render_into(&mut out, reset);
        out
    }
}
