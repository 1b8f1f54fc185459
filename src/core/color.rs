//! The 17-symbol terminal palette.  No true-colour, no 256-colour: every
//! colour maps onto one of the standard SGR parameters.
//!
//! Codes are single characters out of `0rgbcmykwRGBCMYKW`.  Lower case is the
//! normal variant, upper case the bright one, and `0` is "terminal default"
//! for a foreground and "transparent" for a background.

use std::fmt::{self, Write};

use crate::core::error::ColorError;

/// Every accepted palette code, in display order.
pub const PALETTE: &str = "0rgbcmykwRGBCMYKW";

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    pub fn from_code(code: char) -> Result<Self, ColorError> {
        Ok(match code {
            '0' => Self::Default,
            'k' => Self::Black,
            'r' => Self::Red,
            'g' => Self::Green,
            'y' => Self::Yellow,
            'b' => Self::Blue,
            'm' => Self::Magenta,
            'c' => Self::Cyan,
            'w' => Self::White,
            'K' => Self::BrightBlack,
            'R' => Self::BrightRed,
            'G' => Self::BrightGreen,
            'Y' => Self::BrightYellow,
            'B' => Self::BrightBlue,
            'M' => Self::BrightMagenta,
            'C' => Self::BrightCyan,
            'W' => Self::BrightWhite,
            other => return Err(ColorError::InvalidCode(other)),
        })
    }

    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Default => '0',
            Self::Black => 'k',
            Self::Red => 'r',
            Self::Green => 'g',
            Self::Yellow => 'y',
            Self::Blue => 'b',
            Self::Magenta => 'm',
            Self::Cyan => 'c',
            Self::White => 'w',
            Self::BrightBlack => 'K',
            Self::BrightRed => 'R',
            Self::BrightGreen => 'G',
            Self::BrightYellow => 'Y',
            Self::BrightBlue => 'B',
            Self::BrightMagenta => 'M',
            Self::BrightCyan => 'C',
            Self::BrightWhite => 'W',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::BrightBlack => "bright black",
            Self::BrightRed => "bright red",
            Self::BrightGreen => "bright green",
            Self::BrightYellow => "bright yellow",
            Self::BrightBlue => "bright blue",
            Self::BrightMagenta => "bright magenta",
            Self::BrightCyan => "bright cyan",
            Self::BrightWhite => "bright white",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// SGR parameter when used as a foreground (30–37, 90–97, 39).
    #[must_use]
    pub const fn fg_param(self) -> u8 {
        match self {
            Self::Default => 39,
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::BrightBlack => 90,
            Self::BrightRed => 91,
            Self::BrightGreen => 92,
            Self::BrightYellow => 93,
            Self::BrightBlue => 94,
            Self::BrightMagenta => 95,
            Self::BrightCyan => 96,
            Self::BrightWhite => 97,
        }
    }

    /// SGR parameter when used as a background (always `fg + 10`).
    #[inline]
    #[must_use]
    pub const fn bg_param(self) -> u8 {
        self.fg_param() + 10
    }

    /// Same hue, opposite brightness.  `Default` has no counterpart.
    #[must_use]
    pub const fn complement(self) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::Black => Self::BrightBlack,
            Self::Red => Self::BrightRed,
            Self::Green => Self::BrightGreen,
            Self::Yellow => Self::BrightYellow,
            Self::Blue => Self::BrightBlue,
            Self::Magenta => Self::BrightMagenta,
            Self::Cyan => Self::BrightCyan,
            Self::White => Self::BrightWhite,
            Self::BrightBlack => Self::Black,
            Self::BrightRed => Self::Red,
            Self::BrightGreen => Self::Green,
            Self::BrightYellow => Self::Yellow,
            Self::BrightBlue => Self::Blue,
            Self::BrightMagenta => Self::Magenta,
            Self::BrightCyan => Self::Cyan,
            Self::BrightWhite => Self::White,
        }
    }
}

impl TryFrom<char> for Color {
    type Error = ColorError;

    #[inline]
    fn try_from(code: char) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.code())
    }
}

/// Parse a colour cycle such as `"WWWWW"`.  An empty string means `"0"`.
pub fn parse_cycle(codes: &str) -> Result<Vec<Color>, ColorError> {
    if codes.is_empty() {
        return Ok(vec![Color::Default]);
    }
    codes.chars().map(Color::from_code).collect()
}

/// Append `ESC[<fg>;<bg>m` to `buf`.
#[inline]
pub fn push_sgr(buf: &mut String, fg: Color, bg: Color) {
    // writing into a String cannot fail
    let _ = write!(buf, "\x1b[{};{}m", fg.fg_param(), bg.bg_param());
}

/// Wrap `text` in a foreground colour + reset sequence.
#[must_use]
pub fn colorize(fg: Color, text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    push_sgr(&mut out, fg, Color::Default);
    out.push_str(text);
    push_sgr(&mut out, Color::Default, Color::Default);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_palette_code_round_trips_through_its_char() {
        for code in PALETTE.chars() {
            assert_eq!(Color::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn display_prints_the_code() {
        assert_eq!(Color::try_from('M').unwrap().to_string(), "M");
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(matches!(
            Color::from_code('x'),
            Err(ColorError::InvalidCode('x'))
        ));
    }

    #[test]
    fn sgr_parameters_follow_the_ansi_table() {
        assert_eq!(Color::Default.fg_param(), 39);
        assert_eq!(Color::Default.bg_param(), 49);
        assert_eq!(Color::Red.fg_param(), 31);
        assert_eq!(Color::BrightWhite.fg_param(), 97);
        assert_eq!(Color::BrightBlack.bg_param(), 100);
    }

    #[test]
    fn complement_swaps_brightness() {
        assert_eq!(Color::BrightBlack.complement(), Color::Black);
        assert_eq!(Color::Cyan.complement(), Color::BrightCyan);
        assert_eq!(Color::Default.complement(), Color::Default);
    }

    #[test]
    fn empty_cycle_means_default() {
        assert_eq!(parse_cycle("").unwrap(), vec![Color::Default]);
        assert_eq!(
            parse_cycle("rG0").unwrap(),
            vec![Color::Red, Color::BrightGreen, Color::Default]
        );
    }

    #[test]
    fn sgr_sequence_layout() {
        let mut s = String::new();
        push_sgr(&mut s, Color::White, Color::BrightBlack);
        assert_eq!(s, "\x1b[37;100m");
        assert_eq!(colorize(Color::Red, "x"), "\x1b[31;49mx\x1b[39;49m");
    }
}
