//! A collection of constants.

/// Symbol cycle used when none is configured.
pub const DEFAULT_SYMBOLS: &str = " |=/\\";
/// Foreground colour cycle used when none is configured.
pub const DEFAULT_FG_COLORS: &str = "WWWWW";
/// Background colour cycle used when none is configured.
pub const DEFAULT_BG_COLORS: &str = "K0000";

/// The only glyphs a cell accepts.
pub const ALLOWED_SYMBOLS: &str = " =|\\/";
/// Symbols drawn into the compose slot of a cell rather than its base.
pub const COMPOSING_SYMBOLS: &str = "/\\";

/// Marks the labelled line of a bin.
pub const TICK_MARK: &str = "_";
/// Axis character on every other line.
pub const NO_TICK_MARK: &str = " ";
/// Closes the axis header, right above the last symbol column.
pub const AXIS_ORIGIN: &str = " \u{2577}";

/// Pulls scales just below the exact quotient so `floor` never loses the
/// last row or column to floating-point error.
pub const ROUNDING_GUARD: f64 = 0.999;

/// Lines reserved below the bins for legend + Tot/Avg/Std.
pub const SUMMARY_LINES: usize = 4;
/// Labels in the legend are padded to this many columns.
pub const LABEL_WIDTH: usize = 9;
/// Indent of the legend line before the first series.
pub const LEGEND_INDENT: usize = 5;

/// Terminal size assumed when it cannot be detected.
pub const FALLBACK_COLUMNS: u16 = 80;
/// Terminal size assumed when it cannot be detected.
pub const FALLBACK_LINES: u16 = 30;
/// Default lines follow the columns with this aspect ratio.
pub const ASPECT_RATIO: f64 = 3.5;
