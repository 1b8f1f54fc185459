//! Public-facing crate root – re-exports + one-shot helpers.

pub mod cli;
pub mod core;
pub mod render;

use std::io::Write;

pub use crate::core::{
    color::{Color, colorize},
    config::{RenderConfig, RenderConfigBuilder, TickFormat},
    data::{Bins, Histogram},
    error::{ColorError, ConfigError, HistError, ParseError},
};

pub use crate::render::{Cell, HistFormatter};

/// Render one histogram to a string.  `counts` holds one slice of bin
/// contents per series, each one shorter than `edges`.
pub fn format_hist<S: AsRef<[f64]>>(
    edges: &[f64],
    counts: &[S],
    config: RenderConfig,
) -> Result<String, HistError> {
    HistFormatter::new(edges, config)?.format(counts)
}

/// Render `hist` and write it to `out` in one go.
pub fn print_hist<W: Write>(
    hist: &Histogram,
    config: RenderConfig,
    out: &mut W,
) -> Result<(), HistError> {
    if hist.counts.is_empty() {
        return Err(HistError::EmptyData);
    }
    let text = format_hist(&hist.edges, &hist.counts, config)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
