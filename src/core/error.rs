//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

/// Palette faults.
#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid colour code `{0}`, expected one of `0rgbcmykwRGBCMYKW`")]
    InvalidCode(char),
}

/// Precise configuration and input-shape faults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("symbol `{0}` is not one of ' ', '=', '|', '\\', '/'")]
    InvalidSymbol(char),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error("column budget must be at least 1")]
    ZeroColumns,
    #[error("need at least two bin edges, got {0}")]
    TooFewEdges(usize),
    #[error("bin edge {index} is not finite")]
    NonFiniteEdge { index: usize },
    #[error("bin edges must be strictly increasing: edge {index} is {high} after {low}")]
    NonIncreasingEdges { index: usize, low: f64, high: f64 },
    #[error("series {series} has {got} counts, expected {expected}")]
    LengthMismatch {
        series: usize,
        expected: usize,
        got: usize,
    },
    #[error("no count series given")]
    NoSeries,
    #[error("max count override must be finite and positive, got {0}")]
    InvalidMaxCount(f64),
}

/// Where exactly table ingest failed.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("invalid number '{text}' in column {column}")]
    BadFloat { column: usize, text: String },
    #[error("expected {expected} columns, got {got}")]
    RaggedRow { expected: usize, got: usize },
    #[error("no numeric rows found")]
    NoRows,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("invalid bin specification '{0}'")]
    BadBins(String),
}

/// Table ingest failure with the (1-based) line it happened on; 0 = not line-bound.
#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    #[inline]
    pub(crate) fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum HistError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("symbol `{0}` cannot be drawn into a cell")]
    InvalidSymbol(char),
    #[error("data set is empty")]
    EmptyData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RenderConfig;

    #[test]
    fn palette_faults_surface_through_the_config_layer() {
        let err: HistError = RenderConfig::builder()
            .columns(10)
            .lines(5)
            .bg_colors("Kq")
            .build()
            .unwrap_err()
            .into();
        assert!(matches!(
            err,
            HistError::Config(ConfigError::Color(ColorError::InvalidCode('q')))
        ));
        assert_eq!(err.to_string(), ColorError::InvalidCode('q').to_string());
    }
}
