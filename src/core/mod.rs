//! Aggregates the “business logic” layer.

pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod rng;
pub mod stats;

// re-export frequently-used items for convenience
pub use color::{Color, PALETTE, colorize};
pub use config::{RenderConfig, RenderConfigBuilder, SeriesStyle, TickFormat};
pub use constants::{DEFAULT_BG_COLORS, DEFAULT_FG_COLORS, DEFAULT_SYMBOLS};
pub use data::{Bins, Histogram, Table};
pub use error::{ColorError, ConfigError, HistError, ParseError};
pub use stats::Summary;
