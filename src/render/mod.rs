pub mod bin_row;
pub mod cell;
pub mod layout;
pub mod ticks;

pub use bin_row::BinFormatter;
pub use cell::Cell;
pub use layout::{HistFormatter, SymbolScale, row_budget, usable_rows};
pub use ticks::{Ticks, sci};
