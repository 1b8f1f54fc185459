use clap::{Args, Parser, Subcommand};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "termhist",
    version,
    about = "Pretty-print histograms to the terminal with ANSI colours"
)]
pub struct Cli {
    /// Log verbosity: off, error, warn, info, debug, trace (`RUST_LOG` if omitted)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Histogram the columns of a numeric table
    Plot(PlotArgs),
    /// Render overlay, stacked and summary histograms of random data
    Demo(DemoArgs),
    /// Show the available colour codes
    Colors,
    /// Print example invocations
    Examples,
}

/// Layout and styling flags shared by `plot` and `demo`.
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Symbol cycle, one character per series out of ` |=/\`
    #[arg(short = 's', long)]
    pub symbols: Option<String>,

    /// Foreground colour cycle out of `0rgbcmykwRGBCMYKW`
    #[arg(long)]
    pub fg_colors: Option<String>,

    /// Background colour cycle out of `0rgbcmykwRGBCMYKW`
    #[arg(long)]
    pub bg_colors: Option<String>,

    /// Total width in characters (terminal width if omitted)
    #[arg(short = 'c', long)]
    pub columns: Option<usize>,

    /// Approximate total height in lines (derived from the width if omitted)
    #[arg(short = 'l', long)]
    pub lines: Option<usize>,

    /// Count that fills the whole width
    #[arg(long)]
    pub max_count: Option<f64>,

    /// Plain text, no escape sequences
    #[arg(long)]
    pub no_color: bool,

    /// Label the lower edge of every bin instead of the upper one
    #[arg(long)]
    pub top_edge: bool,

    /// Encode counts by row length only, not by area
    #[arg(long)]
    pub height_mode: bool,

    /// One line per bin regardless of its width
    #[arg(long)]
    pub uniform_rows: bool,

    /// Per-edge scientific tick labels instead of a shared exponent
    #[arg(long)]
    pub scientific: bool,
}

/// `termhist plot …`
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Input table path (use `-` for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    /// Number of bins or space-separated bin edges
    #[arg(short, long, default_value = "10")]
    pub bins: String,

    /// Columns to histogram, by 0-based index or header name
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Title of the histogram
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Stack the series instead of overlaying them
    #[arg(long)]
    pub stack: bool,

    /// Print total, mean and standard deviation under the histogram
    #[arg(long)]
    pub summary: bool,

    /// Normalise every series to a probability density (implies --height-mode)
    #[arg(long)]
    pub density: bool,

    /// Series labels, one per column (header names by default)
    #[arg(short = 'L', long = "label")]
    pub labels: Vec<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// `termhist demo …`
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Samples per series
    #[arg(long, default_value_t = 1000)]
    pub samples: usize,

    /// Bins over [-5, 5]
    #[arg(long, default_value_t = 15)]
    pub bins: usize,

    /// RNG seed (wall clock if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub style: StyleArgs,
}
