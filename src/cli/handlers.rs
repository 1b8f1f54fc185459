use std::io::{self, Write};
use std::time::Instant;

use crate::{
    core::{
        color::{Color, PALETTE, colorize},
        config::{RenderConfig, RenderConfigBuilder, TickFormat},
        data::{Bins, Histogram, read_table_from_path},
        error::HistError,
        rng::Lcg,
    },
    print_hist,
};

use super::parse::{DemoArgs, PlotArgs, StyleArgs};

/// Fold the shared styling flags into `b`; only flags the user gave apply.
fn apply_style(mut b: RenderConfigBuilder, s: &StyleArgs) -> RenderConfigBuilder {
    if let Some(sym) = &s.symbols {
        b = b.symbols(sym.as_str());
    }
    if let Some(fg) = &s.fg_colors {
        b = b.fg_colors(fg.as_str());
    }
    if let Some(bg) = &s.bg_colors {
        b = b.bg_colors(bg.as_str());
    }
    if s.no_color {
        b = b.use_color(false);
    }
    if s.top_edge {
        b = b.label_top_edge(true);
    }
    if s.height_mode {
        b = b.count_area(false);
    }
    if s.uniform_rows {
        b = b.scale_bin_width(false);
    }
    if s.scientific {
        b = b.tick_format(TickFormat::Scientific);
    }
    if s.max_count.is_some() {
        b = b.max_count_opt(s.max_count);
    }
    b.columns_opt(s.columns).lines_opt(s.lines)
}

pub fn plot(a: &PlotArgs) -> Result<(), HistError> {
    let t_ingest = Instant::now();
    let table = read_table_from_path(&a.file)?.select(&a.fields)?;
    let bins = Bins::parse(&a.bins)?;
    let mut hist = Histogram::from_samples(&table.columns, &bins);
    if a.density {
        hist = hist.density();
    }
    log::debug!(
        "ingest + binning: {} µs ({} series, {} bins)",
        t_ingest.elapsed().as_micros(),
        hist.counts.len(),
        hist.edges.len().saturating_sub(1)
    );

    let labels = if a.labels.is_empty() {
        table.labels
    } else {
        a.labels.clone()
    };
    let cfg = apply_style(
        RenderConfig::builder()
            .title(a.title.as_str())
            .stack(a.stack)
            .summary(a.summary)
            .count_area(!a.density)
            .labels(labels),
        &a.style,
    )
    .build()?;

    let t_render = Instant::now();
    print_hist(&hist, cfg, &mut io::stdout().lock())?;
    log::debug!("render: {} µs", t_render.elapsed().as_micros());
    Ok(())
}

/// Four normal samples binned over [-5, 5], shown three ways.
pub fn demo(a: &DemoArgs) -> Result<(), HistError> {
    let mut rng = a.seed.map_or_else(Lcg::seed_from_time, Lcg::seed);
    let columns = [
        rng.normal(a.samples, -2.0, 1.0),
        rng.normal(a.samples, 0.0, 1.0),
        rng.normal(a.samples, 2.0, 1.0),
        rng.normal(a.samples / 2, 0.0, 2.0),
    ];
    let n = a.bins.max(1);
    #[allow(clippy::cast_precision_loss)]
    let edges: Vec<f64> = (0..=n).map(|i| -5.0 + 10.0 * i as f64 / n as f64).collect();
    let hist = Histogram::from_samples(&columns, &Bins::Edges(edges));

    let views = [
        RenderConfig::builder().title("Overlays").labels(["A", "B", "C", "D"]),
        RenderConfig::builder()
            .title("Stacks")
            .stack(true)
            .symbols("      ")
            .bg_colors("rgbcmy")
            .labels(["A", "B", "C", "D"]),
        RenderConfig::builder()
            .title("Summaries")
            .symbols("=|\\/")
            .fg_colors("0")
            .bg_colors("0")
            .labels(["AAAAAAAAAAAAAAAA", "B", "CCCCCCCCCCCCC", "D"])
            .summary(true),
    ];

    let mut out = io::stdout().lock();
    for view in views {
        let cfg = apply_style(view, &a.style).build()?;
        print_hist(&hist, cfg, &mut out)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Pretty-print the palette codes in their own colours.
pub fn colors() {
    println!("\nColour codes (lower case normal, upper case bright):");
    for color in PALETTE.chars().filter_map(|c| Color::from_code(c).ok()) {
        let swatch = colorize(color, color.name());
        println!("  {}  {swatch}", color.code());
    }
    println!();
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "termhist";
    println!(
        "
Example invocations
-------------------
• Ten bins, first column    : {bin} plot data.txt
• Pick columns by name      : {bin} plot data.csv -f signal -f background
• Explicit bin edges        : {bin} plot data.txt --bins \"-5 -2 -1 0 1 2 5\"
• Stacked with summary      : {bin} plot data.txt --stack --summary
• Probability density       : {bin} plot data.txt --density
• Colour blocks             : {bin} plot data.txt -s \"  \" --bg-colors rb
• From stdin, fixed size    : seq 100 | {bin} plot - -c 60 -l 20
• Plain text                : {bin} plot data.txt --no-color
• Showcase                  : {bin} demo --seed 1
• Debug timings             : {bin} --log-level debug plot data.txt
"
    );
}
