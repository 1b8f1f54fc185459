//! Input side: numeric tables in, `(counts, edges)` pairs out.
//!
//! * [`read_table`] ingests whitespace- or comma-separated columns with
//!   zero-allocation float parsing.
//! * [`Bins`] is the user's binning request: a bin count or explicit edges.
//! * [`Histogram::from_samples`] bins raw columns into half-open bins (the
//!   last one closed); the result is what the layout engine consumes.

use std::io::{BufRead, BufReader, Read};

use crate::core::{
    bounds::sample_range,
    error::{ParseError, ParseErrorKind},
};

// --- Binned data ---

/// Bin edges plus one count series per column.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<Vec<f64>>,
}

/// How to bin raw samples.
#[derive(Clone, Debug, PartialEq)]
pub enum Bins {
    /// Equal-width bins spanning the finite sample range.
    Count(usize),
    /// Explicit, increasing edges.
    Edges(Vec<f64>),
}

impl Default for Bins {
    fn default() -> Self {
        Self::Count(10)
    }
}

impl Bins {
    /// `"10"` → ten bins, `"0 1 2 5"` → those edges.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let bad = || ParseError::new(0, ParseErrorKind::BadBins(text.to_owned()));
        let fields: Vec<&str> = text.split_whitespace().collect();
        match fields.as_slice() {
            [] => Err(bad()),
            [one] => {
                let n: usize = one.parse().map_err(|_| bad())?;
                if n == 0 { Err(bad()) } else { Ok(Self::Count(n)) }
            }
            many => {
                let edges = many
                    .iter()
                    .map(|f| lexical_core::parse::<f64>(f.as_bytes()).map_err(|_| bad()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Edges(edges))
            }
        }
    }

    /// Concrete edges for these samples.
    #[must_use]
    pub fn edges<S: AsRef<[f64]>>(&self, columns: &[S]) -> Vec<f64> {
        match self {
            Self::Edges(e) => e.clone(),
            Self::Count(n) => {
                let (low, high) = sample_range(columns);
                #[allow(clippy::cast_precision_loss)]
                let step = (high - low) / *n as f64;
                #[allow(clippy::cast_precision_loss)]
                let mut edges: Vec<f64> = (0..=*n).map(|i| low + step * i as f64).collect();
                // pin the last edge so the maximum sample is never lost to rounding
                if let Some(last) = edges.last_mut() {
                    *last = high;
                }
                edges
            }
        }
    }
}

/// Index of the bin holding `v`; the last bin is closed on the right.
fn bin_index(edges: &[f64], v: f64) -> Option<usize> {
    let (&first, &last) = edges.first().zip(edges.last())?;
    if edges.len() < 2 || !v.is_finite() || v < first || v > last {
        return None;
    }
    let bins = edges.len() - 1;
    // number of edges <= v, minus one
    let idx = edges.partition_point(|e| *e <= v).saturating_sub(1);
    Some(idx.min(bins - 1))
}

impl Histogram {
    /// Bin every column with the same edges.  Non-finite and out-of-range
    /// samples are skipped.
    #[must_use]
    pub fn from_samples<S: AsRef<[f64]>>(columns: &[S], bins: &Bins) -> Self {
        let edges = bins.edges(columns);
        let n_bins = edges.len().saturating_sub(1);
        let mut skipped = 0usize;
        let counts = columns
            .iter()
            .map(|col| {
                let mut counts = vec![0.0; n_bins];
                for &v in col.as_ref() {
                    match bin_index(&edges, v) {
                        Some(i) => counts[i] += 1.0,
                        None => skipped += 1,
                    }
                }
                counts
            })
            .collect();
        if skipped > 0 {
            log::warn!("{skipped} samples were non-finite or outside the bin range");
        }
        Self { edges, counts }
    }

    /// Every series rescaled to a probability density, so that it
    /// integrates to 1 over the edges.  Empty series stay all zero.
    #[must_use]
    pub fn density(&self) -> Self {
        let widths: Vec<f64> = self.edges.windows(2).map(|w| w[1] - w[0]).collect();
        let counts = self
            .counts
            .iter()
            .map(|series| {
                let total: f64 = series.iter().sum();
                if total.abs() < f64::MIN_POSITIVE {
                    return vec![0.0; series.len()];
                }
                series
                    .iter()
                    .zip(&widths)
                    .map(|(c, w)| c / total / w)
                    .collect()
            })
            .collect();
        Self {
            edges: self.edges.clone(),
            counts,
        }
    }
}

// --- Table ingest ---

/// Numeric columns plus their header names (empty if there was no header).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub labels: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl Table {
    /// Keep only `fields`, given as 0-based indices or header names.
    /// An empty selection keeps everything.
    pub fn select(self, fields: &[String]) -> Result<Self, ParseError> {
        if fields.is_empty() {
            return Ok(self);
        }
        let mut out = Self::default();
        for field in fields {
            let idx = self
                .labels
                .iter()
                .position(|l| l == field)
                .or_else(|| field.parse::<usize>().ok())
                .filter(|&i| i < self.columns.len())
                .ok_or_else(|| {
                    ParseError::new(0, ParseErrorKind::UnknownField(field.clone()))
                })?;
            out.columns.push(self.columns[idx].clone());
            if let Some(l) = self.labels.get(idx) {
                out.labels.push(l.clone());
            }
        }
        Ok(out)
    }
}

#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = b {
        if !first.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    while let [rest @ .., last] = b {
        if !last.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    b
}

/// Rewrite U+2212 (minus sign) to ASCII `-` in place.
#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

/// Split on commas if there are any, otherwise on runs of whitespace.
fn split_fields(line: &[u8]) -> Vec<&[u8]> {
    if line.contains(&b',') {
        line.split(|&b| b == b',').map(trim).collect()
    } else {
        line.split(u8::is_ascii_whitespace)
            .filter(|f| !f.is_empty())
            .collect()
    }
}

#[inline]
fn parse_f64(bytes: &[u8], line: usize, column: usize) -> Result<f64, ParseError> {
    lexical_core::parse::<f64>(bytes).map_err(|_| {
        ParseError::new(
            line,
            ParseErrorKind::BadFloat {
                column,
                text: String::from_utf8_lossy(bytes).into_owned(),
            },
        )
    })
}

const BUF_CAP: usize = 1 << 20; // 1 MiB

pub fn read_table<R: Read>(src: R) -> Result<Table, ParseError> {
    let mut rdr = BufReader::with_capacity(BUF_CAP, src);
    let mut buf = Vec::<u8>::with_capacity(256);
    let mut table = Table::default();
    let mut saw_first = false;
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let n = rdr
            .read_until(b'\n', &mut buf)
            .map_err(|e| ParseError::new(line_no, ParseErrorKind::Io(e)))?;
        if n == 0 {
            break;
        }
        line_no += 1;

        if buf.ends_with(b"\n") {
            buf.pop();
        }
        if buf.ends_with(b"\r") {
            buf.pop();
        }

        normalize_unicode_minus(&mut buf);
        let line = trim(&buf);
        if line.is_empty() || line[0] == b'#' {
            continue;
        }
        let fields = split_fields(line);

        // header detection (non-numeric first field on the first data line)
        if !saw_first {
            saw_first = true;
            if lexical_core::parse::<f64>(fields[0]).is_err() {
                table.labels = fields
                    .iter()
                    .map(|f| String::from_utf8_lossy(f).into_owned())
                    .collect();
                continue;
            }
        }

        if table.columns.is_empty() {
            table.columns = vec![Vec::new(); fields.len()];
        }
        if fields.len() != table.columns.len() {
            return Err(ParseError::new(
                line_no,
                ParseErrorKind::RaggedRow {
                    expected: table.columns.len(),
                    got: fields.len(),
                },
            ));
        }
        for (column, (field, values)) in fields.iter().zip(&mut table.columns).enumerate() {
            values.push(parse_f64(field, line_no, column)?);
        }
    }

    if table.columns.is_empty() {
        return Err(ParseError::new(line_no, ParseErrorKind::NoRows));
    }
    log::debug!(
        "read {} columns x {} rows",
        table.columns.len(),
        table.columns[0].len()
    );
    Ok(table)
}

pub fn read_table_from_path(path: &str) -> Result<Table, ParseError> {
    if path == "-" {
        read_table(std::io::stdin())
    } else {
        use std::fs::File;
        read_table(
            File::open(path).map_err(|e| ParseError::new(0, ParseErrorKind::Io(e)))?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whitespace_table_without_header() {
        let t = read_table("1 2\n# comment\n\n3\t4\n".as_bytes()).unwrap();
        assert!(t.labels.is_empty());
        assert_eq!(t.columns, vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
    }

    #[test]
    fn csv_header_becomes_labels() {
        let t = read_table("a, b\n1,2\n\u{2212}5,6\n".as_bytes()).unwrap();
        assert_eq!(t.labels, vec!["a", "b"]);
        assert_eq!(t.columns, vec![vec![1.0, -5.0], vec![2.0, 6.0]]);
    }

    #[test]
    fn ragged_rows_are_reported_with_their_line() {
        let err = read_table("1 2\n3\n".as_bytes()).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(
            err.kind,
            ParseErrorKind::RaggedRow {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn bad_float_names_its_column() {
        let err = read_table("1 x\n".as_bytes()).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::BadFloat { column: 1, .. }));
    }

    #[test]
    fn header_only_input_has_no_rows() {
        let err = read_table("a b\n".as_bytes()).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::NoRows));
    }

    #[test]
    fn select_by_name_or_index() {
        let t = Table {
            labels: vec!["x".into(), "y".into()],
            columns: vec![vec![1.0], vec![2.0]],
        };
        let picked = t.clone().select(&["y".into(), "0".into()]).unwrap();
        assert_eq!(picked.columns, vec![vec![2.0], vec![1.0]]);
        assert_eq!(picked.labels, vec!["y", "x"]);
        assert!(t.select(&["z".into()]).is_err());
    }

    #[test]
    fn bins_parse_count_or_edges() {
        assert_eq!(Bins::parse("4").unwrap(), Bins::Count(4));
        assert_eq!(
            Bins::parse("0 1 2.5").unwrap(),
            Bins::Edges(vec![0.0, 1.0, 2.5])
        );
        assert!(Bins::parse("0").is_err());
        assert!(Bins::parse("").is_err());
        assert!(Bins::parse("1 x").is_err());
    }

    #[test]
    fn last_bin_is_closed_on_the_right() {
        let cols = [vec![0.0, 0.5, 1.0, 1.5, 2.0, f64::NAN]];
        let h = Histogram::from_samples(&cols, &Bins::Count(2));
        assert_eq!(h.edges, vec![0.0, 1.0, 2.0]);
        // right edge of the last bin is inclusive
        assert_eq!(h.counts, vec![vec![2.0, 3.0]]);
    }

    #[test]
    fn explicit_edges_skip_out_of_range_samples() {
        let cols = [vec![-1.0, 0.2, 3.0, 9.0]];
        let h = Histogram::from_samples(&cols, &Bins::Edges(vec![0.0, 1.0, 5.0]));
        assert_eq!(h.counts, vec![vec![1.0, 1.0]]);
    }

    #[test]
    fn density_integrates_to_one() {
        let h = Histogram {
            edges: vec![0.0, 1.0, 3.0],
            counts: vec![vec![2.0, 2.0], vec![0.0, 0.0]],
        };
        let d = h.density();
        assert_eq!(d.edges, h.edges);
        assert_eq!(d.counts, vec![vec![0.5, 0.25], vec![0.0, 0.0]]);
    }
}
