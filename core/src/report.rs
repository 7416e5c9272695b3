//! Diagnostics over a finished table: descriptive statistics, the
//! correlation matrix, per-edge sign checks and the data behind the
//! histogram and scatter charts.
//!
//! RULE: Reports only read a table. Nothing here feeds back into generation.

use crate::{
    config::ModelConfig,
    event::GenerationEvent,
    stats,
    table::ObservationTable,
    types::Column,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

pub const HISTOGRAM_BINS: usize = 30;

/// Columns shown as histograms.
pub const HISTOGRAM_COLUMNS: [Column; 6] = [
    Column::A1,
    Column::P1,
    Column::P2,
    Column::C1,
    Column::F1,
    Column::F2,
];

/// Key causal relationships shown as scatter plots with a trend line.
pub const SCATTER_PAIRS: [(Column, Column); 3] = [
    (Column::A1, Column::P1),
    (Column::P1, Column::P2),
    (Column::C1, Column::C2),
];

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: Column,
    pub count:  usize,
    pub mean:   f64,
    pub std:    f64,
    pub min:    f64,
    pub q25:    f64,
    pub median: f64,
    pub q75:    f64,
    pub max:    f64,
}

impl ColumnSummary {
    fn of(column: Column, values: &[f64]) -> Self {
        Self {
            column,
            count:  values.len(),
            mean:   stats::mean(values),
            std:    stats::std_dev_sample(values),
            min:    stats::min(values),
            q25:    stats::quantile(values, 0.25),
            median: stats::quantile(values, 0.50),
            q75:    stats::quantile(values, 0.75),
            max:    stats::max(values),
        }
    }
}

/// Configured coefficient sign vs observed correlation for one DAG edge.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeCheck {
    pub from:        Column,
    pub to:          Column,
    pub coefficient: f64,
    pub observed_r:  f64,
}

impl EdgeCheck {
    pub fn sign_agrees(&self) -> bool {
        self.coefficient.signum() == self.observed_r.signum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    pub column: Column,
    pub mean:   f64,
    pub edges:  Vec<f64>,
    pub counts: Vec<usize>,
}

/// Least-squares line through one scatter pair.
#[derive(Debug, Clone, Serialize)]
pub struct TrendLine {
    pub x:         Column,
    pub y:         Column,
    pub slope:     f64,
    pub intercept: f64,
    pub r:         f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub seed:         u64,
    pub rows:         usize,
    pub describe:     Vec<ColumnSummary>,
    /// Row-major 8×8 Pearson matrix in column order.
    pub correlation:  Vec<Vec<f64>>,
    pub edges:        Vec<EdgeCheck>,
    pub histograms:   Vec<Histogram>,
    pub trends:       Vec<TrendLine>,
    pub events:       Vec<GenerationEvent>,
}

impl Report {
    pub fn build(
        table: &ObservationTable,
        config: &ModelConfig,
        seed: u64,
        events: &[GenerationEvent],
    ) -> Self {
        let describe = Column::ALL
            .iter()
            .map(|&c| ColumnSummary::of(c, table.column(c)))
            .collect();

        let correlation = Column::ALL
            .iter()
            .map(|&a| {
                Column::ALL
                    .iter()
                    .map(|&b| stats::pearson(table.column(a), table.column(b)))
                    .collect()
            })
            .collect();

        let edges = config
            .edges()
            .into_iter()
            .map(|(from, to, coefficient)| EdgeCheck {
                from,
                to,
                coefficient,
                observed_r: stats::pearson(table.column(from), table.column(to)),
            })
            .collect();

        let histograms = HISTOGRAM_COLUMNS
            .iter()
            .map(|&c| {
                let values = table.column(c);
                let (edges, counts) = stats::histogram(values, HISTOGRAM_BINS);
                Histogram { column: c, mean: stats::mean(values), edges, counts }
            })
            .collect();

        let trends = SCATTER_PAIRS
            .iter()
            .map(|&(x, y)| {
                let (xs, ys) = (table.column(x), table.column(y));
                let (slope, intercept) = stats::linear_fit(xs, ys).unwrap_or((f64::NAN, f64::NAN));
                TrendLine { x, y, slope, intercept, r: stats::pearson(xs, ys) }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            seed,
            rows: table.rows(),
            describe,
            correlation,
            edges,
            histograms,
            trends,
            events: events.to_vec(),
        }
    }

    pub fn summary(&self, column: Column) -> &ColumnSummary {
        &self.describe[column.index()]
    }

    pub fn correlation(&self, a: Column, b: Column) -> f64 {
        self.correlation[a.index()][b.index()]
    }
}

/// The console form: descriptive table, correlation matrix, edge check.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset: {} observations x {} variables", self.rows, Column::ALL.len())?;
        writeln!(f)?;
        writeln!(f, "Descriptive statistics:")?;
        write!(f, "{:>6}", "")?;
        for c in Column::ALL {
            write!(f, "{:>11}", c.name())?;
        }
        writeln!(f)?;

        type Stat = fn(&ColumnSummary) -> f64;
        let rows: [(&str, Stat); 8] = [
            ("count", |s: &ColumnSummary| s.count as f64),
            ("mean",  |s: &ColumnSummary| s.mean),
            ("std",   |s: &ColumnSummary| s.std),
            ("min",   |s: &ColumnSummary| s.min),
            ("25%",   |s: &ColumnSummary| s.q25),
            ("50%",   |s: &ColumnSummary| s.median),
            ("75%",   |s: &ColumnSummary| s.q75),
            ("max",   |s: &ColumnSummary| s.max),
        ];
        for (label, stat) in rows {
            write!(f, "{label:>6}")?;
            for s in &self.describe {
                write!(f, "{:>11.3}", stat(s))?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "Correlation matrix:")?;
        write!(f, "{:>4}", "")?;
        for c in Column::ALL {
            write!(f, "{:>8}", c.name())?;
        }
        writeln!(f)?;
        for (a, row) in Column::ALL.iter().zip(&self.correlation) {
            write!(f, "{:>4}", a.name())?;
            for r in row {
                write!(f, "{r:>8.3}")?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "Causal edges (configured beta vs observed r):")?;
        for e in &self.edges {
            let mark = if e.sign_agrees() { "ok" } else { "MISMATCH" };
            writeln!(
                f,
                "  {} -> {}  beta={:+.2}  r={:+.3}  {mark}",
                e.from, e.to, e.coefficient, e.observed_r
            )?;
        }
        Ok(())
    }
}
