//! Causal dataset generator — evaluates the fixed DAG once, leaves first.
//!
//! EXECUTION ORDER — fixed, documented, never reordered:
//!   1. Root columns (A1, A2) drawn from their normals.
//!   2. Derived columns (P1, P2, C1, C2, F1, F2), each as
//!      intercept + Σ coefficient × transform(predictor) + noise,
//!      clipped before anything downstream reads it.
//!
//! A failing step aborts the run; no partial table is ever returned.

use crate::{
    config::{DerivedConfig, ModelConfig, PredictorTransform},
    error::{SimError, SimResult},
    event::GenerationEvent,
    rng::SimRng,
    stats,
    table::ObservationTable,
    types::{Column, SampleCount},
};

/// Fraction of clipped values above which a column is reported as saturated.
pub const SATURATION_WARN_FRACTION: f64 = 0.5;

/// Everything a single run produces.
#[derive(Debug, Clone)]
pub struct GenerationRun {
    pub seed:   u64,
    pub table:  ObservationTable,
    pub events: Vec<GenerationEvent>,
}

pub struct CausalGenerator {
    config:  ModelConfig,
    rng:     SimRng,
    samples: SampleCount,
    columns: [Option<Vec<f64>>; 8],
    events:  Vec<GenerationEvent>,
}

impl CausalGenerator {
    /// Prepare a run. Rejects the sample size and the model up front,
    /// before a single value is drawn.
    pub fn new(config: ModelConfig, seed: u64, samples: SampleCount) -> SimResult<Self> {
        if samples < 2 {
            return Err(SimError::InvalidSampleSize { samples });
        }
        config.validate()?;
        Ok(Self {
            config,
            rng: SimRng::new(seed),
            samples,
            columns: Default::default(),
            events: Vec::new(),
        })
    }

    /// Run the whole DAG and hand back the finished table.
    pub fn run(mut self) -> SimResult<GenerationRun> {
        let seed = self.rng.seed();
        log::info!(
            "Generating {} rows, seed {seed}, {} derived columns",
            self.samples,
            self.config.derived.len()
        );
        self.record(GenerationEvent::RunInitialized { seed, samples: self.samples });

        let roots = self.config.roots.clone();
        for root in &roots {
            let values = self.rng.draw_normal(root.mean, root.std_dev, self.samples)?;
            self.columns[root.column.index()] = Some(values);
            self.record(GenerationEvent::RootDrawn {
                column:  root.column,
                mean:    root.mean,
                std_dev: root.std_dev,
            });
        }

        let derived = self.config.derived.clone();
        for step in &derived {
            self.derive(step)?;
        }

        let draws = self.rng.draws();
        let mut filled: Vec<Vec<f64>> = Vec::with_capacity(Column::ALL.len());
        for col in Column::ALL {
            let values = self.columns[col.index()]
                .take()
                .ok_or_else(|| SimError::invalid_config(format!("column {col} was never computed")))?;
            filled.push(values);
        }
        let columns: [Vec<f64>; 8] = filled
            .try_into()
            .map_err(|_| SimError::Other(anyhow::anyhow!("table must have 8 columns")))?;
        let table = ObservationTable::from_columns(columns)?;

        self.record(GenerationEvent::TableCompleted { rows: table.rows(), draws });
        Ok(GenerationRun { seed, table, events: self.events })
    }

    fn derive(&mut self, step: &DerivedConfig) -> SimResult<()> {
        let mut values = vec![step.intercept; self.samples];
        for term in &step.terms {
            let predictor = self.predictor(term.column, term.transform)?;
            for (v, x) in values.iter_mut().zip(&predictor) {
                *v += term.coefficient * x;
            }
        }

        let noise = self.rng.draw_normal(0.0, step.noise_std_dev, self.samples)?;
        for (v, e) in values.iter_mut().zip(&noise) {
            *v += e;
        }

        let clipped = stats::clip(&mut values, step.clip.low, step.clip.high);
        let saturated = (clipped.low + clipped.high) as f64 / self.samples as f64;
        if saturated > SATURATION_WARN_FRACTION {
            log::warn!(
                "{}: {:.0}% of values clipped to [{}, {}]",
                step.column,
                saturated * 100.0,
                step.clip.low,
                step.clip.high
            );
        }

        self.columns[step.column.index()] = Some(values);
        self.record(GenerationEvent::ColumnDerived {
            column:       step.column,
            clipped_low:  clipped.low,
            clipped_high: clipped.high,
        });
        Ok(())
    }

    /// The predictor column as it enters an equation.
    fn predictor(&self, column: Column, transform: PredictorTransform) -> SimResult<Vec<f64>> {
        let values = self.columns[column.index()]
            .as_deref()
            .ok_or_else(|| SimError::invalid_config(format!("predictor {column} read before it was computed")))?;
        match transform {
            PredictorTransform::Raw => Ok(values.to_vec()),
            PredictorTransform::Standardized => {
                stats::standardize(values).ok_or(SimError::DegenerateColumn { column })
            }
            PredictorTransform::ScaledByMax => {
                let max = stats::max(values);
                if max == 0.0 || !max.is_finite() {
                    return Err(SimError::DegenerateColumn { column });
                }
                Ok(values.iter().map(|x| x / max).collect())
            }
        }
    }

    fn record(&mut self, event: GenerationEvent) {
        log::debug!("{}: {:?}", event.kind(), event);
        self.events.push(event);
    }
}

/// Generate one table from `config`.
pub fn generate(config: &ModelConfig, seed: u64, samples: SampleCount) -> SimResult<GenerationRun> {
    CausalGenerator::new(config.clone(), seed, samples)?.run()
}
