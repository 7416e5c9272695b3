//! The run log — what happened while a table was generated.
//!
//! RULE: The generator records one event per step, in execution order.
//! Events are data only; nothing reads them back to drive generation.

use crate::types::Column;
use serde::{Deserialize, Serialize};

/// Every event emitted during a generation run.
/// Variants are only ever appended — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationEvent {
    RunInitialized {
        seed: u64,
        samples: usize,
    },
    RootDrawn {
        column: Column,
        mean: f64,
        std_dev: f64,
    },
    ColumnDerived {
        column: Column,
        clipped_low: usize,
        clipped_high: usize,
    },
    TableCompleted {
        rows: usize,
        draws: u64,
    },
}

impl GenerationEvent {
    /// Stable string name of the variant, for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationEvent::RunInitialized { .. } => "run_initialized",
            GenerationEvent::RootDrawn { .. }      => "root_drawn",
            GenerationEvent::ColumnDerived { .. }  => "column_derived",
            GenerationEvent::TableCompleted { .. } => "table_completed",
        }
    }
}
