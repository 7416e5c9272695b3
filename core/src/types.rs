//! Shared primitive types used across the entire simulator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows in a table. One row = one simulated period or unit.
pub type SampleCount = usize;

/// The four Balanced Scorecard perspectives, in causal order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    LearningGrowth,
    InternalProcesses,
    Customers,
    Financial,
}

impl Perspective {
    /// Single-letter prefix shared by every column of the perspective.
    pub fn prefix(self) -> char {
        match self {
            Perspective::LearningGrowth    => 'A',
            Perspective::InternalProcesses => 'P',
            Perspective::Customers         => 'C',
            Perspective::Financial         => 'F',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Perspective::LearningGrowth    => "Learning & Growth",
            Perspective::InternalProcesses => "Internal Processes",
            Perspective::Customers         => "Customers",
            Perspective::Financial         => "Financial",
        }
    }
}

/// Every column of the observation table.
/// The declaration order IS the table's column order — never reorder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    A1,
    A2,
    P1,
    P2,
    C1,
    C2,
    F1,
    F2,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::A1,
        Column::A2,
        Column::P1,
        Column::P2,
        Column::C1,
        Column::C2,
        Column::F1,
        Column::F2,
    ];

    /// Position of the column in the table (0..8).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::A1 => "A1",
            Column::A2 => "A2",
            Column::P1 => "P1",
            Column::P2 => "P2",
            Column::C1 => "C1",
            Column::C2 => "C2",
            Column::F1 => "F1",
            Column::F2 => "F2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::A1 => "Training hours",
            Column::A2 => "Technology investment (k)",
            Column::P1 => "Operational efficiency",
            Column::P2 => "Rework rate",
            Column::C1 => "Customer satisfaction",
            Column::C2 => "Customer retention",
            Column::F1 => "Revenue (k)",
            Column::F2 => "Operating margin",
        }
    }

    pub fn perspective(self) -> Perspective {
        match self {
            Column::A1 | Column::A2 => Perspective::LearningGrowth,
            Column::P1 | Column::P2 => Perspective::InternalProcesses,
            Column::C1 | Column::C2 => Perspective::Customers,
            Column::F1 | Column::F2 => Perspective::Financial,
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
