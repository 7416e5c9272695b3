//! bsc-core: synthetic Balanced Scorecard datasets generated from a
//! fixed linear causal map (Learning & Growth → Internal Processes →
//! Customers → Financial).
//!
//! RULE: One seed, one RNG, one pass over the DAG. Same seed, same
//! sample count, same model: byte-identical table.

pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod generator;
pub mod report;
pub mod rng;
pub mod stats;
pub mod table;
pub mod types;
