//! bsc-sim: headless runner for the Balanced Scorecard dataset simulator.
//!
//! Usage:
//!   bsc-sim --seed 42 --samples 200 --out bsc_dataset.csv
//!   bsc-sim --seed 7 --samples 5000 --variant raw --summary run.json
//!   bsc-sim --config data/causal_model.json --quiet

use anyhow::{bail, Context, Result};
use bsc_core::{
    config::{ModelConfig, Variant},
    export,
    generator::generate,
    report::Report,
    rng::parse_seed,
    types::{Column, Perspective},
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = match flag_value(&args, "--seed") {
        Some(raw) => parse_seed(raw)?,
        None => 42,
    };
    let samples = match flag_value(&args, "--samples") {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("--samples expects a non-negative integer, got '{raw}'"))?,
        None => 200,
    };
    let out = flag_value(&args, "--out").unwrap_or("bsc_dataset.csv");
    let summary = flag_value(&args, "--summary");
    let quiet = args.iter().any(|a| a == "--quiet");

    let config = select_config(flag_value(&args, "--config"), flag_value(&args, "--variant"))?;

    if !quiet {
        println!("BSC causal dataset simulator");
        println!("  seed:      {seed}");
        println!("  samples:   {samples}");
        println!("  out:       {out}");
        if let Some(path) = summary {
            println!("  summary:   {path}");
        }
        println!();
    }

    let run = generate(&config, seed, samples)?;
    let report = Report::build(&run.table, &config, run.seed, &run.events);

    // Nothing is written unless generation and reporting both succeeded,
    // and the dataset and summary land together or not at all.
    export::write_run(&run.table, out, summary.map(|path| (&report, Path::new(path))))?;

    if !quiet {
        print_perspectives(&report);
        println!("{}", report);
        println!("Dataset saved to: {out}");
    }

    let mismatched = report.edges.iter().filter(|e| !e.sign_agrees()).count();
    if mismatched > 0 {
        log::warn!("{mismatched} causal edge(s) show a correlation sign opposite to the configured beta");
    }
    Ok(())
}

/// Pick the model: a JSON file, a named preset, or the canonical default.
fn select_config(config: Option<&str>, variant: Option<&str>) -> Result<ModelConfig> {
    match (config, variant) {
        (Some(_), Some(_)) => bail!("--config and --variant are mutually exclusive"),
        (Some(path), None) => ModelConfig::load(path),
        (None, Some(name)) => match Variant::parse(name) {
            Some(variant) => Ok(variant.config()),
            None => bail!("unknown variant '{name}' (expected canonical or raw)"),
        },
        (None, None) => Ok(ModelConfig::balanced_scorecard()),
    }
}

fn print_perspectives(report: &Report) {
    let perspectives = [
        Perspective::LearningGrowth,
        Perspective::InternalProcesses,
        Perspective::Customers,
        Perspective::Financial,
    ];
    for p in perspectives {
        println!("[{}] {}", p.prefix(), p.label());
        for c in Column::ALL.iter().filter(|c| c.perspective() == p) {
            let s = report.summary(*c);
            println!("    {} ({:<26}) mean: {:>10.3} | sd: {:>9.3}", c, c.label(), s.mean, s.std);
        }
    }
    println!();
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_canonical_model() {
        let cfg = select_config(None, None).unwrap();
        assert_eq!(cfg, ModelConfig::balanced_scorecard());
    }

    #[test]
    fn variant_flag_picks_preset() {
        assert_eq!(select_config(None, Some("raw")).unwrap(), ModelConfig::raw_variant());
        assert_eq!(
            select_config(None, Some("canonical")).unwrap(),
            ModelConfig::balanced_scorecard()
        );
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let err = select_config(None, Some("fancy")).unwrap_err();
        assert!(err.to_string().contains("unknown variant 'fancy'"), "got {err}");
    }

    #[test]
    fn config_and_variant_are_mutually_exclusive() {
        let err = select_config(Some("data/causal_model.json"), Some("raw")).unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"), "got {err}");
    }

    #[test]
    fn config_flag_loads_json_file() {
        let path = format!("{}/../data/causal_model.json", env!("CARGO_MANIFEST_DIR"));
        assert_eq!(select_config(Some(&path), None).unwrap(), ModelConfig::balanced_scorecard());
    }

    #[test]
    fn flag_value_reads_following_argument() {
        let args: Vec<String> = ["bsc-sim", "--seed", "7", "--quiet"].iter().map(|s| s.to_string()).collect();
        assert_eq!(flag_value(&args, "--seed"), Some("7"));
        assert_eq!(flag_value(&args, "--out"), None);
    }
}
