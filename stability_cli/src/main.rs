//! # Trimline CLI
//!
//! Computes one loading condition from the terminal.
//!
//! ```text
//! stability_cli [condition.json] [report.json]
//! ```
//!
//! Without arguments the built-in demo condition is computed. The summary
//! goes to stdout followed by the JSON report; with a second argument the
//! report is also saved to that path. Hard failures print the error and its
//! JSON form to stderr and exit non-zero. Log level comes from `RUST_LOG`
//! (default `info`).

use std::path::Path;
use std::process::ExitCode;

use stability_core::criteria::Outcome;
use stability_core::file_io::{load_condition, save_report};
use stability_core::loading::{LongitudinalPosition, TankFill};
use stability_core::pipeline::{compute_condition, ConditionInput, ConditionReport};
use stability_core::ship::{ShipProfile, TankCategory, TankDefinition};
use stability_core::validation::{CalculationStatus, Severity};
use stability_core::StabilityError;

/// Demo: 100 m x 18 m hull, one 500 m³ fresh-water tank half full.
fn demo_condition() -> ConditionInput {
    let ship = ShipProfile::new("MV Demo Carrier")
        .with_dimensions(100.0, 18.0, 9.0, 6.0)
        .with_block_coefficient(0.78)
        .with_tank(
            TankDefinition::new("FW1", "Fresh Water 1", TankCategory::FreshWater, 500.0, 1.0)
                .at(LongitudinalPosition::Fraction(0.5), 5.0, 0.0),
        );
    ConditionInput::new("Demo condition", ship).with_fill(TankFill::new("FW1", 0.5))
}

fn run(args: &[String]) -> Result<ConditionReport, StabilityError> {
    let input = match args.first() {
        Some(path) => load_condition(Path::new(path))?,
        None => {
            log::info!("no condition file given, running the demo condition");
            demo_condition()
        }
    };

    let report = compute_condition(&input)?;
    if let Some(out) = args.get(1) {
        save_report(&report, Path::new(out))?;
    }
    Ok(report)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args) {
        Ok(report) => {
            print_summary(&report);

            println!();
            println!("JSON Output:");
            if let Ok(json) = serde_json::to_string_pretty(&report) {
                println!("{}", json);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error [{}]: {}", e.error_code(), e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_summary(report: &ConditionReport) {
    let eq = &report.equilibrium;

    println!("═══════════════════════════════════════");
    println!("  {} / {}", report.ship_name, report.condition_name);
    println!("═══════════════════════════════════════");
    println!();
    println!("Equilibrium:");
    println!("  Displacement: {:>10.1} t", eq.displacement_t);
    println!(
        "  Draft:        {:>10.3} m (aft {:.3}, fwd {:.3}){}",
        eq.draft_mean_m,
        eq.draft_aft_m,
        eq.draft_fwd_m,
        if eq.draft_out_of_table { " [extrapolated]" } else { "" }
    );
    if eq.trim_applicable {
        println!("  Trim:         {:>+10.3} m", eq.trim_m);
    } else {
        println!("  Trim:                N/A");
    }
    println!("  Heel:         {:>+10.2} deg", eq.heel_deg);
    println!();
    println!("Stability:");
    println!("  KM = {:.3} m   KG = {:.3} m", eq.km_m, eq.kg_m);
    println!("  GM = {:.3} m   GG' = {:.3} m", eq.gm_m, eq.free_surface_correction_m);
    println!("  GM (effective) = {:.3} m", eq.gm_effective_m);
    println!();

    let alarms: Vec<_> = report.validation.alarms.iter().filter(|a| a.applicable).collect();
    if !alarms.is_empty() {
        println!("Alarms:");
        for alarm in alarms {
            let tag = match alarm.severity {
                Severity::Error => "[FAIL]",
                Severity::Warning => "[WARN]",
                Severity::Info => "[INFO]",
            };
            println!("  {} {}: {}", tag, alarm.code, alarm.message);
        }
        println!();
    }

    println!("Criteria:");
    for c in &report.criteria.results {
        let tag = match c.outcome {
            Outcome::Pass => "[OK]  ",
            Outcome::Fail => "[FAIL]",
            Outcome::NotApplicable => "[N/A] ",
        };
        println!("  {} {:<14} {}", tag, c.code, c.message);
    }
    println!();

    println!("═══════════════════════════════════════");
    println!(
        "  STATUS: {} {}",
        report.validation.status.as_str(),
        status_icon(report.validation.status != CalculationStatus::Failed)
    );
    println!("  {}", report.criteria_summary);
    println!("═══════════════════════════════════════");
    println!("  {}", report.disclaimer);
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
