use anyhow::Result;
use clap::Parser;

use keybridge::cli::{CliArgs, RunConfig};
use keybridge::config::ToolConfig;
use keybridge::keymap::OMISSION_WARNING;
use keybridge::pipeline::{run_capture, run_convert, run_diff};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    keybridge::tracing::init();

    let tool = ToolConfig::load();
    match args.into_config(&tool)? {
        RunConfig::Convert(config) => {
            let summary = run_convert(&config)?;
            let record = &summary.record;
            println!(
                "Converted {} bindings, unbound {}, skipped {}, collisions {}",
                record.converted,
                record.unbound,
                record.skipped.len(),
                record.collisions.len()
            );
            if !summary.manual_loaded {
                println!("No manual overrides merged");
            }
            println!("Wrote auto keymap: {}", config.auto_output.display());
            println!(
                "Wrote final keymap: {} ({} bindings, {})",
                config.output.display(),
                summary.final_bindings,
                summary.final_changes
            );
            println!("Wrote report: {}", config.report.display());
        }
        RunConfig::Capture(config) => {
            let summary = run_capture(&config)?;
            println!("Captured keymap from: {}", config.input.display());
            if summary.auto_loaded {
                println!("Auto baseline: {}", config.auto_input.display());
            } else {
                println!(
                    "Auto keymap not found, using empty baseline: {}",
                    config.auto_input.display()
                );
            }
            println!("Wrote manual overrides: {}", config.manual_output.display());
            println!("Wrote final keymap: {}", config.final_output.display());
            println!(
                "Manual override summary: overrides={} {}",
                summary.override_count, summary.manual_diff
            );
            println!("Note: {}", OMISSION_WARNING);
        }
        RunConfig::Diff(config) => {
            let diff = run_diff(&config)?;
            if config.list {
                for entry in &diff.entries {
                    println!("{}", entry);
                }
            }
            println!("{}, unchanged={}", diff, diff.unchanged);
        }
    }

    Ok(())
}
