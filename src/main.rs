use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use image_resizer::cli::Args;
use image_resizer::json_output::{JsonMessage, JsonProgress};
use image_resizer::utils::{create_progress_bar, format_duration, validate_input_dir};
use image_resizer::{BatchProcessor, FileOutcome};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    validate_input_dir(&args.input_dir)?;
    let config = args.batch_config();
    let processor = BatchProcessor::new(config).context("Invalid batch configuration")?;

    if args.json_progress {
        let report = processor.run(&JsonProgress)?;
        for message in JsonMessage::from_report(&report) {
            message.emit();
        }
        return Ok(());
    }

    println!("{}", style("Image Resizer").bold().blue());
    println!(
        "  {} -> {} at {}",
        args.input_dir.display(),
        args.output_dir.display(),
        args.target_size()
    );
    println!();

    let progress_bar = create_progress_bar();
    progress_bar.set_message("Resizing");
    let report = processor.run(&progress_bar)?;
    progress_bar.finish_with_message("Resizing completed");

    println!();
    println!(
        "{} {} written, {} skipped, {} failed in {}",
        style("Done:").bold().green(),
        report.written(),
        report.skipped(),
        report.failed(),
        format_duration(report.duration)
    );

    for (path, outcome) in &report.entries {
        match outcome {
            FileOutcome::Written { .. } => {}
            FileOutcome::SkippedUnreadable { reason } => {
                println!("  {} {}", style("unreadable").yellow(), reason);
            }
            FileOutcome::SkippedDegenerate { reason } => {
                println!("  {} {}: {}", style("dropped").yellow(), path.display(), reason);
            }
            FileOutcome::Failed { reason } => {
                println!("  {} {}: {}", style("failed").red().bold(), path.display(), reason);
            }
        }
    }

    Ok(())
}
