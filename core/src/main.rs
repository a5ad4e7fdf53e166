use clap::Parser;
use log::{error, info};
use octcat_core::cli::{Cli, OutputFormat};
use octcat_core::{discover_data_directories, BatchReport, Pipeline, TextReport};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    if !cli.input.is_dir() {
        eprintln!("Error: {} is not a directory", cli.input.display());
        process::exit(1);
    }

    let directories = match discover_data_directories(&cli.input, cli.recursive) {
        Ok(dirs) => dirs,
        Err(e) => {
            error!("Failed to read directory: {}", e);
            eprintln!("Error: Failed to read directory: {}", e);
            process::exit(1);
        }
    };

    if directories.is_empty() {
        eprintln!(
            "Error: No RIDE_ data directories found below {}",
            cli.input.display()
        );
        process::exit(1);
    }

    let acquisitions = cli.scan_type.acquisitions();
    info!(
        "Converting {} acquisition type(s) in {} director(ies)",
        acquisitions.len(),
        directories.len()
    );

    let pipeline = Pipeline::new(cli.pipeline_options());
    let report = pipeline.run_batch(&directories, &acquisitions);

    output_report(&report, cli.format);

    if report.all_failed() {
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn output_report(report: &BatchReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", TextReport::new(report));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = report;
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
