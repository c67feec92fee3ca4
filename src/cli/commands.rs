use chrono::Utc;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::dataset::{DatasetReader, DatasetWriter};
use crate::error::Result;
use crate::forecast::run_models;
use crate::providers::{collect_observations, default_providers};
use crate::utils::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Collect { output, start, end } => {
            let settings = Settings::from_env()?;
            let end = end.unwrap_or_else(|| Utc::now().date_naive());

            println!("Collecting observations...");
            println!(
                "Location: {:.3}°N {:.3}°E (station {})",
                settings.location.latitude, settings.location.longitude, settings.location.station
            );
            println!("Range: {} to {}", start, end);

            let providers = default_providers(&settings.credentials)?;

            let progress = ProgressReporter::new_spinner("Fetching providers...", false);
            let rows = collect_observations(
                &providers,
                &settings.location,
                start,
                end,
                Some(&progress),
            )
            .await;
            progress.finish_with_message(&format!("Fetched {} rows", rows.len()));

            let writer = DatasetWriter::new(&output);
            let added = writer.append(&rows)?;

            println!(
                "Added {} new rows ({} fetched) to {}",
                added,
                rows.len(),
                output.display()
            );
        }

        Commands::Train { dataset } => {
            println!("Training forecast models...");
            println!("Dataset: {}", dataset.display());

            let table = DatasetReader::new(&dataset).read()?;
            println!("Loaded {} rows", table.len());

            let report = run_models(&table);
            println!("\n{}", report);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "monolithos=debug"
    } else {
        "monolithos=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init so tests invoking run() twice do not panic.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
