use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "monolithos")]
#[command(about = "Personal weather data collector and forecaster for Santorini Monolithos")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch observations from all providers and merge them into the dataset
    Collect {
        #[arg(
            short,
            long,
            default_value = "data/data.csv",
            help = "Dataset file path"
        )]
        output: PathBuf,

        #[arg(
            long,
            default_value = "2020-01-01",
            help = "First day of the historical range"
        )]
        start: NaiveDate,

        #[arg(long, help = "Last day of the historical range [default: today]")]
        end: Option<NaiveDate>,
    },

    /// Fit the forecast models over the dataset and print a report
    Train {
        #[arg(
            short,
            long,
            default_value = "data/data.csv",
            help = "Dataset file path"
        )]
        dataset: PathBuf,
    },
}
