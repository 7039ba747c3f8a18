use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_WINDOW_HALF_WIDTH;

#[derive(Parser)]
#[command(name = "climo-rank")]
#[command(about = "Climatological percentile classifier and heatmap state engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        default_value = "data",
        help = "Root of the station config, observation and history stores"
    )]
    pub data_dir: PathBuf,

    #[arg(
        long,
        global = true,
        default_value = "output",
        help = "Root for result records and renderer grids"
    )]
    pub output_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process every configured station and persist its outputs
    Run {
        #[arg(long, help = "Override the target date [default: each station's local today]")]
        date: Option<NaiveDate>,

        #[arg(
            short,
            long,
            default_value_t = DEFAULT_WINDOW_HALF_WIDTH,
            help = "Half-width of the climatology window in days"
        )]
        window: i64,

        #[arg(short, long, help = "Process only this station id")]
        station_id: Option<String>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, default_value = "false", help = "Memory-map history files")]
        mmap: bool,

        #[arg(long, default_value = "false", help = "Suppress the progress bar")]
        quiet: bool,
    },

    /// Classify one station and print its result without writing anything
    Classify {
        #[arg(short, long)]
        station_id: String,

        #[arg(long, help = "Override the target date [default: the station's local today]")]
        date: Option<NaiveDate>,

        #[arg(
            short,
            long,
            default_value_t = DEFAULT_WINDOW_HALF_WIDTH,
            help = "Half-width of the climatology window in days"
        )]
        window: i64,
    },

    /// Print a station's stored percentile grid for a year
    Show {
        #[arg(short, long)]
        station_id: String,

        #[arg(short, long, help = "Year of the store [default: the station's current year]")]
        year: Option<i32>,
    },
}
