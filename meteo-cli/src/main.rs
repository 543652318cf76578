use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::Connection;

/// Meteomatics weather query CLI tool
#[derive(Parser)]
#[command(name = "meteo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Provider username
    #[arg(short, long, env = "MM_USER", global = true, hide_env_values = true)]
    user: Option<String>,

    /// Provider password
    #[arg(short, long, env = "MM_PASS", global = true, hide_env_values = true)]
    password: Option<String>,

    /// Provider base URL
    #[arg(
        long,
        env = "MM_BASE_URL",
        default_value = meteo::client::DEFAULT_BASE_URL,
        global = true
    )]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "MM_TIMEOUT_SECS", default_value = "60", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a point time series
    Timeseries {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Start of the range (ISO-8601)
        #[arg(long)]
        start: String,

        /// End of the range (ISO-8601)
        #[arg(long)]
        end: String,

        /// Sampling step (ISO-8601 duration)
        #[arg(long, default_value = meteo::request::DEFAULT_STEP)]
        step: String,

        /// Provider parameter list
        #[arg(long, default_value = meteo::request::DEFAULT_PARAMS)]
        params: String,

        /// Output format
        #[arg(short, long, default_value = "json")]
        fmt: String,

        /// Write the payload to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch a bounding-box grid
    Grid {
        /// Latitude of the first corner
        #[arg(long, allow_negative_numbers = true)]
        lat1: f64,

        /// Longitude of the first corner
        #[arg(long, allow_negative_numbers = true)]
        lon1: f64,

        /// Latitude of the second corner
        #[arg(long, allow_negative_numbers = true)]
        lat2: f64,

        /// Longitude of the second corner
        #[arg(long, allow_negative_numbers = true)]
        lon2: f64,

        /// Latitude resolution in degrees
        #[arg(long, default_value = "0.05")]
        res_lat: f64,

        /// Longitude resolution in degrees
        #[arg(long, default_value = "0.05")]
        res_lon: f64,

        /// Valid time: "now" or an ISO-8601 timestamp
        #[arg(long, default_value = meteo::timestamp::NOW)]
        valid_time: String,

        /// Provider parameter list
        #[arg(long, default_value = meteo::request::DEFAULT_PARAMS)]
        params: String,

        /// Output format
        #[arg(short, long, default_value = "png")]
        fmt: String,

        /// Write the payload to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported output formats
    Formats {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let conn = Connection {
        user: cli.user,
        password: cli.password,
        base_url: cli.base_url,
        timeout_secs: cli.timeout,
    };

    match cli.command {
        Commands::Timeseries {
            lat,
            lon,
            start,
            end,
            step,
            params,
            fmt,
            output,
        } => {
            let request = meteo::TimeSeriesRequest::new(lat, lon, start, end)
                .step(step)
                .params(params)
                .fmt(fmt);
            commands::timeseries::run(&conn, request, output).await
        }
        Commands::Grid {
            lat1,
            lon1,
            lat2,
            lon2,
            res_lat,
            res_lon,
            valid_time,
            params,
            fmt,
            output,
        } => {
            let request = meteo::GridRequest::new(lat1, lon1, lat2, lon2)
                .resolution(res_lat, res_lon)
                .valid_time(valid_time)
                .params(params)
                .fmt(fmt);
            commands::grid::run(&conn, request, output).await
        }
        Commands::Formats { json } => commands::formats::run(json),
    }
}
