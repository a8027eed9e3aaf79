mod feed;
mod flight;
mod geo;
mod route;
mod tracker;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::route::Route;
use crate::tracker::{poll_once, Tracker};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "flight-o-mat")]
#[command(about = "Live tracker for a single long-haul flight")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the feed once and print the flight state
    Status {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Run the poller and serve the HTTP API
    Serve {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Validate a config file
    Validate { config: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status { config } => status(config.as_deref()).await,
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Validate { config } => validate(&config),
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    let Some(path) = path else {
        return Some(Config::default());
    };
    match Config::from_file(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            None
        }
    }
}

fn validate(path: &str) -> ExitCode {
    let Some(config) = load_config(Some(path)) else {
        return ExitCode::FAILURE;
    };

    let bbox = config.feed.bounding_box;
    println!("Config is valid");
    println!("  feed: {}", config.feed.url);
    println!(
        "  poll interval: {}",
        humantime::format_duration(config.feed.poll_interval)
    );
    println!(
        "  bounding box: lat {}..{}, lon {}..{}",
        bbox.lamin, bbox.lamax, bbox.lomin, bbox.lomax
    );
    println!(
        "  matching: {} (fallback prefix {}) above {} m",
        config.matching.identifiers.join(", "),
        config.matching.carrier_prefix,
        config.matching.min_altitude_m
    );
    ExitCode::SUCCESS
}

async fn status(path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let client = match config.feed_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error creating feed client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracker = Tracker::new(Route::default());
    let result = poll_once(&client, &config.matching, tracker.route()).await;
    tracker.apply(result);
    let status = tracker.status();
    let flight = &status.flight;

    if let Some(message) = &status.message {
        println!("{}", message);
    }
    match flight.position {
        Some(pos) => {
            println!(
                "{} over {} ({:.4}, {:.4})",
                flight.callsign.as_deref().unwrap_or("Unknown"),
                flight.region_label,
                pos.latitude,
                pos.longitude
            );
            println!("  altitude: {} ft", flight.altitude_feet);
            println!("  speed:    {} mph", flight.speed_mph);
            println!("  progress: {:.1}%", flight.progress_fraction * 100.0);
            if status.eta.is_unknown() {
                println!("  eta:      unknown");
            } else {
                println!("  eta:      {}", status.eta);
            }
        }
        None => println!("Searching for flight ({})", status.outcome),
    }

    if flight.is_live {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
