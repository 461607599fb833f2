use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use streetlapse::{
    GoogleDirections, GoogleImagery, GoogleRoads, OutputLayout, RouteConfig, RouteProcessor,
};

#[derive(Parser)]
#[command(name = "streetlapse")]
#[command(about = "Download street-level and overhead imagery along a driving route")]
struct Cli {
    /// Route origin (address or "lat,lon")
    origin: String,

    /// Route destination (address or "lat,lon")
    destination: String,

    /// Google Maps API key
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Sampling interval along the route, in meters
    #[arg(long, default_value_t = 5.0)]
    interval: f64,

    /// Maximum points per snap-to-roads request
    #[arg(long, default_value_t = 100)]
    snap_batch: usize,

    /// Requested image size, WIDTHxHEIGHT
    #[arg(long, default_value = "640x640")]
    image_size: String,

    /// Street view field of view, in degrees
    #[arg(long, default_value_t = 70)]
    fov: u8,

    /// Base directory for the output image tree
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let config = RouteConfig {
        interval_meters: cli.interval,
        snap_batch_size: cli.snap_batch,
        ..RouteConfig::default()
    };

    let client = reqwest::Client::new();
    let directions = GoogleDirections::new(client.clone(), cli.api_key.clone());
    let snapper = GoogleRoads::new(client.clone(), cli.api_key.clone());
    let imagery = GoogleImagery::new(client, cli.api_key, cli.image_size, cli.fov);
    let layout = OutputLayout::new(&cli.output, config.map_layers.len());

    let processor = RouteProcessor::new(config, directions, snapper, imagery, layout);

    info!("Processing route {} -> {}", cli.origin, cli.destination);
    let summary = processor.process(&cli.origin, &cli.destination).await?;

    info!(
        "Done: {} route points, {} street views saved, {} maps saved",
        summary.point_count, summary.street_views_saved, summary.maps_saved
    );
    if !summary.dropped_chunks.is_empty() {
        warn!(
            "Snapping dropped chunks {:?}; route coverage has gaps",
            summary.dropped_chunks
        );
    }

    Ok(())
}
