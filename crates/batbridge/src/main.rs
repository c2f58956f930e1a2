//! batbridge: Batrium WatchMon UDP broadcast listener.

use batbridge::{
    run_udp_listener, Bridge, BridgeConfig, BridgeError, LogSink, PublishSink, StateAggregator,
    NodeTracker, StatePublisher,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Listen for Batrium WatchMon UDP broadcasts and maintain a continuously
/// merged telemetry state.
#[derive(Debug, Parser)]
#[command(name = "batbridge", version)]
struct Cli {
    /// Path to a JSON options file. Environment variables override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter override (tracing env-filter syntax).
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), BridgeError> {
    let cli = Cli::parse();

    let mut config = BridgeConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("batbridge starting, system_name={}", config.system_name);

    let aggregator = Arc::new(StateAggregator::new());
    let tracker = Arc::new(NodeTracker::new());
    let sink: Arc<dyn PublishSink> = Arc::new(LogSink::new());
    let bridge = Arc::new(Bridge::new(
        aggregator.clone(),
        tracker.clone(),
        sink.clone(),
    ));

    let mut publisher = StatePublisher::start(
        aggregator,
        sink,
        Duration::from_millis(config.publish_interval_ms.max(1)),
    );

    let mut listener = tokio::spawn(run_udp_listener(bridge, config.udp_port));

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
        result = &mut listener => {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("UDP listener failed: {}", e),
                Err(e) => error!("UDP listener task panicked: {}", e),
            }
        }
    }

    listener.abort();
    publisher.stop();
    info!("batbridge stopped");
    Ok(())
}
