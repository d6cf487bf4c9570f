//! hadoop-jmx-exporter - Prometheus exporter for Hadoop JMX servlets
//!
//! This binary serves a Prometheus-compatible metrics endpoint backed by
//! the `/jmx` servlet of a Hadoop, HBase or YARN daemon.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use hadoop_jmx_exporter::{cli::Cli, config::Config, server};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.validate {
        let mut config = Config::load(&cli.config)?;
        cli.apply_overrides(&mut config);
        config.validate()?;
        println!("Configuration is valid");
        return Ok(());
    }

    hadoop_jmx_exporter::init_logging(&cli.log_level.to_string())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting hadoop-jmx-exporter"
    );

    let mut config = Config::load_or_default(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    info!(
        target_url = %config.hadoop.url,
        module = %config.hadoop.module,
        "Default scrape target"
    );

    server::run(config).await?;

    Ok(())
}
