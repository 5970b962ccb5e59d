use anyhow::Result;
use campus_config::ConfigReader;
use campus_display::TitleFormat;
use campus_display::color::ColorMode;
use campus_main::{Cli, UI};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries results; logs go to stderr
    let default_filter = if cli.verbose { "campus=debug" } else { "campus=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    ColorMode::from_env().apply();

    let mut config = ConfigReader::new().read()?;
    if let Some(base_url) = cli.base_url.clone() {
        config = config.api_base_url(base_url);
    }
    tracing::debug!(base_url = %config.api_base_url, "Configuration loaded");

    if let Err(error) = UI::init(cli, config).run().await {
        eprintln!("{}", TitleFormat::error(format!("{error:#}")));
        std::process::exit(1);
    }

    Ok(())
}
