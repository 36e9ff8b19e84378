//! che-gather - collect diagnostic data from Eclipse Che / OpenShift Dev Spaces

use anyhow::Result;
use che_gather::cli::{exit_code, Cli};
use che_gather::{commands, config, output};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = exit_code(&e);
            e.print()?;
            std::process::exit(code);
        }
    };

    // Setup tracing
    setup_tracing(cli.verbose);

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            output::error(e.to_string());
            std::process::exit(1);
        }
    };

    // Handle color settings
    if cli.no_color || !config.colors {
        owo_colors::set_override(false);
    }

    if let Err(e) = commands::run_gather(&cli, &config).await {
        output::error(e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
