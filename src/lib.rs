pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod services;
pub mod state;

pub use config::Config;

use cli::{Cli, Commands, commands};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;
    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::cmd_serve(config).await,
        Commands::IssueToken { email } => commands::cmd_issue_token(config, &email).await,
        Commands::Stats => commands::cmd_stats(&config).await,
        Commands::CheckConfig => commands::cmd_check_config(&config),
        Commands::Init => commands::cmd_init(),
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides `general.log_level`.
fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // A subscriber may already be set when running under a test harness.
    let _ = if config.general.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
}
