use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdaily::app::AppContext;
use newsdaily::cli::{commands, Cli, Commands, SlackAction};
use newsdaily::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    cli.apply_overrides(&mut config);
    let ctx = AppContext::new(config)?;

    match &cli.command {
        Commands::Stats => {
            commands::show_stats(&ctx).await?;
        }
        Commands::Topics => {
            commands::list_topics();
        }
        Commands::Subscribe { email } => {
            commands::subscribe(&ctx, email).await?;
        }
        Commands::Preferences(args) => {
            commands::update_preferences(&ctx, args).await?;
        }
        Commands::Slack { action } => match action {
            SlackAction::Guide { open } => {
                commands::slack_guide(*open)?;
            }
        },
    }

    Ok(())
}
