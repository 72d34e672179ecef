use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use easel::app::AppContext;
use easel::cli::{commands, Cli, Commands};
use easel::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.data_dir, cli.db)?;

    match cli.command {
        Commands::List {
            window,
            category,
            search,
            sort,
        } => {
            commands::list_topics(&ctx, window, category, search, sort).await?;
        }
        Commands::Categories => {
            commands::list_categories(&ctx).await?;
        }
        Commands::Pick => {
            commands::pick_topic(&ctx).await?;
        }
        Commands::Done { id } => {
            commands::toggle_done(&ctx, &id).await?;
        }
        Commands::Add {
            title,
            category,
            new_category,
        } => {
            commands::add_topic(&ctx, &title, category, new_category).await?;
        }
        Commands::Tui => {
            let config = Config::load()?;
            easel::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
    }

    Ok(())
}
