//! Stockroom admin CLI entrypoint.

use clap::Parser;

mod commands;
mod config;
mod handlers;

use commands::{CategoryCommands, Commands, ConfigCommands, ProductCommands};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Stockroom inventory admin", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = CliConfig::load().unwrap_or_default();

    match cli.command {
        Commands::Login => handlers::login(&config).await?,
        Commands::Logout => handlers::logout()?,
        Commands::Dashboard => handlers::dashboard(&config).await?,
        Commands::Products { command } => match command {
            ProductCommands::List { page } => handlers::list_products(&config, &page).await?,
            ProductCommands::Add => handlers::add_product(&config).await?,
            ProductCommands::Edit { id } => handlers::edit_product(&config, &id).await?,
            ProductCommands::Delete { id, yes } => {
                handlers::delete_product(&config, &id, yes).await?
            }
        },
        Commands::Categories { command } => match command {
            CategoryCommands::List { page } => handlers::list_categories(&config, &page).await?,
            CategoryCommands::Add => handlers::add_category(&config).await?,
            CategoryCommands::Edit { id } => handlers::edit_category(&config, &id).await?,
            CategoryCommands::Delete { id, yes } => {
                handlers::delete_category(&config, &id, yes).await?
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => handlers::show_config(&config)?,
            ConfigCommands::Set { key, value } => handlers::set_config(&key, &value)?,
        },
    }

    Ok(())
}
