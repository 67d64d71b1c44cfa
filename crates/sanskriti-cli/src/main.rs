use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sanskriti_application::{FavoritesStore, PreferenceStore};
use sanskriti_core::theme::{SystemAppearance, ThemeMode};
use sanskriti_infrastructure::logging::init_tracing;
use sanskriti_infrastructure::{
    AppConfig, BuiltinCatalog, FileKeyValueStore, ManualAppearance, SanskritiPaths,
};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

mod commands;

#[derive(Parser)]
#[command(name = "sanskriti")]
#[command(about = "SanskritiAR CLI - browse heritage sites, manage favorites and theme", long_about = None)]
struct Cli {
    /// Keep config, storage and logs under this directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List heritage sites, optionally filtered
    Sites {
        /// Text matched against name and location
        #[arg(long, short)]
        query: Option<String>,
        /// State name, or "all"
        #[arg(long)]
        state: Option<String>,
        /// Category id (monument, temple, fort, palace, natural), or "all"
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one heritage site
    Site { id: String },
    /// List site categories
    Categories,
    /// List states that have sites
    States,
    /// Manage favorite sites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Manage the display theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorite sites
    List,
    /// Add or remove a site
    Toggle { id: String },
    /// Remove all favorites
    Clear,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the current theme
    Show,
    /// Set the theme mode
    Set {
        #[arg(value_parser = ThemeMode::from_str)]
        mode: ThemeMode,
    },
    /// Switch between light and dark
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default(&SanskritiPaths::new(cli.data_dir.clone()))?,
    };
    let paths = config.resolve_paths(cli.data_dir.clone());
    let _log_guard = init_tracing(&config.logging, paths.log_dir().ok().as_deref());

    let catalog = BuiltinCatalog;

    match cli.command {
        Commands::Sites {
            query,
            state,
            category,
        } => commands::sites::list(&catalog, query, state, category)?,
        Commands::Site { id } => {
            let favorites = FavoritesStore::load(open_storage(&paths)?).await;
            commands::sites::show(&catalog, &favorites, &id)?
        }
        Commands::Categories => commands::sites::categories(&catalog),
        Commands::States => commands::sites::states(&catalog),
        Commands::Favorites { action } => {
            let favorites = FavoritesStore::load(open_storage(&paths)?).await;
            match action {
                FavoritesAction::List => commands::favorites::list(&favorites, &catalog),
                FavoritesAction::Toggle { id } => {
                    commands::favorites::toggle(&favorites, &catalog, &id).await?
                }
                FavoritesAction::Clear => commands::favorites::clear(&favorites).await,
            }
        }
        Commands::Theme { action } => {
            let appearance = ManualAppearance::default();
            let preferences =
                PreferenceStore::load(open_storage(&paths)?, appearance.color_scheme()).await;
            match action {
                ThemeAction::Show => commands::theme::show(&preferences),
                ThemeAction::Set { mode } => commands::theme::set(&preferences, mode).await,
                ThemeAction::Toggle => commands::theme::toggle(&preferences).await,
            }
        }
    }

    Ok(())
}

fn open_storage(paths: &SanskritiPaths) -> Result<Arc<FileKeyValueStore>> {
    let store = FileKeyValueStore::from_paths(paths).context("Failed to resolve storage path")?;
    tracing::debug!("[CLI] Using storage at {:?}", store.path());
    Ok(Arc::new(store))
}
