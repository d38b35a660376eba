use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wishlist_api::{DownloadedFilter, FilterState, ItemDraft, ItemId, WishlistClient, WishlistItem};
use wishlist_core::{Config, Controller};
use wishlist_tui::App;

#[derive(Parser)]
#[command(name = "wishlist")]
#[command(version, about = "Terminal client for a remote wishlist", long_about = None)]
struct Cli {
    /// API base URL, including the /api prefix
    #[arg(long, global = true, env = "WISHLIST_API_URL")]
    api_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file (the TUI discards logs otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive wishlist (default)
    Tui,
    /// Print wishlist items, optionally filtered
    List {
        /// Match item names containing this text
        #[arg(long)]
        query: Option<String>,
        /// Only items in this category
        #[arg(long)]
        category: Option<String>,
        /// Only downloaded (true) or not downloaded (false) items
        #[arg(long)]
        downloaded: Option<bool>,
    },
    /// Add an item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Mark the item as already downloaded
        #[arg(long)]
        downloaded: bool,
    },
    /// Delete an item by id
    Delete { id: ItemId },
    /// Flip the downloaded flag of an item
    Toggle { id: ItemId },
    /// Check that the backend is reachable
    Health,
    /// Show the effective configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    init_logging(cli.log_file.as_deref(), matches!(command, Commands::Tui))?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }

    match command {
        Commands::Tui => {
            tracing::info!("Starting TUI against {}", config.api.base_url);
            let controller = Controller::new(Arc::new(config.build_client()?));
            wishlist_tui::run_tui(App::new(controller), config.ui.mouse_enabled).await?;
        }
        Commands::List {
            query,
            category,
            downloaded,
        } => {
            let mut controller = Controller::new(Arc::new(config.build_client()?));
            controller.set_filters(FilterState {
                search_term: query.unwrap_or_default(),
                category: category.unwrap_or_default(),
                downloaded: DownloadedFilter::from(downloaded),
            });
            // Unfiltered listing does not count as a filter change
            if controller.outstanding() == 0 {
                controller.refresh();
            }
            settle(&mut controller).await?;

            let items = &controller.state().items;
            if items.is_empty() {
                println!("No items in your wishlist. Add some!");
            }
            for item in items {
                print_item(item);
            }
        }
        Commands::Add {
            name,
            description,
            url,
            category,
            downloaded,
        } => {
            let draft = ItemDraft::new(name)
                .description(description)
                .url(url)
                .category(category)
                .downloaded(downloaded);

            let mut controller = Controller::new(Arc::new(config.build_client()?));
            controller.add(draft);
            settle(&mut controller).await?;
            println!("Added. {} items in wishlist.", controller.state().items.len());
        }
        Commands::Delete { id } => {
            let mut controller = Controller::new(Arc::new(config.build_client()?));
            controller.delete(id);
            settle(&mut controller).await?;
            println!("Deleted item {}", id);
        }
        Commands::Toggle { id } => {
            let client = Arc::new(config.build_client()?);
            let updated = toggle_item(client, id).await?;
            print_item(&updated);
        }
        Commands::Health => {
            let client: WishlistClient = config.build_client()?;
            if client.health().await? {
                println!("{} is healthy", client.base_url());
            } else {
                anyhow::bail!("{} reported an unhealthy status", client.base_url());
            }
        }
        Commands::Config { init } => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => Config::config_path()?,
            };
            if init && !path.exists() {
                Config::default().save_to(&path)?;
                println!("Wrote default config to {}", path.display());
            }
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Run until the controller is idle, turning a view error into a failure
async fn settle(controller: &mut Controller) -> anyhow::Result<()> {
    controller.settle().await;
    match controller.state().error_message() {
        Some(message) => anyhow::bail!(message),
        None => Ok(()),
    }
}

/// Look the item up directly, flip its downloaded flag through the
/// controller, then read it back
async fn toggle_item(client: Arc<WishlistClient>, id: ItemId) -> anyhow::Result<WishlistItem> {
    let item = client
        .get(id)
        .await
        .with_context(|| format!("Failed to look up item {}", id))?;

    let mut controller = Controller::new(client.clone());
    controller.toggle_downloaded(&item);
    settle(&mut controller).await?;

    Ok(client.get(id).await?)
}

fn print_item(item: &WishlistItem) {
    let status = if item.downloaded {
        "Downloaded"
    } else {
        "Not Downloaded"
    };
    match item.category_label() {
        Some(category) => println!("{:>5}  {}  [{}]  ({})", item.id.0, item.name, category, status),
        None => println!("{:>5}  {}  ({})", item.id.0, item.name, status),
    }
    if let Some(description) = item.description_text() {
        println!("       {}", description);
    }
    if let Some(url) = item.url_text() {
        println!("       {}", url);
    }
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wishlist=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        // Anything written to the terminal would tear through the TUI
        None if interactive => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    Ok(())
}
