use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vernissage::query::{CollectionQuery, StatusFilter, Viewer, collections_for};
use vernissage::shortcodes::EmailAttrs;
use vernissage::store::{ContentStore, ItemId, MemoryStore};
use vernissage::{config, gallery, output, present, shortcodes};

#[derive(Parser)]
#[command(name = "vernissage")]
#[command(about = "Collection and gallery data assembly for photo portfolio sites")]
#[command(long_about = "\
Collection and gallery data assembly for photo portfolio sites

A site snapshot is the data source: a JSON document holding the site's
options, content items with their field values, and attachments with their
renditions. The same assembly code a host embeds runs here against the
snapshot, which makes it the debugging surface for template data.

Snapshot structure:

  {
    \"options\": {                       # Site-wide string options
      \"contact_email\": \"hi@example.com\",
      \"front_page\": \"9\"               # Item whose rows feed the background
    },
    \"items\": [
      {
        \"id\": 31, \"kind\": \"collection\", \"title\": \"Dusk\",
        \"status\": \"published\",         # Drafts hidden from anonymous viewers
        \"modified\": \"2024-05-11T10:03:00\",
        \"fields\": {
          \"images\": { \"type\": \"relationship\", \"ids\": [71, 72] }
        }
      }
    ],
    \"attachments\": [
      {
        \"id\": 71, \"title\": \"Dawn\", \"width\": 2048, \"height\": 1365,
        \"variants\": {                  # Renditions by size name
          \"full\": { \"url\": \"/media/dawn.jpg\", \"width\": 2048, \"height\": 1365 }
        }
      }
    ]
  }

Collections carry images either as a relationship field (\"images\") or as
flexible-content gallery rows (\"flexible_content\"); one shape per site.

Run 'vernissage gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site snapshot JSON file
    #[arg(long, default_value = "site.json", global = true)]
    snapshot: PathBuf,

    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Query as an authenticated viewer (drafts become visible)
    #[arg(long, global = true)]
    authenticated: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List collections in front-page order
    Collections,
    /// Show the presented gallery for one collection
    Gallery {
        /// Collection item id
        id: u64,
        /// Only images added within the configured newest window
        #[arg(long)]
        newest: bool,
    },
    /// Render the [email] shortcode
    Email {
        /// Address to render; the snapshot's contact_email option when omitted
        address: Option<String>,
        /// Render a plain <span> instead of a link
        #[arg(long)]
        no_link: bool,
        /// Custom link text
        #[arg(long)]
        text: Option<String>,
    },
    /// Validate the snapshot without rendering
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config_dir)?;
    let store = MemoryStore::load(&cli.snapshot)?;
    let viewer = if cli.authenticated {
        Viewer::Authenticated
    } else {
        Viewer::Anonymous
    };

    match cli.command {
        Command::Collections => {
            let collections = collections_for(&store, viewer);
            output::print_collections(&store, &collections);
        }
        Command::Gallery { id, newest } => {
            let id = ItemId(id);
            let ids = if newest {
                gallery::newest_attachment_ids(&store, id, config.gallery.newest_window_days)
            } else {
                let direct = gallery::collection_image_ids(&store, id);
                if direct.is_empty() {
                    gallery::all_attachment_ids(&store, id)
                } else {
                    direct
                }
            };
            let images = present::present(
                &store,
                &ids,
                &config.gallery,
                &present::ImageAttrs::default(),
            );
            let title = collection_title(&store, id);
            output::print_gallery(&title, &images);
        }
        Command::Email {
            address,
            no_link,
            text,
        } => {
            let attrs = EmailAttrs {
                address,
                link: !no_link,
                text: text.unwrap_or_default(),
                ..EmailAttrs::default()
            };
            let element = shortcodes::email_shortcode(&store, &config.shortcodes, &attrs);
            output::print_email(&element);
        }
        Command::Check => {
            println!("==> Checking {}", cli.snapshot.display());
            output::print_check(&store);
        }
        Command::GenConfig => unreachable!("handled before snapshot loading"),
    }

    Ok(())
}

/// Title of a collection across all statuses, or a numbered fallback.
fn collection_title(store: &MemoryStore, id: ItemId) -> String {
    let query = CollectionQuery {
        status: StatusFilter::Any,
        ..CollectionQuery::default()
    };
    store
        .collections(&query)
        .into_iter()
        .find(|c| c.id == id)
        .map(|c| c.title)
        .unwrap_or_else(|| format!("Collection {id}"))
}
