//! Rental Catalog CLI
//!
//! Inspect configuration and run listing or search queries against the
//! configured content source. For the HTTP API, use `rental-catalog-server`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use rental_catalog::{
    config::{DEFAULT_CONFIG_PATH, load_config},
    error::Result,
    listing::{PageRequest, PostFilters, PostQuery, SortMode, VehicleFilters, VehicleQuery},
    models::{Config, SourceBackend},
    services::Catalog,
    utils::log as report,
};

/// Rental Catalog - vehicles, blog and search over a hosted CMS
#[derive(Parser, Debug)]
#[command(
    name = "rental-catalog",
    version,
    about = "Car rental catalog: listings, blog and search suggestions"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration
    Validate,

    /// Show configuration and content source info
    Info,

    /// List vehicles with filters, sorting and pagination
    Vehicles(VehicleArgs),

    /// Show search suggestions for a query
    Search {
        /// Text typed into the search box
        query: String,

        /// Maximum vehicles to return
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List published blog posts
    Posts(PostArgs),
}

#[derive(Args, Debug)]
struct VehicleArgs {
    /// Category slug
    #[arg(long)]
    category: Option<String>,

    /// Brand slug
    #[arg(long)]
    brand: Option<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    /// Passenger count; 6 means six or more
    #[arg(long)]
    passengers: Option<u32>,

    #[arg(long)]
    min_year: Option<u16>,

    #[arg(long)]
    max_year: Option<u16>,

    /// Free-text filter
    #[arg(short, long)]
    query: Option<String>,

    /// price-asc, price-desc, rating-desc or recommended
    #[arg(long, default_value = "recommended")]
    sort: String,

    #[arg(long)]
    page: Option<usize>,

    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Args, Debug)]
struct PostArgs {
    /// Category slug
    #[arg(long)]
    category: Option<String>,

    /// Tag slug
    #[arg(long)]
    tag: Option<String>,

    /// Free-text search
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    page: Option<usize>,

    #[arg(long)]
    page_size: Option<usize>,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(&cli.config);
    init_logging(cli.verbose, &loaded.config.logging.level);
    loaded.log_warnings();
    let config = loaded.config;
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            report::success("Config OK");
        }

        Command::Info => {
            print_info(&cli.config, &config);

            let config = Arc::new(config);
            let catalog = Catalog::from_config(Arc::clone(&config))?;
            let counts = catalog.counts(&config).await;
            report::summary(
                "Content",
                &[
                    ("Vehicles", counts.vehicles.to_string()),
                    ("Brands", counts.brands.to_string()),
                    ("Vehicle categories", counts.categories.to_string()),
                    ("Published posts", counts.published_posts.to_string()),
                ],
            );
        }

        Command::Vehicles(args) => {
            let config = Arc::new(config);
            let catalog = Catalog::from_config(Arc::clone(&config))?;
            let query = args.into_query(&config);

            let page = catalog.vehicles.filtered(&query).await;
            report::header(&format!(
                "Vehicles (page {}/{}, sort {})",
                page.page,
                page.total_pages.max(1),
                query.sort
            ));
            for vehicle in &page.items {
                report::sub_item(&format!(
                    "{:<32} {:<12} {:<10} {:>8.0}/day  ★{:.1} ({})",
                    vehicle.id, vehicle.brand, vehicle.category, vehicle.price, vehicle.rating, vehicle.reviews
                ));
            }
            report::summary(
                "Listing",
                &[
                    ("Matching vehicles", page.total.to_string()),
                    ("Shown", page.items.len().to_string()),
                    ("Source", catalog.source_name().to_string()),
                ],
            );
        }

        Command::Search { query, limit } => {
            let catalog = Catalog::from_config(Arc::new(config))?;
            let suggestions = catalog.vehicles.suggest(&query, limit).await;

            report::header(&format!("Suggestions for \"{}\"", query));
            for hit in &suggestions.vehicles {
                report::sub_item(&format!(
                    "{:<32} score {:.4}  [{}]",
                    hit.id,
                    hit.search_score,
                    hit.matched_fields.join(", ")
                ));
            }
            report::summary(
                "Search",
                &[
                    ("Vehicles", suggestions.vehicles.len().to_string()),
                    ("Brands", suggestions.brands.join(", ")),
                    ("Categories", suggestions.categories.join(", ")),
                ],
            );
        }

        Command::Posts(args) => {
            let config = Arc::new(config);
            let catalog = Catalog::from_config(Arc::clone(&config))?;
            let query = args.into_query(&config);

            let page = catalog.blog.posts(&query).await;
            report::header(&format!("Blog posts (page {}/{})", page.page, page.total_pages.max(1)));
            for post in &page.items {
                report::sub_item(&format!(
                    "{}  {}  ({} min)",
                    post.publish_date, post.title, post.reading_time
                ));
            }
            report::summary("Blog", &[("Published posts", page.total.to_string())]);
        }
    }

    Ok(())
}

fn print_info(path: &std::path::Path, config: &Config) {
    report::header("Rental Catalog");
    report::sub_item(&format!("Config file: {}", path.display()));
    match config.source.backend {
        SourceBackend::Contentful => {
            report::sub_item(&format!("Source: contentful ({})", config.cms.base_url));
            report::sub_item(&format!(
                "Space: {} / {}",
                if config.cms.space_id.is_empty() { "<unset>" } else { config.cms.space_id.as_str() },
                config.cms.environment
            ));
        }
        SourceBackend::Local => {
            report::sub_item(&format!("Source: local ({})", config.source.content_dir.display()));
        }
    }
    report::summary(
        "Settings",
        &[
            ("Listen", format!("{}:{}", config.server.host, config.server.port)),
            ("Vehicle page size", config.listing.vehicle_page_size.to_string()),
            ("Post page size", config.listing.post_page_size.to_string()),
            ("Fallback images", config.fallback_images.len().to_string()),
        ],
    );
}

impl VehicleArgs {
    fn into_query(self, config: &Config) -> VehicleQuery {
        let mut filters = VehicleFilters {
            category: self.category,
            brand: self.brand,
            min_price: self.min_price,
            max_price: self.max_price,
            min_year: self.min_year,
            max_year: self.max_year,
            query: self.query,
            ..Default::default()
        };
        if let Some(passengers) = self.passengers {
            filters = filters.with_passengers(passengers);
        }

        VehicleQuery {
            filters,
            sort: SortMode::parse(&self.sort),
            page: PageRequest::new(
                self.page,
                self.page_size,
                config.listing.vehicle_page_size,
                config.listing.max_page_size,
            ),
        }
    }
}

impl PostArgs {
    fn into_query(self, config: &Config) -> PostQuery {
        PostQuery {
            filters: PostFilters {
                category: self.category,
                tag: self.tag,
                search: self.search,
            },
            page: PageRequest::new(
                self.page,
                self.page_size,
                config.listing.post_page_size,
                config.listing.max_page_size,
            ),
        }
    }
}
