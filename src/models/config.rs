//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ImageCatalog;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Which content backend to read from
    #[serde(default)]
    pub source: SourceConfig,

    /// Hosted CMS delivery API settings
    #[serde(default)]
    pub cms: CmsConfig,

    /// Listing page sizes and ranking knobs
    #[serde(default)]
    pub listing: ListingConfig,

    /// Suggestion engine settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Log level and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Images used when a vehicle entry has none of its own
    #[serde(default)]
    pub fallback_images: Vec<FallbackImage>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Override values from environment-style lookups.
    ///
    /// Unparseable numeric values are skipped and described in the returned
    /// warnings.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();
        if let Some(space) = lookup("RENTAL_CMS_SPACE_ID") {
            self.cms.space_id = space;
        }
        if let Some(token) = lookup("RENTAL_CMS_ACCESS_TOKEN") {
            self.cms.access_token = token;
        }
        if let Some(env) = lookup("RENTAL_CMS_ENVIRONMENT") {
            self.cms.environment = env;
        }
        if let Some(dir) = lookup("RENTAL_CONTENT_DIR") {
            self.source.backend = SourceBackend::Local;
            self.source.content_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("RENTAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(port) = lookup("RENTAL_SERVER_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => warnings.push(format!("Ignoring RENTAL_SERVER_PORT={port:?}: {e}")),
            }
        }
        warnings
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.backend == SourceBackend::Contentful {
            if self.cms.space_id.trim().is_empty() {
                return Err(AppError::validation("cms.space_id is empty"));
            }
            if self.cms.access_token.trim().is_empty() {
                return Err(AppError::validation("cms.access_token is empty"));
            }
        }
        if self.cms.user_agent.trim().is_empty() {
            return Err(AppError::validation("cms.user_agent is empty"));
        }
        if self.cms.timeout_secs == 0 {
            return Err(AppError::validation("cms.timeout_secs must be > 0"));
        }
        if self.cms.fetch_limit == 0 || self.cms.fetch_limit > 1000 {
            return Err(AppError::validation(
                "cms.fetch_limit must be between 1 and 1000",
            ));
        }
        if self.listing.vehicle_page_size == 0 || self.listing.post_page_size == 0 {
            return Err(AppError::validation("listing page sizes must be > 0"));
        }
        if self.listing.max_page_size < self.listing.vehicle_page_size.max(self.listing.post_page_size)
        {
            return Err(AppError::validation(
                "listing.max_page_size is smaller than a default page size",
            ));
        }
        if self.search.min_query_chars == 0 {
            return Err(AppError::validation("search.min_query_chars must be > 0"));
        }
        if self.search.max_query_chars < self.search.min_query_chars {
            return Err(AppError::validation(
                "search.max_query_chars is smaller than search.min_query_chars",
            ));
        }
        for (name, value) in [
            ("search.vehicle_threshold", self.search.vehicle_threshold),
            ("search.suggestion_threshold", self.search.suggestion_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::validation(format!("{name} must be within 0..=1")));
            }
        }
        Ok(())
    }

    /// Build the fallback image lookup handed to vehicle transforms.
    pub fn image_catalog(&self) -> ImageCatalog {
        ImageCatalog::from_entries(&self.fallback_images)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            source: SourceConfig::default(),
            cms: CmsConfig::default(),
            listing: ListingConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
            fallback_images: Vec::new(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,

    #[serde(default = "defaults::port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
        }
    }
}

/// Content backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceBackend {
    /// Hosted CMS delivery API
    #[default]
    Contentful,
    /// CMS-shaped JSON documents on disk
    Local,
}

/// Content source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub backend: SourceBackend,

    /// Directory holding `{content_type}.json` documents for the local backend
    #[serde(default = "defaults::content_dir")]
    pub content_dir: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            backend: SourceBackend::default(),
            content_dir: defaults::content_dir(),
        }
    }
}

/// Hosted CMS delivery API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// Delivery API root
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    #[serde(default)]
    pub space_id: String,

    #[serde(default = "defaults::environment")]
    pub environment: String,

    /// Delivery API token; usually supplied through `RENTAL_CMS_ACCESS_TOKEN`
    #[serde(default, skip_serializing)]
    pub access_token: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Depth of linked entries resolved by the API
    #[serde(default = "defaults::include_depth")]
    pub include_depth: u8,

    /// Page size used when fetching a whole content type
    #[serde(default = "defaults::fetch_limit")]
    pub fetch_limit: usize,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            space_id: String::new(),
            environment: defaults::environment(),
            access_token: String::new(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            include_depth: defaults::include_depth(),
            fetch_limit: defaults::fetch_limit(),
        }
    }
}

/// Listing composer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "defaults::vehicle_page_size")]
    pub vehicle_page_size: usize,

    #[serde(default = "defaults::post_page_size")]
    pub post_page_size: usize,

    #[serde(default = "defaults::max_page_size")]
    pub max_page_size: usize,

    /// Daily price above which a vehicle counts as premium in the recommended order
    #[serde(default = "defaults::premium_price_threshold")]
    pub premium_price_threshold: f64,

    #[serde(default = "defaults::related_limit")]
    pub related_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            vehicle_page_size: defaults::vehicle_page_size(),
            post_page_size: defaults::post_page_size(),
            max_page_size: defaults::max_page_size(),
            premium_price_threshold: defaults::premium_price_threshold(),
            related_limit: defaults::related_limit(),
        }
    }
}

/// Suggestion engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "defaults::min_query_chars")]
    pub min_query_chars: usize,

    /// Longer queries are cut to this many characters before matching
    #[serde(default = "defaults::max_query_chars")]
    pub max_query_chars: usize,

    #[serde(default = "defaults::default_limit")]
    pub default_limit: usize,

    #[serde(default = "defaults::max_limit")]
    pub max_limit: usize,

    /// Maximum normalized distance for a vehicle field to count as a match
    #[serde(default = "defaults::vehicle_threshold")]
    pub vehicle_threshold: f64,

    /// Maximum normalized distance for brand/category suggestions
    #[serde(default = "defaults::suggestion_threshold")]
    pub suggestion_threshold: f64,

    #[serde(default = "defaults::max_brands")]
    pub max_brands: usize,

    #[serde(default = "defaults::max_categories")]
    pub max_categories: usize,

    /// Always-available brand names matched by substring
    #[serde(default = "defaults::common_brands")]
    pub common_brands: Vec<String>,

    /// Always-available category names matched by substring
    #[serde(default = "defaults::common_categories")]
    pub common_categories: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: defaults::min_query_chars(),
            max_query_chars: defaults::max_query_chars(),
            default_limit: defaults::default_limit(),
            max_limit: defaults::max_limit(),
            vehicle_threshold: defaults::vehicle_threshold(),
            suggestion_threshold: defaults::suggestion_threshold(),
            max_brands: defaults::max_brands(),
            max_categories: defaults::max_categories(),
            common_brands: defaults::common_brands(),
            common_categories: defaults::common_categories(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// `pretty` or `json` (server only)
    #[serde(default = "defaults::log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            format: defaults::log_format(),
        }
    }
}

/// Fallback images for one vehicle slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackImage {
    pub slug: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub images: Vec<String>,
}

mod defaults {
    use std::path::PathBuf;

    // Server defaults
    pub fn host() -> String {
        "0.0.0.0".into()
    }
    pub fn port() -> u16 {
        8080
    }

    // Source defaults
    pub fn content_dir() -> PathBuf {
        PathBuf::from("data/content")
    }

    // CMS defaults
    pub fn base_url() -> String {
        "https://cdn.contentful.com".into()
    }
    pub fn environment() -> String {
        "master".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; rental-catalog/0.1)".into()
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn include_depth() -> u8 {
        2
    }
    pub fn fetch_limit() -> usize {
        1000
    }

    // Listing defaults
    pub fn vehicle_page_size() -> usize {
        9
    }
    pub fn post_page_size() -> usize {
        12
    }
    pub fn max_page_size() -> usize {
        100
    }
    pub fn premium_price_threshold() -> f64 {
        5000.0
    }
    pub fn related_limit() -> usize {
        4
    }

    // Search defaults
    pub fn min_query_chars() -> usize {
        2
    }
    pub fn max_query_chars() -> usize {
        64
    }
    pub fn default_limit() -> usize {
        8
    }
    pub fn max_limit() -> usize {
        50
    }
    pub fn vehicle_threshold() -> f64 {
        0.3
    }
    pub fn suggestion_threshold() -> f64 {
        0.4
    }
    pub fn max_brands() -> usize {
        3
    }
    pub fn max_categories() -> usize {
        2
    }
    pub fn common_brands() -> Vec<String> {
        [
            "Mercedes",
            "BMW",
            "Audi",
            "Lamborghini",
            "Ferrari",
            "Porsche",
            "Bentley",
            "Rolls Royce",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
    pub fn common_categories() -> Vec<String> {
        ["Luxury", "Sports", "SUV", "Economy"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn log_format() -> String {
        "pretty".into()
    }
}
