// src/models/mod.rs

//! Domain models for the catalog.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod blog;
mod config;
mod rich_text;
mod taxonomy;
mod vehicle;

// Re-export all public types
pub use blog::{BlogPost, parse_publish_date};
pub use config::{
    CmsConfig, Config, FallbackImage, ListingConfig, LoggingConfig, SearchConfig, ServerConfig,
    SourceBackend, SourceConfig,
};
pub use rich_text::{Mark, RichTextNode, WORDS_PER_MINUTE, reading_time_for_words};
pub use taxonomy::{BrandOption, Taxonomy, brand_options};
pub use vehicle::{ImageCatalog, Vehicle, VehicleSpecs};
