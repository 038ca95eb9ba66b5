// src/services/mod.rs

//! Service layer for the catalog.
//!
//! This module contains the operations the site performs:
//! - Vehicle lists, details, filtered listings and suggestions (`VehicleService`)
//! - Blog listings, posts and related posts (`BlogService`)
//! - Brands, vehicle categories, blog categories and tags (`TaxonomyService`)
//!
//! Services never fail outward. A failed fetch is logged and the caller
//! gets an empty list or `None`.

mod blog;
mod taxonomy;
mod vehicles;

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::listing::PostQuery;
use crate::models::{Config, SourceBackend};
use crate::source::{
    ContentSource, DeliveryClient, Entry, EntryCollection, EntryQuery, LocalContent, Resolver,
};

pub use blog::BlogService;
pub use taxonomy::TaxonomyService;
pub use vehicles::VehicleService;

/// All services over one content source.
#[derive(Clone)]
pub struct Catalog {
    pub vehicles: VehicleService,
    pub blog: BlogService,
    pub taxonomy: TaxonomyService,
    source_name: &'static str,
}

impl Catalog {
    /// Build services over an existing source.
    pub fn new(source: Arc<dyn ContentSource>, config: Arc<Config>) -> Self {
        Self {
            source_name: source.name(),
            vehicles: VehicleService::new(Arc::clone(&source), Arc::clone(&config)),
            blog: BlogService::new(Arc::clone(&source), Arc::clone(&config)),
            taxonomy: TaxonomyService::new(source, config),
        }
    }

    /// Build services over the backend selected in the configuration.
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let source = open_source(&config)?;
        Ok(Self::new(source, config))
    }

    /// Name of the backing content source.
    pub fn source_name(&self) -> &'static str {
        self.source_name
    }

    /// Count every collection, fetching them concurrently.
    pub async fn counts(&self, config: &Config) -> ContentCounts {
        let posts_query = PostQuery::new(&config.listing);
        let (vehicles, brands, categories, posts) = futures::join!(
            self.vehicles.all(),
            self.taxonomy.brands(),
            self.taxonomy.vehicle_categories(),
            self.blog.posts(&posts_query),
        );
        ContentCounts {
            vehicles: vehicles.len(),
            brands: brands.len(),
            categories: categories.len(),
            published_posts: posts.total,
        }
    }
}

/// Collection sizes reported by `Catalog::counts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentCounts {
    pub vehicles: usize,
    pub brands: usize,
    pub categories: usize,
    pub published_posts: usize,
}

/// Create the content source named by `config.source.backend`.
pub fn open_source(config: &Config) -> Result<Arc<dyn ContentSource>> {
    let source: Arc<dyn ContentSource> = match config.source.backend {
        SourceBackend::Contentful => Arc::new(DeliveryClient::new(&config.cms)?),
        SourceBackend::Local => Arc::new(LocalContent::new(config.source.content_dir.clone())),
    };
    log::info!("Using {} content source", source.name());
    Ok(source)
}

/// Fetch a collection, logging and swallowing failures.
///
/// A content type that does not exist yet is expected on fresh spaces and
/// is only a warning.
async fn fetch_or_log(source: &dyn ContentSource, query: &EntryQuery) -> Option<EntryCollection> {
    match source.entries(query).await {
        Ok(collection) => Some(collection),
        Err(AppError::Content { message, .. }) if message.contains("unknownContentType") => {
            log::warn!(
                "Content type '{}' is not set up in the {} source",
                query.content_type,
                source.name()
            );
            None
        }
        Err(e) => {
            log::error!("Error fetching {}: {}", query.content_type, e);
            None
        }
    }
}

/// Transform every item of a collection, skipping (and logging) malformed entries.
fn transform_items<T, F>(collection: &EntryCollection, transform: F) -> Vec<T>
where
    F: Fn(&Entry, &Resolver<'_>) -> Result<T>,
{
    let resolver = collection.resolver();
    collection
        .items
        .iter()
        .filter_map(|entry| match transform(entry, &resolver) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping malformed entry {}: {}", entry.sys.id, e);
                None
            }
        })
        .collect()
}


#[cfg(test)]
pub(crate) mod testing {
    //! In-memory source shared by the service tests.

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::error::{AppError, Result};
    use crate::source::{ContentSource, EntryCollection, EntryQuery};

    /// Serves fixed collections by content type, ignoring filters other
    /// than field equality on string values.
    pub struct StaticSource {
        pub collections: Vec<(&'static str, Value)>,
    }

    #[async_trait]
    impl ContentSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn entries(&self, query: &EntryQuery) -> Result<EntryCollection> {
            let Some((_, doc)) = self
                .collections
                .iter()
                .find(|(kind, _)| *kind == query.content_type)
            else {
                return Err(AppError::content(&query.content_type, "unknownContentType"));
            };

            let mut collection: EntryCollection = serde_json::from_value(doc.clone())?;
            collection.items.retain(|entry| {
                query.field_equals.iter().all(|(name, value)| {
                    match &entry.fields[name.as_str()] {
                        Value::String(s) => s == value,
                        Value::Bool(b) => b.to_string() == *value,
                        _ => false,
                    }
                })
            });
            if let Some(limit) = query.limit {
                collection.items.truncate(limit);
            }
            collection.total = collection.items.len();
            Ok(collection)
        }
    }

    /// Always fails, as an unreachable CMS would.
    pub struct FailingSource;

    #[async_trait]
    impl ContentSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn entries(&self, query: &EntryQuery) -> Result<EntryCollection> {
            Err(AppError::content(&query.content_type, "connection refused"))
        }
    }
}
