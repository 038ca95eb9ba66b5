// src/services/taxonomy.rs

//! Brands, vehicle categories, blog categories and tags.

use std::sync::Arc;

use crate::models::{BrandOption, Config, Taxonomy, brand_options};
use crate::services::{fetch_or_log, transform_items};
use crate::source::{ContentSource, EntryQuery, content_types};

/// Service for the label lists used as filter keys.
#[derive(Clone)]
pub struct TaxonomyService {
    source: Arc<dyn ContentSource>,
    config: Arc<Config>,
}

impl TaxonomyService {
    pub fn new(source: Arc<dyn ContentSource>, config: Arc<Config>) -> Self {
        Self { source, config }
    }

    async fn list(&self, content_type: &str, order: &str) -> Vec<Taxonomy> {
        let query = EntryQuery::new(content_type)
            .order(order)
            .limit(self.config.cms.fetch_limit)
            .include(0);
        match fetch_or_log(self.source.as_ref(), &query).await {
            Some(collection) => transform_items(&collection, |entry, _| Taxonomy::from_entry(entry)),
            None => Vec::new(),
        }
    }

    pub async fn brands(&self) -> Vec<Taxonomy> {
        self.list(content_types::BRAND, "fields.brandName").await
    }

    /// Brand picker options, "All Brands" first.
    pub async fn brand_options(&self) -> Vec<BrandOption> {
        brand_options(&self.brands().await)
    }

    pub async fn vehicle_categories(&self) -> Vec<Taxonomy> {
        self.list(content_types::VEHICLE_CATEGORY, "fields.categoryName")
            .await
    }

    pub async fn blog_categories(&self) -> Vec<Taxonomy> {
        self.list(content_types::BLOG_CATEGORY, "fields.name").await
    }

    pub async fn blog_tags(&self) -> Vec<Taxonomy> {
        self.list(content_types::BLOG_TAG, "fields.name").await
    }
}
