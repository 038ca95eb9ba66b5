// src/services/vehicles.rs

//! Vehicle service.
//!
//! Fetches `rentalVehicle` entries and serves them as lists, single
//! vehicles, composed listings and search suggestions.

use std::sync::Arc;

use crate::listing::{Page, VehicleQuery, by_rating_desc, compose_vehicles};
use crate::models::{Config, ImageCatalog, Vehicle};
use crate::search::{SuggestionEngine, Suggestions};
use crate::services::{fetch_or_log, transform_items};
use crate::source::{ContentSource, EntryQuery, content_types};

/// Service for reading vehicles.
#[derive(Clone)]
pub struct VehicleService {
    source: Arc<dyn ContentSource>,
    config: Arc<Config>,
    images: Arc<ImageCatalog>,
    engine: SuggestionEngine,
}

impl VehicleService {
    pub fn new(source: Arc<dyn ContentSource>, config: Arc<Config>) -> Self {
        Self {
            images: Arc::new(config.image_catalog()),
            engine: SuggestionEngine::new(config.search.clone()),
            source,
            config,
        }
    }

    fn query(&self) -> EntryQuery {
        EntryQuery::new(content_types::VEHICLE).include(self.config.cms.include_depth)
    }

    async fn fetch(&self, query: EntryQuery) -> Vec<Vehicle> {
        let Some(collection) = fetch_or_log(self.source.as_ref(), &query).await else {
            return Vec::new();
        };
        transform_items(&collection, |entry, resolver| {
            Vehicle::from_entry(entry, resolver, &self.images)
        })
    }

    /// Every vehicle, newest entry first.
    pub async fn all(&self) -> Vec<Vehicle> {
        let query = self
            .query()
            .limit(self.config.cms.fetch_limit)
            .order("-sys.createdAt");
        self.fetch(query).await
    }

    /// The vehicle with the given slug, if any.
    pub async fn by_slug(&self, slug: &str) -> Option<Vehicle> {
        let query = self.query().field("urlSlug", slug).limit(1);
        self.fetch(query).await.into_iter().next()
    }

    /// Vehicles flagged as featured.
    pub async fn featured(&self) -> Vec<Vehicle> {
        let query = self
            .query()
            .field("featuredFlag", "true")
            .limit(self.config.cms.fetch_limit);
        self.fetch(query).await
    }

    /// Filter, sort and paginate the full vehicle list.
    pub async fn filtered(&self, query: &VehicleQuery) -> Page<Vehicle> {
        let vehicles = self.all().await;
        compose_vehicles(vehicles, query, self.config.listing.premium_price_threshold)
    }

    /// Other vehicles in the same category, best rated first.
    pub async fn related(&self, vehicle: &Vehicle, limit: Option<usize>) -> Vec<Vehicle> {
        let limit = limit.unwrap_or(self.config.listing.related_limit);
        let mut related: Vec<Vehicle> = self
            .all()
            .await
            .into_iter()
            .filter(|v| v.category == vehicle.category && v.id != vehicle.id)
            .collect();
        related.sort_by(by_rating_desc);
        related.truncate(limit);
        related
    }

    /// Search-as-you-type suggestions.
    pub async fn suggest(&self, query: &str, limit: Option<usize>) -> Suggestions {
        if query.trim().chars().count() < self.config.search.min_query_chars {
            return Suggestions::default();
        }
        let vehicles = self.all().await;
        self.engine.suggest(&vehicles, query, limit)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::listing::{PageRequest, SortMode, VehicleFilters};
    use crate::models::FallbackImage;
    use crate::services::testing::{FailingSource, StaticSource};

    fn vehicle_entry(slug: &str, category: &str, rating: f64, featured: bool) -> Value {
        json!({
            "sys": { "id": slug, "createdAt": "2024-01-01T00:00:00Z" },
            "fields": {
                "vehicleName": slug.replace('-', " "),
                "urlSlug": slug,
                "dailyPrice": 500,
                "rating": rating,
                "featuredFlag": featured,
                "category": { "sys": { "type": "Link", "linkType": "Entry", "id": format!("cat-{}", category) } },
                "brand": { "sys": { "type": "Link", "linkType": "Entry", "id": "brand-bmw" } }
            }
        })
    }

    fn service() -> VehicleService {
        let doc = json!({
            "items": [
                vehicle_entry("bmw-x5-2023", "suv", 4.6, true),
                vehicle_entry("bmw-x7-2024", "suv", 4.9, false),
                vehicle_entry("bmw-x3-2022", "suv", 4.2, false),
                vehicle_entry("bmw-m4-2024", "sports", 4.8, true),
                { "sys": { "id": "broken" }, "fields": { "urlSlug": "no-name" } }
            ],
            "includes": {
                "Entry": [
                    { "sys": { "id": "cat-suv" }, "fields": { "categoryName": "SUV", "urlSlug": "suv" } },
                    { "sys": { "id": "cat-sports" }, "fields": { "categoryName": "Sports", "urlSlug": "sports" } },
                    { "sys": { "id": "brand-bmw" }, "fields": { "brandName": "BMW", "urlSlug": "bmw" } }
                ]
            }
        });
        let mut config = Config::default();
        config.fallback_images = vec![FallbackImage {
            slug: "bmw-x5-2023".into(),
            image: "/images/x5.jpg".into(),
            images: vec![],
        }];
        VehicleService::new(
            Arc::new(StaticSource {
                collections: vec![(content_types::VEHICLE, doc)],
            }),
            Arc::new(config),
        )
    }

    #[tokio::test]
    async fn test_all_skips_malformed_entries() {
        let vehicles = service().all().await;
        assert_eq!(vehicles.len(), 4);
        assert!(vehicles.iter().all(|v| v.brand == "bmw"));
    }

    #[tokio::test]
    async fn test_by_slug_uses_fallback_image() {
        let vehicle = service().by_slug("bmw-x5-2023").await.unwrap();
        assert_eq!(vehicle.image, "/images/x5.jpg");
        assert_eq!(vehicle.year, Some(2023));

        assert!(service().by_slug("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_featured() {
        let featured = service().featured().await;
        let ids: Vec<&str> = featured.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["bmw-x5-2023", "bmw-m4-2024"]);
    }

    #[tokio::test]
    async fn test_related_is_same_category_by_rating() {
        let service = service();
        let current = service.by_slug("bmw-x5-2023").await.unwrap();
        let related = service.related(&current, Some(5)).await;

        let ids: Vec<&str> = related.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["bmw-x7-2024", "bmw-x3-2022"]);
    }

    #[tokio::test]
    async fn test_filtered_listing() {
        let query = VehicleQuery {
            filters: VehicleFilters {
                min_year: Some(2023),
                ..Default::default()
            },
            sort: SortMode::RatingDesc,
            page: PageRequest::new(Some(1), Some(2), 9, 100),
        };
        let page = service().filtered(&query).await;

        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items[0].id, "bmw-x7-2024");
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty() {
        let service = VehicleService::new(Arc::new(FailingSource), Arc::new(Config::default()));

        assert!(service.all().await.is_empty());
        assert!(service.by_slug("bmw-x5-2023").await.is_none());
        assert_eq!(service.filtered(&VehicleQuery::new(&Config::default().listing)).await.total, 0);
        assert!(service.suggest("bmw", None).await.is_empty());
    }
}
