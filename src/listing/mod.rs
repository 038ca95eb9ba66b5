//! Listing composition: filter, order, paginate.
//!
//! Listings are composed in memory over the full vehicle or post set, so
//! totals and page slices always agree.

mod filter;
mod page;
mod sort;

use chrono::{DateTime, Utc};

use crate::models::{BlogPost, ListingConfig, Vehicle};

pub use filter::{PASSENGERS_OR_MORE, PostFilters, VehicleFilters, query_words};
pub use page::{Page, PageRequest, paginate};
pub use sort::{SortMode, by_rating_desc, sort_posts, sort_vehicles};

/// A vehicle listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleQuery {
    pub filters: VehicleFilters,
    pub sort: SortMode,
    pub page: PageRequest,
}

impl VehicleQuery {
    /// Unfiltered, recommended order, first page at the configured size.
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            filters: VehicleFilters::default(),
            sort: SortMode::Recommended,
            page: PageRequest::new(None, None, config.vehicle_page_size, config.max_page_size),
        }
    }
}

/// A blog listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct PostQuery {
    pub filters: PostFilters,
    pub page: PageRequest,
}

impl PostQuery {
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            filters: PostFilters::default(),
            page: PageRequest::new(None, None, config.post_page_size, config.max_page_size),
        }
    }
}

/// Filter, sort and paginate vehicles.
pub fn compose_vehicles(
    vehicles: Vec<Vehicle>,
    query: &VehicleQuery,
    premium_threshold: f64,
) -> Page<Vehicle> {
    let mut matched = query.filters.apply(vehicles);
    sort_vehicles(&mut matched, query.sort, premium_threshold);
    paginate(matched, query.page)
}

/// Filter published posts, newest first, and paginate.
pub fn compose_posts(posts: Vec<BlogPost>, query: &PostQuery, now: DateTime<Utc>) -> Page<BlogPost> {
    let mut matched = query.filters.apply(posts, now);
    sort_posts(&mut matched);
    paginate(matched, query.page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleSpecs;

    fn fleet() -> Vec<Vehicle> {
        (0..20)
            .map(|i| Vehicle {
                id: format!("car-{:02}", i),
                name: format!("Car {}", i),
                image: String::new(),
                images: vec![],
                rating: 4.0,
                reviews: 0,
                passengers: if i % 2 == 0 { 5 } else { 7 },
                air_conditioning: true,
                doors: 4,
                transmission: "Automatic".into(),
                price: 100.0 + i as f64 * 10.0,
                category: if i < 10 { "suv".into() } else { "sedan".into() },
                brand: "bmw".into(),
                description: String::new(),
                year: None,
                specs: VehicleSpecs::default(),
                featured: false,
                available: true,
            })
            .collect()
    }

    #[test]
    fn test_compose_second_page() {
        let query = VehicleQuery {
            filters: VehicleFilters::default(),
            sort: SortMode::PriceAsc,
            page: PageRequest::new(Some(2), Some(9), 9, 100),
        };
        let page = compose_vehicles(fleet(), &query, 5000.0);

        assert_eq!(page.total, 20);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 9);
        assert_eq!(page.items[0].id, "car-09");
    }

    #[test]
    fn test_total_reflects_filters() {
        let query = VehicleQuery {
            filters: VehicleFilters {
                category: Some("suv".into()),
                ..Default::default()
            }
            .with_passengers(6),
            sort: SortMode::PriceDesc,
            page: PageRequest::new(None, None, 9, 100),
        };
        let page = compose_vehicles(fleet(), &query, 5000.0);

        assert_eq!(page.total, 5);
        assert!(page.items.iter().all(|v| v.category == "suv" && v.passengers >= 6));
        assert_eq!(page.items[0].id, "car-09");
    }
}
