//! Listing composer properties.
//!
//! # What this covers
//!
//! - **Predicates**: every composed item satisfies every active filter, and
//!   every filtered-out vehicle fails at least one, checked field by field
//!   against the raw filter values.
//! - **Pagination**: concatenating all pages reproduces the filtered, sorted
//!   set exactly once and in order; totals agree with the concatenation.
//! - **Monotonic sorts**: `price-asc`, `price-desc` and `rating-desc` are
//!   monotonic in their key.
//! - **Recommended order**: a permutation of its input, independent of input
//!   order.
//!
//! # Running
//!
//! ```sh
//! cargo test --test listing_properties
//! ```

mod common;

use proptest::prelude::*;
use rental_catalog::listing::{
    PageRequest, SortMode, VehicleFilters, VehicleQuery, compose_vehicles, sort_vehicles,
};
use rental_catalog::models::Vehicle;

const PREMIUM: f64 = 5000.0;

fn vehicle_strategy() -> impl Strategy<Value = Vehicle> {
    (
        0u32..12_000,
        0u32..=500,
        0u32..400,
        1u32..=9,
        prop::sample::select(vec!["suv", "sports", "luxury", "economy"]),
        prop::sample::select(vec!["bmw", "kia", "ferrari", "rolls-royce"]),
        prop::option::of(1995u16..2030),
    )
        .prop_map(|(price, rating, reviews, passengers, category, brand, year)| {
            let mut v = common::vehicle("");
            v.price = price as f64;
            v.rating = rating as f64 / 100.0;
            v.reviews = reviews;
            v.passengers = passengers;
            v.category = category.to_string();
            v.brand = brand.to_string();
            v.year = year;
            v.name = format!("{} {} {}", brand, category, year.map(|y| y.to_string()).unwrap_or_default());
            v
        })
}

fn fleet_strategy() -> impl Strategy<Value = Vec<Vehicle>> {
    prop::collection::vec(vehicle_strategy(), 0..40).prop_map(|mut vehicles| {
        for (i, v) in vehicles.iter_mut().enumerate() {
            v.id = format!("v-{:03}", i);
        }
        vehicles
    })
}

/// Filter inputs as a caller supplies them.
#[derive(Debug, Clone)]
struct RawFilters {
    category: Option<&'static str>,
    brand: Option<&'static str>,
    min_price: Option<u32>,
    max_price: Option<u32>,
    /// Site selector: 6 means six or more, otherwise exact
    passengers: Option<u32>,
    min_passengers: Option<u32>,
    max_passengers: Option<u32>,
    min_year: Option<u16>,
    max_year: Option<u16>,
    query: Option<&'static str>,
}

impl RawFilters {
    fn to_filters(&self) -> VehicleFilters {
        let filters = VehicleFilters {
            category: self.category.map(String::from),
            brand: self.brand.map(String::from),
            min_price: self.min_price.map(f64::from),
            max_price: self.max_price.map(f64::from),
            min_passengers: self.min_passengers,
            max_passengers: self.max_passengers,
            min_year: self.min_year,
            max_year: self.max_year,
            query: self.query.map(String::from),
        };
        match self.passengers {
            Some(p) => filters.with_passengers(p),
            None => filters,
        }
    }

    /// Field-by-field check against the raw values.
    fn admits(&self, v: &Vehicle) -> bool {
        let slug_ok = |wanted: Option<&str>, actual: &str| match wanted {
            None | Some("all") => true,
            Some(wanted) => wanted == actual,
        };
        let price = v.price as u32;
        let passengers_ok = match self.passengers {
            Some(6) => v.passengers >= 6,
            Some(p) => v.passengers == p,
            None => {
                self.min_passengers.is_none_or(|min| v.passengers >= min)
                    && self.max_passengers.is_none_or(|max| v.passengers <= max)
            }
        };
        let year_ok = match (self.min_year, self.max_year, v.year) {
            (None, None, _) => true,
            (_, _, None) => false,
            (min, max, Some(year)) => {
                min.is_none_or(|min| year >= min) && max.is_none_or(|max| year <= max)
            }
        };
        let text = format!("{} {} {} {}", v.name, v.brand, v.category, v.description).to_lowercase();
        let query_ok = self
            .query
            .is_none_or(|q| q.split_whitespace().all(|word| text.contains(&word.to_lowercase())));

        slug_ok(self.category, &v.category)
            && slug_ok(self.brand, &v.brand)
            && self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
            && passengers_ok
            && year_ok
            && query_ok
    }
}

fn passenger_strategy() -> impl Strategy<Value = (Option<u32>, Option<u32>, Option<u32>)> {
    prop_oneof![
        prop::option::of(1u32..=7).prop_map(|p| (p, None, None)),
        (prop::option::of(1u32..=9), prop::option::of(1u32..=9))
            .prop_map(|(min, max)| (None, min, max)),
    ]
}

fn filters_strategy() -> impl Strategy<Value = RawFilters> {
    (
        prop::option::of(prop::sample::select(vec!["suv", "sports", "all"])),
        prop::option::of(prop::sample::select(vec!["bmw", "ferrari", "all"])),
        prop::option::of(0u32..8000),
        prop::option::of(2000u32..12_000),
        passenger_strategy(),
        prop::option::of(2000u16..2030),
        prop::option::of(1995u16..2030),
        prop::option::of(prop::sample::select(vec!["bmw", "suv 20", "sports ferrari"])),
    )
        .prop_map(
            |(category, brand, min_price, max_price, (passengers, min_passengers, max_passengers), min_year, max_year, query)| {
                RawFilters {
                    category,
                    brand,
                    min_price,
                    max_price,
                    passengers,
                    min_passengers,
                    max_passengers,
                    min_year,
                    max_year,
                    query,
                }
            },
        )
}

fn sort_strategy() -> impl Strategy<Value = SortMode> {
    prop::sample::select(vec![
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::RatingDesc,
        SortMode::Recommended,
    ])
}

fn ids(vehicles: &[Vehicle]) -> Vec<String> {
    vehicles.iter().map(|v| v.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn composed_items_satisfy_every_filter(
        fleet in fleet_strategy(),
        raw in filters_strategy(),
        sort in sort_strategy(),
    ) {
        let query = VehicleQuery {
            filters: raw.to_filters(),
            sort,
            page: PageRequest::new(Some(1), Some(100), 9, 100),
        };
        let page = compose_vehicles(fleet.clone(), &query, PREMIUM);

        prop_assert!(page.items.iter().all(|v| raw.admits(v)));
        let expected = fleet.iter().filter(|v| raw.admits(v)).count();
        prop_assert_eq!(page.total, expected);

        for v in &fleet {
            prop_assert_eq!(query.filters.matches(v), raw.admits(v), "vehicle {:?}", v.id);
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn pages_concatenate_to_the_full_result(
        fleet in fleet_strategy(),
        raw in filters_strategy(),
        sort in sort_strategy(),
        page_size in 1usize..12,
    ) {
        let filters = raw.to_filters();
        let mut expected: Vec<Vehicle> = fleet.iter().filter(|v| raw.admits(v)).cloned().collect();
        sort_vehicles(&mut expected, sort, PREMIUM);

        let first = compose_vehicles(
            fleet.clone(),
            &VehicleQuery { filters: filters.clone(), sort, page: PageRequest::new(Some(1), Some(page_size), 9, 100) },
            PREMIUM,
        );

        let mut concatenated = Vec::new();
        for page in 1..=first.total_pages + 1 {
            let query = VehicleQuery {
                filters: filters.clone(),
                sort,
                page: PageRequest::new(Some(page), Some(page_size), 9, 100),
            };
            let result = compose_vehicles(fleet.clone(), &query, PREMIUM);
            prop_assert_eq!(result.total, expected.len());
            prop_assert!(result.items.len() <= page_size);
            concatenated.extend(result.items);
        }

        prop_assert_eq!(ids(&concatenated), ids(&expected));
    }
}

#[test]
fn second_page_of_twenty() {
    let fleet: Vec<Vehicle> = (0..20)
        .map(|i| {
            let mut v = common::vehicle(&format!("v-{:02}", i));
            v.price = 100.0 * i as f64;
            v
        })
        .collect();
    let query = VehicleQuery {
        filters: VehicleFilters::default(),
        sort: SortMode::PriceAsc,
        page: PageRequest::new(Some(2), Some(9), 9, 100),
    };
    let page = compose_vehicles(fleet, &query, PREMIUM);

    let expected: Vec<String> = (9..18).map(|i| format!("v-{:02}", i)).collect();
    assert_eq!(ids(&page.items), expected);
    assert_eq!(page.total, 20);
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn key_sorts_are_monotonic(fleet in fleet_strategy()) {
        let mut by_price = fleet.clone();
        sort_vehicles(&mut by_price, SortMode::PriceAsc, PREMIUM);
        prop_assert!(by_price.windows(2).all(|w| w[0].price <= w[1].price));

        sort_vehicles(&mut by_price, SortMode::PriceDesc, PREMIUM);
        prop_assert!(by_price.windows(2).all(|w| w[0].price >= w[1].price));

        let mut by_rating = fleet;
        sort_vehicles(&mut by_rating, SortMode::RatingDesc, PREMIUM);
        prop_assert!(by_rating.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn recommended_is_an_input_order_independent_permutation(fleet in fleet_strategy()) {
        let mut forward = fleet.clone();
        sort_vehicles(&mut forward, SortMode::Recommended, PREMIUM);

        let mut backward: Vec<Vehicle> = fleet.iter().rev().cloned().collect();
        sort_vehicles(&mut backward, SortMode::Recommended, PREMIUM);

        prop_assert_eq!(ids(&forward), ids(&backward));

        let mut sorted_ids = ids(&forward);
        sorted_ids.sort();
        let mut original_ids = ids(&fleet);
        original_ids.sort();
        prop_assert_eq!(sorted_ids, original_ids);
    }
}
