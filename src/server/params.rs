//! Query-string parameters.
//!
//! Every parameter arrives as an optional string. Empty values count as
//! absent; values that fail to parse are rejected with a 400.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::listing::{PageRequest, PostFilters, PostQuery, SortMode, VehicleFilters, VehicleQuery};
use crate::models::ListingConfig;

/// Parse an optional parameter, treating blank as absent.
pub fn parse_param<T>(name: &str, value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| AppError::bad_request(format!("invalid {name} '{raw}': {e}"))),
    }
}

/// Parse an optional price; `NaN` and infinities are rejected.
pub fn parse_price(name: &str, value: Option<&str>) -> Result<Option<f64>> {
    match parse_param::<f64>(name, value)? {
        Some(price) if !price.is_finite() => Err(AppError::bad_request(format!(
            "invalid {name} '{price}': not a finite number"
        ))),
        price => Ok(price),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn owned(value: Option<String>) -> Option<String> {
    non_empty(value.as_deref()).map(String::from)
}

/// `GET /api/vehicles`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub passengers: Option<String>,
    pub min_passengers: Option<String>,
    pub max_passengers: Option<String>,
    pub min_year: Option<String>,
    pub max_year: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Which vehicle list a request asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleListKind {
    All,
    Featured,
    Filtered(Box<VehicleQuery>),
}

impl VehicleParams {
    pub fn into_kind(self, listing: &ListingConfig) -> Result<VehicleListKind> {
        match non_empty(self.kind.as_deref()) {
            Some("featured") => Ok(VehicleListKind::Featured),
            Some("filtered") => Ok(VehicleListKind::Filtered(Box::new(self.into_query(listing)?))),
            _ => Ok(VehicleListKind::All),
        }
    }

    pub fn into_query(self, listing: &ListingConfig) -> Result<VehicleQuery> {
        let mut filters = VehicleFilters {
            category: owned(self.category),
            brand: owned(self.brand),
            min_price: parse_price("minPrice", self.min_price.as_deref())?,
            max_price: parse_price("maxPrice", self.max_price.as_deref())?,
            min_passengers: parse_param("minPassengers", self.min_passengers.as_deref())?,
            max_passengers: parse_param("maxPassengers", self.max_passengers.as_deref())?,
            min_year: parse_param("minYear", self.min_year.as_deref())?,
            max_year: parse_param("maxYear", self.max_year.as_deref())?,
            query: owned(self.q),
        };
        if let Some(passengers) = parse_param::<u32>("passengers", self.passengers.as_deref())? {
            filters = filters.with_passengers(passengers);
        }

        Ok(VehicleQuery {
            filters,
            sort: non_empty(self.sort.as_deref())
                .map(SortMode::parse)
                .unwrap_or_default(),
            page: PageRequest::new(
                parse_param("page", self.page.as_deref())?,
                parse_param("pageSize", self.page_size.as_deref())?,
                listing.vehicle_page_size,
                listing.max_page_size,
            ),
        })
    }
}

/// `GET /api/blog`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl BlogParams {
    pub fn into_query(self, listing: &ListingConfig) -> Result<PostQuery> {
        Ok(PostQuery {
            filters: PostFilters {
                category: owned(self.category),
                tag: owned(self.tag),
                search: owned(self.search),
            },
            page: PageRequest::new(
                parse_param("page", self.page.as_deref())?,
                parse_param("pageSize", self.page_size.as_deref())?,
                listing.post_page_size,
                listing.max_page_size,
            ),
        })
    }
}

/// `GET /api/vehicles/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

/// Endpoints that only take `limit`.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

impl LimitParams {
    /// Parsed limit, capped at `max`; zero counts as absent.
    pub fn limit(&self, max: usize) -> Result<Option<usize>> {
        Ok(parse_param::<usize>("limit", self.limit.as_deref())?
            .filter(|&l| l > 0)
            .map(|l| l.min(max)))
    }
}
