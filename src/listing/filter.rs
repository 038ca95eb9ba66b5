//! Listing predicates.
//!
//! Each filter is independent; a vehicle or post is kept only when every
//! active predicate holds. Unset filters are no-ops.

use chrono::{DateTime, Utc};
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{BlogPost, Vehicle};

/// Passenger count that means "this many or more".
pub const PASSENGERS_OR_MORE: u32 = 6;

/// Vehicle listing filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilters {
    /// Category slug; `all` matches everything
    pub category: Option<String>,
    /// Brand slug; `all` matches everything
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_passengers: Option<u32>,
    pub max_passengers: Option<u32>,
    pub min_year: Option<u16>,
    pub max_year: Option<u16>,
    /// Free text; every word must appear in name, brand, category or description
    pub query: Option<String>,
}

impl VehicleFilters {
    /// Apply the site's passenger selector: 6 means six or more, other values are exact.
    pub fn with_passengers(mut self, passengers: u32) -> Self {
        if passengers == 0 {
            return self;
        }
        self.min_passengers = Some(passengers);
        self.max_passengers = (passengers != PASSENGERS_OR_MORE).then_some(passengers);
        self
    }

    /// Keep the vehicles that satisfy every active predicate, in order.
    pub fn apply(&self, vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        let words = self.query.as_deref().map(query_words).unwrap_or_default();
        vehicles
            .into_iter()
            .filter(|v| self.matches_with(v, &words))
            .collect()
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let words = self.query.as_deref().map(query_words).unwrap_or_default();
        self.matches_with(vehicle, &words)
    }

    fn matches_with(&self, v: &Vehicle, words: &[String]) -> bool {
        slug_matches(self.category.as_deref(), &v.category)
            && slug_matches(self.brand.as_deref(), &v.brand)
            && self.min_price.is_none_or(|min| v.price >= min)
            && self.max_price.is_none_or(|max| v.price <= max)
            && self.min_passengers.is_none_or(|min| v.passengers >= min)
            && self.max_passengers.is_none_or(|max| v.passengers <= max)
            && self.min_year.is_none_or(|min| v.year.is_some_and(|y| y >= min))
            && self.max_year.is_none_or(|max| v.year.is_some_and(|y| y <= max))
            && contains_all(
                &[&v.name, &v.brand, &v.category, &v.description],
                words,
            )
    }
}

/// Blog listing filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilters {
    /// Category slug
    pub category: Option<String>,
    /// Tag slug
    pub tag: Option<String>,
    /// Free text over title, excerpt, body and labels
    pub search: Option<String>,
}

impl PostFilters {
    /// Keep published posts (on or before `now`) satisfying every predicate.
    pub fn apply(&self, posts: Vec<BlogPost>, now: DateTime<Utc>) -> Vec<BlogPost> {
        let words = self.search.as_deref().map(query_words).unwrap_or_default();
        posts
            .into_iter()
            .filter(|p| p.published_at().is_some_and(|at| at <= now))
            .filter(|p| self.matches_with(p, &words))
            .collect()
    }

    fn matches_with(&self, post: &BlogPost, words: &[String]) -> bool {
        if let Some(category) = active(self.category.as_deref()) {
            if !post.has_category(category) {
                return false;
            }
        }
        if let Some(tag) = active(self.tag.as_deref()) {
            if !post.has_tag(tag) {
                return false;
            }
        }
        if words.is_empty() {
            return true;
        }

        let body = post.content.plain_text();
        let labels: Vec<&str> = post
            .categories
            .iter()
            .chain(&post.tags)
            .map(|t| t.name.as_str())
            .collect();
        let labels = labels.join(" ");
        contains_all(&[&post.title, &post.excerpt, &body, &labels], words)
    }
}

/// A filter value that is neither empty nor the `all` wildcard.
fn active(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn slug_matches(filter: Option<&str>, slug: &str) -> bool {
    active(filter).is_none_or(|wanted| wanted.eq_ignore_ascii_case(slug))
}

/// Lowercased Unicode words of a free-text query.
pub fn query_words(query: &str) -> Vec<String> {
    query
        .unicode_words()
        .map(str::to_lowercase)
        .collect()
}

fn contains_all(fields: &[&str], words: &[String]) -> bool {
    if words.is_empty() {
        return true;
    }
    let haystack = fields
        .iter()
        .map(|f| f.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    words.iter().all(|w| haystack.contains(w.as_str()))
}
