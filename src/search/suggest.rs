//! Search-as-you-type suggestions over the vehicle list.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{SearchConfig, Vehicle};
use crate::search::fuzzy::{Pattern, combine};

/// Searchable vehicle fields and their weights.
const FIELD_WEIGHTS: [(&str, f64); 6] = [
    ("name", 0.4),
    ("brand", 0.3),
    ("category", 0.2),
    ("description", 0.1),
    ("transmission", 0.05),
    ("specs.features", 0.1),
];

/// A vehicle match, trimmed to what the suggestion box renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleHit {
    pub id: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub rating: f64,
    pub image: String,
    /// Lower is better; near 0 for an exact name match
    pub search_score: f64,
    pub matched_fields: Vec<String>,
}

/// Suggestions for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Suggestions {
    pub vehicles: Vec<VehicleHit>,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty() && self.brands.is_empty() && self.categories.is_empty()
    }
}

/// Fuzzy matcher configured from [`SearchConfig`].
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    config: SearchConfig,
}

impl SuggestionEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Clamp a requested limit to `1..=max_limit`, defaulting when absent or zero.
    pub fn effective_limit(&self, limit: Option<usize>) -> usize {
        limit
            .filter(|&l| l > 0)
            .unwrap_or(self.config.default_limit)
            .clamp(1, self.config.max_limit.max(1))
    }

    /// Rank vehicles, brands and categories against `query`.
    ///
    /// Only the first `max_query_chars` characters of the query are matched.
    pub fn suggest(&self, vehicles: &[Vehicle], query: &str, limit: Option<usize>) -> Suggestions {
        let pattern = Pattern::new(query).truncated(self.config.max_query_chars);
        if pattern.len() < self.config.min_query_chars {
            return Suggestions::default();
        }

        let mut hits: Vec<VehicleHit> = vehicles
            .iter()
            .filter_map(|v| self.score_vehicle(&pattern, v))
            .collect();
        hits.sort_by(|a, b| {
            a.search_score
                .partial_cmp(&b.search_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(self.effective_limit(limit));

        let query = pattern.as_string();
        let brands = self.labels(
            &pattern,
            vehicles.iter().map(|v| v.brand.as_str()),
            &self.config.common_brands,
            &query,
            self.config.max_brands,
        );
        let categories = self.labels(
            &pattern,
            vehicles.iter().map(|v| v.category.as_str()),
            &self.config.common_categories,
            &query,
            self.config.max_categories,
        );

        Suggestions {
            vehicles: hits,
            brands,
            categories,
        }
    }

    fn score_vehicle(&self, pattern: &Pattern, vehicle: &Vehicle) -> Option<VehicleHit> {
        let threshold = self.config.vehicle_threshold;
        let total_weight: f64 = FIELD_WEIGHTS.iter().map(|(_, w)| w).sum();

        let mut matched = Vec::new();
        let mut matched_fields = Vec::new();
        for (field, weight) in FIELD_WEIGHTS {
            let score = match field {
                "name" => pattern.matches(&vehicle.name, threshold),
                "brand" => pattern.matches(&vehicle.brand, threshold),
                "category" => pattern.matches(&vehicle.category, threshold),
                "description" => pattern.matches(&vehicle.description, threshold),
                "transmission" => pattern.matches(&vehicle.transmission, threshold),
                _ => vehicle
                    .specs
                    .features
                    .iter()
                    .filter_map(|f| pattern.matches(f, threshold))
                    .min_by(|a, b| a.total_cmp(b)),
            };
            if let Some(score) = score {
                matched.push((score, weight));
                matched_fields.push(field.to_string());
            }
        }

        if matched.is_empty() {
            return None;
        }

        Some(VehicleHit {
            id: vehicle.id.clone(),
            name: vehicle.name.clone(),
            category: vehicle.category.clone(),
            brand: vehicle.brand.clone(),
            price: vehicle.price,
            rating: vehicle.rating,
            image: vehicle.image.clone(),
            search_score: combine(&matched, total_weight),
            matched_fields,
        })
    }

    /// Fuzzy-matched values ranked by score, then common names containing the query.
    fn labels<'a>(
        &self,
        pattern: &Pattern,
        values: impl Iterator<Item = &'a str>,
        common: &[String],
        query: &str,
        cap: usize,
    ) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = Vec::new();
        for value in values {
            if scored.iter().any(|(_, seen)| seen.eq_ignore_ascii_case(value)) {
                continue;
            }
            if let Some(score) = pattern.matches(value, self.config.suggestion_threshold) {
                scored.push((score, value));
            }
        }
        scored.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        let mut labels: Vec<String> = scored.into_iter().map(|(_, v)| v.to_string()).collect();
        for name in common {
            let duplicate = labels.iter().any(|l| same_label(l, name));
            if !duplicate && name.to_lowercase().contains(query) {
                labels.push(name.clone());
            }
        }
        labels.truncate(cap);
        labels
    }
}

/// Slugs and display names compare equal when they differ only in case and separators.
fn same_label(a: &str, b: &str) -> bool {
    let normalize = |s: &str| {
        s.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect::<String>()
    };
    normalize(a) == normalize(b)
}
