//! Vehicle orderings.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{BlogPost, Vehicle};

/// Listing sort modes. Unknown names fall back to [`SortMode::Recommended`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    PriceAsc,
    PriceDesc,
    RatingDesc,
    #[default]
    Recommended,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
            SortMode::RatingDesc => "rating-desc",
            SortMode::Recommended => "recommended",
        }
    }

    /// Lenient parse; anything unrecognized is `Recommended`.
    pub fn parse(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price-asc" | "price_asc" => Ok(SortMode::PriceAsc),
            "price-desc" | "price_desc" => Ok(SortMode::PriceDesc),
            "rating-desc" | "rating_desc" | "rating" => Ok(SortMode::RatingDesc),
            "recommended" => Ok(SortMode::Recommended),
            other => Err(format!("unknown sort mode '{}'", other)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order vehicles in place. Ties are always broken by slug so every mode is total.
pub fn sort_vehicles(vehicles: &mut Vec<Vehicle>, mode: SortMode, premium_threshold: f64) {
    match mode {
        SortMode::PriceAsc => {
            vehicles.sort_by(|a, b| a.price.total_cmp(&b.price).then_with(|| by_slug(a, b)))
        }
        SortMode::PriceDesc => {
            vehicles.sort_by(|a, b| b.price.total_cmp(&a.price).then_with(|| by_slug(a, b)))
        }
        SortMode::RatingDesc => vehicles.sort_by(by_rating_desc),
        SortMode::Recommended => {
            let taken = std::mem::take(vehicles);
            *vehicles = recommended(taken, premium_threshold);
        }
    }
}

/// Rating descending, then reviews descending, then slug.
pub fn by_rating_desc(a: &Vehicle, b: &Vehicle) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| b.reviews.cmp(&a.reviews))
        .then_with(|| by_slug(a, b))
}

fn by_slug(a: &Vehicle, b: &Vehicle) -> Ordering {
    a.id.cmp(&b.id)
}

/// Rating band of width 0.1; vehicles within a band count as equally rated.
fn rating_band(rating: f64) -> i64 {
    (rating * 10.0 + 1e-9).floor() as i64
}

/// The recommended order.
///
/// Vehicles are grouped into rating bands of 0.1, highest band first. Inside
/// a band, premium vehicles (price above the threshold) and value vehicles
/// are each ordered by review count, then interleaved premium first so
/// neither group crowds out the other.
fn recommended(vehicles: Vec<Vehicle>, premium_threshold: f64) -> Vec<Vehicle> {
    let mut bands: BTreeMap<Reverse<i64>, (Vec<Vehicle>, Vec<Vehicle>)> = BTreeMap::new();
    for vehicle in vehicles {
        let band = bands.entry(Reverse(rating_band(vehicle.rating))).or_default();
        if vehicle.is_premium(premium_threshold) {
            band.0.push(vehicle);
        } else {
            band.1.push(vehicle);
        }
    }

    let mut ordered = Vec::new();
    for (_, (mut premium, mut value)) in bands {
        premium.sort_by(by_reviews_desc);
        value.sort_by(by_reviews_desc);

        let mut premium = premium.into_iter();
        let mut value = value.into_iter();
        loop {
            match (premium.next(), value.next()) {
                (None, None) => break,
                (p, v) => ordered.extend(p.into_iter().chain(v)),
            }
        }
    }
    ordered
}

fn by_reviews_desc(a: &Vehicle, b: &Vehicle) -> Ordering {
    b.reviews
        .cmp(&a.reviews)
        .then_with(|| b.rating.total_cmp(&a.rating))
        .then_with(|| by_slug(a, b))
}

/// Newest first; posts with unreadable dates sink to the end.
pub fn sort_posts(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| {
        b.published_at()
            .cmp(&a.published_at())
            .then_with(|| a.slug.cmp(&b.slug))
    });
}
