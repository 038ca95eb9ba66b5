// src/models/vehicle.rs

//! Vehicle data structures and the CMS entry transform.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{FallbackImage, RichTextNode};
use crate::source::{Entry, Link, Resolver};
use crate::utils::extract_year;

/// A rental vehicle as served to the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// URL slug, unique per vehicle
    pub id: String,

    /// Display name (often includes the model year)
    pub name: String,

    /// Main image URL, or empty
    pub image: String,

    /// Gallery image URLs
    pub images: Vec<String>,

    /// Average rating, 0 to 5
    pub rating: f64,

    /// Number of reviews behind the rating
    pub reviews: u32,

    pub passengers: u32,
    pub air_conditioning: bool,
    pub doors: u32,
    pub transmission: String,

    /// Daily price
    pub price: f64,

    /// Category slug
    pub category: String,

    /// Brand slug
    pub brand: String,

    pub description: String,

    /// Model year parsed from the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,

    pub specs: VehicleSpecs,

    #[serde(default)]
    pub featured: bool,

    #[serde(default = "available_default")]
    pub available: bool,
}

fn available_default() -> bool {
    true
}

/// Performance and equipment details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSpecs {
    pub acceleration: String,
    pub fuel_consumption: String,
    pub features: Vec<String>,
}

/// Images to use for vehicles whose entries carry none, keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct ImageCatalog {
    by_slug: HashMap<String, FallbackImage>,
}

impl ImageCatalog {
    pub fn from_entries(entries: &[FallbackImage]) -> Self {
        Self {
            by_slug: entries
                .iter()
                .map(|entry| (entry.slug.clone(), entry.clone()))
                .collect(),
        }
    }

    pub fn get(&self, slug: &str) -> Option<&FallbackImage> {
        self.by_slug.get(slug)
    }

    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }
}

/// Fields of a `rentalVehicle` entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RentalVehicleFields {
    vehicle_name: String,
    url_slug: String,
    description: Option<RichTextNode>,
    #[serde(default)]
    daily_price: f64,
    brand: Option<Link>,
    category: Option<Link>,
    acceleration_time: Option<String>,
    fuel_consumption: Option<String>,
    features: Option<FeatureList>,
    passenger_count: Option<u32>,
    door_count: Option<u32>,
    transmission_type: Option<String>,
    air_conditioning: Option<bool>,
    rating: Option<f64>,
    review_count: Option<u32>,
    main_image: Option<Link>,
    image_gallery: Option<Vec<Link>>,
    featured_flag: Option<bool>,
    availability_status: Option<bool>,
}

/// Features are stored either as a list or as newline-separated text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeatureList {
    List(Vec<String>),
    Text(String),
}

impl FeatureList {
    fn into_vec(self) -> Vec<String> {
        let items = match self {
            FeatureList::List(items) => items,
            FeatureList::Text(text) => text.lines().map(String::from).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Slug of a linked brand or category entry.
#[derive(Debug, Deserialize)]
struct SlugFields {
    #[serde(rename = "urlSlug", alias = "slug")]
    slug: String,
}

impl Vehicle {
    /// Build a vehicle from a `rentalVehicle` entry.
    ///
    /// Linked brand/category entries and image assets are resolved through
    /// `resolver`; `fallback` supplies images for entries without their own.
    pub fn from_entry(entry: &Entry, resolver: &Resolver<'_>, fallback: &ImageCatalog) -> Result<Self> {
        let fields: RentalVehicleFields = entry.fields_as()?;
        let fallback = fallback.get(&fields.url_slug);

        let linked_slug = |link: &Option<Link>| {
            link.as_ref()
                .and_then(|l| resolver.entry_fields::<SlugFields>(l))
                .map(|(_, f)| f.slug)
                .unwrap_or_default()
        };

        let image = fields
            .main_image
            .as_ref()
            .and_then(|link| resolver.asset_url(link))
            .or_else(|| fallback.map(|f| f.image.clone()))
            .unwrap_or_default();

        let images = match &fields.image_gallery {
            Some(gallery) => gallery
                .iter()
                .filter_map(|link| resolver.asset_url(link))
                .collect(),
            None => fallback.map(|f| f.images.clone()).unwrap_or_default(),
        };

        Ok(Self {
            year: extract_year(&fields.vehicle_name),
            brand: linked_slug(&fields.brand),
            category: linked_slug(&fields.category),
            description: fields
                .description
                .as_ref()
                .map(RichTextNode::paragraph_text)
                .unwrap_or_default(),
            specs: VehicleSpecs {
                acceleration: fields.acceleration_time.unwrap_or_default(),
                fuel_consumption: fields.fuel_consumption.unwrap_or_default(),
                features: fields.features.map(FeatureList::into_vec).unwrap_or_default(),
            },
            id: fields.url_slug,
            name: fields.vehicle_name,
            image,
            images,
            rating: fields.rating.unwrap_or(0.0),
            reviews: fields.review_count.unwrap_or(0),
            passengers: fields.passenger_count.unwrap_or(0),
            air_conditioning: fields.air_conditioning.unwrap_or(false),
            doors: fields.door_count.unwrap_or(0),
            transmission: fields.transmission_type.unwrap_or_default(),
            price: fields.daily_price,
            featured: fields.featured_flag.unwrap_or(false),
            available: fields.availability_status.unwrap_or(true),
        })
    }

    /// Whether the vehicle counts as premium at the given daily price threshold.
    pub fn is_premium(&self, threshold: f64) -> bool {
        self.price > threshold
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::source::EntryCollection;

    fn collection(fields: serde_json::Value) -> EntryCollection {
        serde_json::from_value(json!({
            "items": [{ "sys": { "id": "v1" }, "fields": fields }],
            "includes": {
                "Entry": [
                    { "sys": { "id": "brand-bmw" }, "fields": { "brandName": "BMW", "urlSlug": "bmw" } },
                    { "sys": { "id": "cat-suv" }, "fields": { "categoryName": "SUV", "urlSlug": "suv" } }
                ],
                "Asset": [
                    { "sys": { "id": "img1" }, "fields": { "file": { "url": "//images.example/x4.jpg" } } },
                    { "sys": { "id": "img2" }, "fields": { "file": { "url": "//images.example/x4-side.jpg" } } }
                ]
            }
        }))
        .unwrap()
    }

    fn link(id: &str) -> serde_json::Value {
        json!({ "sys": { "type": "Link", "linkType": "Entry", "id": id } })
    }

    #[test]
    fn test_full_entry_transform() {
        let collection = collection(json!({
            "vehicleName": "BMW X4 2024",
            "urlSlug": "bmw-x4-2024",
            "dailyPrice": 850,
            "brand": link("brand-bmw"),
            "category": link("cat-suv"),
            "features": "Sunroof\n\nApple CarPlay\n",
            "passengerCount": 5,
            "doorCount": 4,
            "transmissionType": "Automatic",
            "airConditioning": true,
            "rating": 4.7,
            "reviewCount": 31,
            "mainImage": link("img1"),
            "imageGallery": [link("img2"), link("missing")],
            "description": {
                "nodeType": "document",
                "content": [
                    { "nodeType": "paragraph", "content": [{ "nodeType": "text", "value": "Sporty SUV." }] }
                ]
            }
        }));
        let resolver = collection.resolver();

        let vehicle =
            Vehicle::from_entry(&collection.items[0], &resolver, &ImageCatalog::default()).unwrap();

        assert_eq!(vehicle.id, "bmw-x4-2024");
        assert_eq!(vehicle.brand, "bmw");
        assert_eq!(vehicle.category, "suv");
        assert_eq!(vehicle.year, Some(2024));
        assert_eq!(vehicle.price, 850.0);
        assert_eq!(vehicle.image, "https://images.example/x4.jpg");
        assert_eq!(vehicle.images, vec!["https://images.example/x4-side.jpg"]);
        assert_eq!(vehicle.specs.features, vec!["Sunroof", "Apple CarPlay"]);
        assert_eq!(vehicle.description, "Sporty SUV.");
        assert!(vehicle.available);
        assert!(!vehicle.featured);
    }

    #[test]
    fn test_sparse_entry_uses_defaults_and_fallback_images() {
        let collection = collection(json!({
            "vehicleName": "Kia Picanto",
            "urlSlug": "kia-picanto",
            "dailyPrice": 99.5,
            "features": ["Bluetooth"]
        }));
        let resolver = collection.resolver();
        let fallback = ImageCatalog::from_entries(&[FallbackImage {
            slug: "kia-picanto".into(),
            image: "https://local.example/picanto.jpg".into(),
            images: vec!["https://local.example/picanto-2.jpg".into()],
        }]);

        let vehicle = Vehicle::from_entry(&collection.items[0], &resolver, &fallback).unwrap();

        assert_eq!(vehicle.brand, "");
        assert_eq!(vehicle.year, None);
        assert_eq!(vehicle.rating, 0.0);
        assert_eq!(vehicle.image, "https://local.example/picanto.jpg");
        assert_eq!(vehicle.images.len(), 1);
        assert_eq!(vehicle.specs.features, vec!["Bluetooth"]);
    }

    #[test]
    fn test_missing_name_is_error() {
        let collection = collection(json!({ "urlSlug": "nameless" }));
        let resolver = collection.resolver();
        assert!(
            Vehicle::from_entry(&collection.items[0], &resolver, &ImageCatalog::default()).is_err()
        );
    }

    #[test]
    fn test_is_premium() {
        let collection = collection(json!({ "vehicleName": "Rolls Royce Cullinan", "urlSlug": "cullinan", "dailyPrice": 7500 }));
        let resolver = collection.resolver();
        let vehicle =
            Vehicle::from_entry(&collection.items[0], &resolver, &ImageCatalog::default()).unwrap();

        assert!(vehicle.is_premium(5000.0));
        assert!(!vehicle.is_premium(7500.0));
    }
}
