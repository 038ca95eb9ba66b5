//! Shared fixtures for integration tests.
//!
//! The demo content under `data/content` doubles as the test fixture set.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use rental_catalog::models::{Config, SourceBackend, Vehicle, VehicleSpecs};
use rental_catalog::services::Catalog;
use rental_catalog::source::LocalContent;

pub fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn content_dir() -> PathBuf {
    manifest_dir().join("data").join("content")
}

/// The shipped config, pointed at the fixture directory.
pub fn config() -> Config {
    let mut config = Config::load(manifest_dir().join("data").join("config.toml"))
        .expect("data/config.toml parses");
    config.source.backend = SourceBackend::Local;
    config.source.content_dir = content_dir();
    config
}

pub fn catalog() -> Catalog {
    Catalog::new(Arc::new(LocalContent::new(content_dir())), Arc::new(config()))
}

/// A vehicle with neutral defaults for property tests.
pub fn vehicle(id: &str) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        name: id.to_string(),
        image: String::new(),
        images: Vec::new(),
        rating: 0.0,
        reviews: 0,
        passengers: 4,
        air_conditioning: true,
        doors: 4,
        transmission: "Automatic".to_string(),
        price: 0.0,
        category: String::new(),
        brand: String::new(),
        description: String::new(),
        year: None,
        specs: VehicleSpecs::default(),
        featured: false,
        available: true,
    }
}
