//! JSON HTTP API.
//!
//! Routes are grouped per resource; each handler module exposes a
//! `router()` that is nested under its prefix here.

pub mod handlers;
pub mod params;

use std::sync::Arc;

use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::listing::Page;
use crate::models::{BlogPost, Config, Vehicle};
use crate::services::Catalog;

use handlers::{blog, health, taxonomy, vehicles};

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: Arc<Config>) -> Self {
        Self { catalog, config }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(taxonomy::router())
        .nest("/api/vehicles", vehicles::router())
        .nest("/api/blog", blog::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Body of a filtered vehicle listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListing {
    pub cars: Vec<Vehicle>,
    pub total_cars: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl From<Page<Vehicle>> for VehicleListing {
    fn from(page: Page<Vehicle>) -> Self {
        Self {
            cars: page.items,
            total_cars: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Body of a blog listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListing {
    pub posts: Vec<BlogPost>,
    pub total_posts: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl From<Page<BlogPost>> for PostListing {
    fn from(page: Page<BlogPost>) -> Self {
        Self {
            posts: page.items,
            total_posts: page.total,
            current_page: page.page,
            total_pages: page.total_pages,
        }
    }
}

/// Body of a single post: the post, its rendered HTML and related posts.
#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: BlogPost,
    pub html: String,
    pub related: Vec<BlogPost>,
}
