use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;

use crate::models::{BrandOption, Taxonomy};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/brands", get(brands))
        .route("/api/categories", get(vehicle_categories))
}

async fn brands(State(state): State<AppState>) -> Json<Vec<BrandOption>> {
    Json(state.catalog.taxonomy.brand_options().await)
}

async fn vehicle_categories(State(state): State<AppState>) -> Json<Vec<Taxonomy>> {
    Json(state.catalog.taxonomy.vehicle_categories().await)
}
