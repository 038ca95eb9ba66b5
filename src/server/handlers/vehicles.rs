use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;

use crate::error::{AppError, Result};
use crate::models::Vehicle;
use crate::search::Suggestions;
use crate::server::params::{LimitParams, SearchParams, VehicleListKind, VehicleParams, parse_param};
use crate::server::{AppState, VehicleListing};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/search", get(search_vehicles))
        .route("/{slug}", get(get_vehicle))
        .route("/{slug}/related", get(related_vehicles))
}

/// All, featured or filtered vehicles depending on `type`.
async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<VehicleParams>,
) -> Result<Response> {
    let vehicles = &state.catalog.vehicles;

    let response = match params.into_kind(&state.config.listing)? {
        VehicleListKind::All => Json(vehicles.all().await).into_response(),
        VehicleListKind::Featured => Json(vehicles.featured().await).into_response(),
        VehicleListKind::Filtered(query) => {
            tracing::debug!(?query, "Composing vehicle listing");
            let page = vehicles.filtered(&query).await;
            Json(VehicleListing::from(page)).into_response()
        }
    };
    Ok(response)
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Suggestions>> {
    let limit = parse_param::<usize>("limit", params.limit.as_deref())?;
    let query = params.q.unwrap_or_default();
    Ok(Json(state.catalog.vehicles.suggest(&query, limit).await))
}

async fn find_vehicle(state: &AppState, slug: &str) -> Result<Vehicle> {
    state
        .catalog
        .vehicles
        .by_slug(slug)
        .await
        .ok_or_else(|| AppError::not_found(format!("vehicle '{slug}'")))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vehicle>> {
    Ok(Json(find_vehicle(&state, &slug).await?))
}

async fn related_vehicles(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<Vehicle>>> {
    let limit = params.limit(state.config.listing.max_page_size)?;
    let vehicle = find_vehicle(&state, &slug).await?;
    Ok(Json(state.catalog.vehicles.related(&vehicle, limit).await))
}
