use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;

use crate::error::{AppError, Result};
use crate::models::{BlogPost, Taxonomy};
use crate::server::params::{BlogParams, LimitParams};
use crate::server::{AppState, PostDetail, PostListing};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/featured", get(featured_posts))
        .route("/categories", get(blog_categories))
        .route("/tags", get(blog_tags))
        .route("/{slug}", get(get_post))
}

async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<BlogParams>,
) -> Result<Json<PostListing>> {
    let query = params.into_query(&state.config.listing)?;
    let page = state.catalog.blog.posts(&query).await;
    Ok(Json(PostListing::from(page)))
}

async fn featured_posts(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<BlogPost>>> {
    let limit = params.limit(state.config.listing.max_page_size)?;
    Ok(Json(state.catalog.blog.featured(limit).await))
}

async fn blog_categories(State(state): State<AppState>) -> Json<Vec<Taxonomy>> {
    Json(state.catalog.taxonomy.blog_categories().await)
}

async fn blog_tags(State(state): State<AppState>) -> Json<Vec<Taxonomy>> {
    Json(state.catalog.taxonomy.blog_tags().await)
}

/// A post with its rendered body and up to three related posts.
async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetail>> {
    let blog = &state.catalog.blog;
    let post = blog
        .by_slug(&slug)
        .await
        .ok_or_else(|| AppError::not_found(format!("post '{slug}'")))?;

    let related = blog.related(&post, None).await;
    Ok(Json(PostDetail {
        html: post.html(),
        post,
        related,
    }))
}
