//! Listing HTTP Handlers
//!
//! Handlers for browsing, creating, and inspecting ads, plus the category
//! list and the viewer's own listings.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::listings::{
    AdDetail, CreateAdRequest, ListAdsResponse, ListCategoriesResponse, SearchParams,
};

use super::{db, search};

/// Browse/search listings
///
/// GET /api/ads with optional `query`, `category`, `min_price`, `max_price`,
/// `location`, and `sort` parameters. No matches is an empty list.
pub async fn list_ads(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ListAdsResponse>, BackendError> {
    let ads = search::search_ads(&state.pool, &params).await?;
    Ok(Json(ListAdsResponse { ads }))
}

/// Create a new listing
///
/// POST /api/ads (authenticated). The ad is owned by the requesting user.
pub async fn create_ad(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateAdRequest>,
) -> Result<Json<AdDetail>, BackendError> {
    if request.title.trim().is_empty() {
        return Err(BackendError::validation("Title cannot be empty"));
    }
    if request.price < 0 {
        return Err(BackendError::validation("Price cannot be negative"));
    }
    if !db::category_exists(&state.pool, request.category_id).await? {
        return Err(BackendError::NotFound("category"));
    }

    let detail = db::create_ad(
        &state.pool,
        user.user_id,
        request.category_id,
        request.title.trim(),
        &request.description,
        request.price,
        &request.location,
        &request.image_urls,
    )
    .await?;

    tracing::info!(ad_id = %detail.ad.id, user_id = %user.user_id, "ad created");

    Ok(Json(detail))
}

/// Get one listing with its images
///
/// GET /api/ads/{id}
pub async fn ad_detail(
    State(state): State<AppState>,
    Path(ad_id): Path<Uuid>,
) -> Result<Json<AdDetail>, BackendError> {
    let detail = db::get_ad_detail(&state.pool, ad_id)
        .await?
        .ok_or(BackendError::NotFound("ad"))?;

    Ok(Json(detail))
}

/// The viewer's own listings, newest first
///
/// GET /api/profile/ads (authenticated)
pub async fn my_ads(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ListAdsResponse>, BackendError> {
    let ads = db::get_ads_for_user(&state.pool, user.user_id).await?;
    Ok(Json(ListAdsResponse { ads }))
}

/// All categories
///
/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ListCategoriesResponse>, BackendError> {
    let categories = db::get_categories(&state.pool).await?;
    Ok(Json(ListCategoriesResponse { categories }))
}
