//! Item endpoint handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::api::{
    error::ApiResult,
    models::CreateItemRequest,
    routes::AppState,
};
use crate::db::Item;

/// List all items, ascending by id
///
/// GET /items
pub async fn list_items(State(app_state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    let items = app_state.store.list().await?;
    Ok(Json(items))
}

/// Create a new item
///
/// POST /items
pub async fn create_item(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let Json(req) = payload?;
    let new_item = req.into_new_item()?;

    let created = app_state.store.create(new_item).await?;

    tracing::info!(id = created.id, "Created item");
    Ok((StatusCode::CREATED, Json(created)))
}
