//! Item API handlers.
//!
//! Each handler parses its inputs, delegates to the repository and maps the
//! outcome to a status code. No business logic lives here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::http::body::JsonBody;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::store::{Item, ItemPatch, NewItem, StoreError};

/// Path ids that are not unsigned integers can never match an item.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::Store(StoreError::NotFound(0)))
}

pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.items.list_all())
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.items.get_by_id(id)?))
}

pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(new_item): JsonBody<NewItem>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state.items.create(new_item)?;
    tracing::info!(id = item.id, "Created item");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<JsonBody<ItemPatch>, ApiError>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&id)?;
    let JsonBody(patch) = match payload {
        Ok(body) => body,
        Err(err) => {
            // Unknown ids win over body errors.
            state.items.get_by_id(id)?;
            return Err(err);
        }
    };
    Ok(Json(state.items.update(id, patch)?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.items.delete(id)?;
    tracing::info!(id, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}
