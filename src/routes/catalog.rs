use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    models::{Category, Item},
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items))
        .route("/categories", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "Every catalog item", body = Vec<Item>)
    ),
    tag = "Catalog"
)]
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(catalog_service::list_items(&state).await?))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Every category", body = Vec<Category>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(catalog_service::list_categories(&state).await?))
}
