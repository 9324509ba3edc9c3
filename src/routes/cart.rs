use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::cart::{AddCartQuery, CartList, CartQuery, QuantityQuery, RemoveCartQuery},
    error::AppResult,
    extract::AppQuery,
    response::{ApiResponse, MessageResponse},
    services::cart_service::{self, QuantityChange},
    state::AppState,
};

// Every cart operation is a GET with query parameters; existing clients
// depend on that.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add-cart", get(add_to_cart))
        .route("/cart", get(cart_list))
        .route("/remove-cart", get(remove_from_cart))
        .route("/add-quantity", get(add_quantity))
        .route("/remove-quantity", get(remove_quantity))
}

#[utoipa::path(
    get,
    path = "/add-cart",
    params(AddCartQuery),
    responses(
        (status = 200, description = "Item copied into the cart", body = MessageResponse),
        (status = 400, description = "Already in the cart", body = MessageResponse),
        (status = 404, description = "Item not found", body = MessageResponse)
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AddCartQuery>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(cart_service::add_to_cart(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/cart",
    params(CartQuery),
    responses(
        (status = 200, description = "Cart entries of the user", body = ApiResponse<CartList>)
    ),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CartQuery>,
) -> AppResult<Json<ApiResponse<CartList>>> {
    Ok(Json(cart_service::list_cart(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/remove-cart",
    params(RemoveCartQuery),
    responses(
        (status = 200, description = "Entry removed, or there was none", body = MessageResponse)
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RemoveCartQuery>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(cart_service::remove_from_cart(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/add-quantity",
    params(QuantityQuery),
    responses(
        (status = 200, description = "Quantity raised by one", body = MessageResponse),
        (status = 404, description = "Not in the cart", body = MessageResponse)
    ),
    tag = "Cart"
)]
pub async fn add_quantity(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<QuantityQuery>,
) -> AppResult<Json<MessageResponse>> {
    let resp = cart_service::change_quantity(&state, query, QuantityChange::Increment).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/remove-quantity",
    params(QuantityQuery),
    responses(
        (status = 200, description = "Quantity lowered by one, not below 1", body = MessageResponse),
        (status = 404, description = "Not in the cart", body = MessageResponse)
    ),
    tag = "Cart"
)]
pub async fn remove_quantity(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<QuantityQuery>,
) -> AppResult<Json<MessageResponse>> {
    let resp = cart_service::change_quantity(&state, query, QuantityChange::Decrement).await?;
    Ok(Json(resp))
}
