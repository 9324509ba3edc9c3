use crate::{
    dto::cart::{AddCartQuery, CartList, CartQuery, QuantityQuery, RemoveCartQuery},
    error::{AppError, AppResult},
    models::NewCartEntry,
    response::{ApiResponse, MessageResponse},
    state::AppState,
    store::CART_ENTRIES_USER_PRODUCT_KEY,
};

/// Direction of a one-step quantity change on a cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increment,
    Decrement,
}

impl QuantityChange {
    /// New quantity after applying the change. Never goes below 1.
    pub fn apply(self, current: i32) -> i32 {
        match self {
            QuantityChange::Increment => current.saturating_add(1),
            QuantityChange::Decrement => current.saturating_sub(1).max(1),
        }
    }
}

fn require_user_id(user_id: &str) -> AppResult<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::BadRequest("user_id is required".into()));
    }
    Ok(())
}

pub async fn add_to_cart(state: &AppState, query: AddCartQuery) -> AppResult<MessageResponse> {
    require_user_id(&query.user_id)?;
    if query.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let item = state
        .store
        .find_item(query.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    let exists = state
        .store
        .find_cart_entry(&query.user_id, item.id)
        .await?
        .is_some();
    if exists {
        return Err(AppError::Conflict("Already exists in the cart".into()));
    }

    let entry = NewCartEntry::snapshot(query.user_id, &item, query.quantity);
    let entry = state.store.insert_cart_entry(entry).await.map_err(|err| {
        // lost a race against a concurrent add for the same product
        if err.is_duplicate_of(CART_ENTRIES_USER_PRODUCT_KEY) {
            AppError::Conflict("Already exists in the cart".into())
        } else {
            AppError::from(err)
        }
    })?;

    tracing::info!(
        user_id = %entry.user_id,
        product_id = entry.product_id,
        quantity = entry.quantity,
        "added to cart"
    );
    Ok(MessageResponse::message("Success"))
}

pub async fn list_cart(state: &AppState, query: CartQuery) -> AppResult<ApiResponse<CartList>> {
    require_user_id(&query.user_id)?;
    let items = state.store.list_cart_entries(&query.user_id).await?;
    Ok(ApiResponse::success("OK", CartList { items }))
}

/// Removing an entry that does not exist is not an error.
pub async fn remove_from_cart(
    state: &AppState,
    query: RemoveCartQuery,
) -> AppResult<MessageResponse> {
    require_user_id(&query.user_id)?;
    let removed = state
        .store
        .delete_cart_entry(&query.user_id, query.product_id)
        .await?;
    tracing::debug!(
        user_id = %query.user_id,
        product_id = query.product_id,
        removed,
        "removed from cart"
    );
    Ok(MessageResponse::message("Removed from the cart"))
}

pub async fn change_quantity(
    state: &AppState,
    query: QuantityQuery,
    change: QuantityChange,
) -> AppResult<MessageResponse> {
    require_user_id(&query.user_id)?;
    let entry = state
        .store
        .find_cart_entry(&query.user_id, query.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found in the cart".into()))?;

    let quantity = change.apply(entry.quantity);
    if quantity != entry.quantity {
        state
            .store
            .update_cart_quantity(&query.user_id, query.id, quantity)
            .await?;
    }

    tracing::debug!(
        user_id = %query.user_id,
        product_id = query.id,
        from = entry.quantity,
        to = quantity,
        "cart quantity changed"
    );
    Ok(MessageResponse::message("Quantity updated successfully"))
}
