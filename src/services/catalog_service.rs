use crate::{
    error::AppResult,
    models::{Category, Item},
    state::AppState,
};

pub async fn list_items(state: &AppState) -> AppResult<Vec<Item>> {
    Ok(state.store.list_items().await?)
}

pub async fn list_categories(state: &AppState) -> AppResult<Vec<Category>> {
    Ok(state.store.list_categories().await?)
}
