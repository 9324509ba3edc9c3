use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored password hash. Never sent to clients.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Item {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: f64,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

/// Snapshot of an [`Item`] taken when it was added to a user's cart.
///
/// Catalog fields are copied once and not refreshed afterwards, so a later
/// price change on the item does not show up here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CartEntry {
    pub id: Uuid,
    pub user_id: String,
    pub product_id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCartEntry {
    pub user_id: String,
    pub product_id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub quantity: i32,
}

impl NewCartEntry {
    pub fn snapshot(user_id: impl Into<String>, item: &Item, quantity: i32) -> Self {
        Self {
            user_id: user_id.into(),
            product_id: item.id,
            category_id: item.category_id,
            name: item.name.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            quantity,
        }
    }
}
