//! Persistence for the four collections: users, items, categories and cart
//! entries.
//!
//! Handlers never talk to the database directly; they go through a
//! [`Store`] held in [`crate::state::AppState`]. [`PgStore`] is the
//! production backend, [`MemoryStore`] keeps everything in process.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    CartEntry, Category, Item, NewCartEntry, NewCategory, NewUser, StoredUser, User,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was violated. Carries the constraint name (or the
    /// backend's message mentioning it).
    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("database error")]
    Database(#[from] sea_orm::DbErr),
}

impl StoreError {
    pub fn is_duplicate_of(&self, constraint: &str) -> bool {
        matches!(self, StoreError::Duplicate(detail) if detail.contains(constraint))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub const USERS_USERNAME_KEY: &str = "users_username_key";
pub const USERS_EMAIL_KEY: &str = "users_email_key";
pub const CATEGORIES_NAME_KEY: &str = "categories_name_key";
pub const ITEMS_PKEY: &str = "items_pkey";
pub const CART_ENTRIES_USER_PRODUCT_KEY: &str = "cart_entries_user_product_key";

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<StoredUser>>;

    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    /// All items, ordered by id.
    async fn list_items(&self) -> StoreResult<Vec<Item>>;

    async fn find_item(&self, id: i64) -> StoreResult<Option<Item>>;

    async fn insert_item(&self, item: Item) -> StoreResult<Item>;

    /// All categories, ordered by name.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn insert_category(&self, category: NewCategory) -> StoreResult<Category>;

    async fn find_cart_entry(
        &self,
        user_id: &str,
        product_id: i64,
    ) -> StoreResult<Option<CartEntry>>;

    /// Fails with [`StoreError::Duplicate`] when the user already has an
    /// entry for the product.
    async fn insert_cart_entry(&self, entry: NewCartEntry) -> StoreResult<CartEntry>;

    /// A user's entries, oldest first.
    async fn list_cart_entries(&self, user_id: &str) -> StoreResult<Vec<CartEntry>>;

    /// Returns the number of removed entries.
    async fn delete_cart_entry(&self, user_id: &str, product_id: i64) -> StoreResult<u64>;

    /// Returns the number of updated entries.
    async fn update_cart_quantity(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: i32,
    ) -> StoreResult<u64>;
}
