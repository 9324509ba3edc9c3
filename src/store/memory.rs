use async_trait::async_trait;
use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use uuid::Uuid;

use crate::{
    models::{CartEntry, Category, Item, NewCartEntry, NewCategory, NewUser, StoredUser, User},
    store::{
        CART_ENTRIES_USER_PRODUCT_KEY, CATEGORIES_NAME_KEY, ITEMS_PKEY, Store, StoreError,
        StoreResult, USERS_EMAIL_KEY, USERS_USERNAME_KEY,
    },
};

/// In-process [`Store`]. Uniqueness is enforced through the map keys (users
/// are also indexed by email), the same way the SQL schema enforces it with
/// unique constraints.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, StoredUser>,
    /// email -> username
    emails: DashMap<String, String>,
    items: DashMap<i64, Item>,
    categories: DashMap<String, Category>,
    cart: DashMap<(String, i64), CartEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<StoredUser>> {
        Ok(self.users.get(username).map(|user| user.value().clone()))
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        // username shard is locked before the email shard, on every path
        let Entry::Vacant(user_slot) = self.users.entry(user.username.clone()) else {
            return Err(StoreError::Duplicate(USERS_USERNAME_KEY.to_string()));
        };
        let Entry::Vacant(email_slot) = self.emails.entry(user.email.clone()) else {
            return Err(StoreError::Duplicate(USERS_EMAIL_KEY.to_string()));
        };

        let stored = StoredUser {
            user: User {
                id: Uuid::new_v4(),
                username: user.username,
                email: user.email,
                created_at: Utc::now(),
            },
            password_hash: user.password_hash,
        };
        let created = stored.user.clone();
        email_slot.insert(created.username.clone());
        user_slot.insert(stored);
        Ok(created)
    }

    async fn list_items(&self) -> StoreResult<Vec<Item>> {
        let mut items: Vec<Item> = self.items.iter().map(|i| i.value().clone()).collect();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    async fn find_item(&self, id: i64) -> StoreResult<Option<Item>> {
        Ok(self.items.get(&id).map(|i| i.value().clone()))
    }

    async fn insert_item(&self, item: Item) -> StoreResult<Item> {
        match self.items.entry(item.id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(ITEMS_PKEY.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(item.clone());
                Ok(item)
            }
        }
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories: Vec<Category> =
            self.categories.iter().map(|c| c.value().clone()).collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn insert_category(&self, category: NewCategory) -> StoreResult<Category> {
        match self.categories.entry(category.name.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(CATEGORIES_NAME_KEY.to_string())),
            Entry::Vacant(slot) => {
                let created = Category {
                    id: Uuid::new_v4(),
                    name: category.name,
                    description: category.description,
                };
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }

    async fn find_cart_entry(
        &self,
        user_id: &str,
        product_id: i64,
    ) -> StoreResult<Option<CartEntry>> {
        Ok(self
            .cart
            .get(&(user_id.to_string(), product_id))
            .map(|e| e.value().clone()))
    }

    async fn insert_cart_entry(&self, entry: NewCartEntry) -> StoreResult<CartEntry> {
        match self.cart.entry((entry.user_id.clone(), entry.product_id)) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(
                CART_ENTRIES_USER_PRODUCT_KEY.to_string(),
            )),
            Entry::Vacant(slot) => {
                let created = CartEntry {
                    id: Uuid::new_v4(),
                    user_id: entry.user_id,
                    product_id: entry.product_id,
                    category_id: entry.category_id,
                    name: entry.name,
                    price: entry.price,
                    image_url: entry.image_url,
                    quantity: entry.quantity,
                    created_at: Utc::now(),
                };
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }

    async fn list_cart_entries(&self, user_id: &str) -> StoreResult<Vec<CartEntry>> {
        let mut entries: Vec<CartEntry> = self
            .cart
            .iter()
            .filter(|e| e.key().0 == user_id)
            .map(|e| e.value().clone())
            .collect();
        entries.sort_by_key(|e| (e.created_at, e.product_id));
        Ok(entries)
    }

    async fn delete_cart_entry(&self, user_id: &str, product_id: i64) -> StoreResult<u64> {
        let removed = self.cart.remove(&(user_id.to_string(), product_id));
        Ok(removed.map_or(0, |_| 1))
    }

    async fn update_cart_quantity(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: i32,
    ) -> StoreResult<u64> {
        match self.cart.get_mut(&(user_id.to_string(), product_id)) {
            Some(mut entry) => {
                entry.quantity = quantity;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
