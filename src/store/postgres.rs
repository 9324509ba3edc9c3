use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::{
        cart_entries::{
            ActiveModel as CartActive, Column as CartCol, Entity as CartEntries,
            Model as CartModel,
        },
        categories::{
            ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories,
            Model as CategoryModel,
        },
        items::{ActiveModel as ItemActive, Column as ItemCol, Entity as Items, Model as ItemModel},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    models::{CartEntry, Category, Item, NewCartEntry, NewCategory, NewUser, StoredUser, User},
    store::{Store, StoreError, StoreResult},
};

/// [`Store`] backed by PostgreSQL through SeaORM. One table per collection.
#[derive(Clone)]
pub struct PgStore {
    conn: DatabaseConnection,
}

impl PgStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<StoredUser>> {
        let user = Users::find()
            .filter(UserCol::Username.eq(username))
            .one(&self.conn)
            .await?
            .map(stored_user_from_entity);
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let active = UserActive {
            id: Set(Uuid::new_v4()),
            username: Set(user.username),
            password: Set(user.password_hash),
            email: Set(user.email),
            created_at: NotSet,
        };
        let model = active.insert(&self.conn).await.map_err(classify)?;
        Ok(stored_user_from_entity(model).user)
    }

    async fn list_items(&self) -> StoreResult<Vec<Item>> {
        let items = Items::find()
            .order_by_asc(ItemCol::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(item_from_entity)
            .collect();
        Ok(items)
    }

    async fn find_item(&self, id: i64) -> StoreResult<Option<Item>> {
        Ok(Items::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(item_from_entity))
    }

    async fn insert_item(&self, item: Item) -> StoreResult<Item> {
        let active = ItemActive {
            id: Set(item.id),
            category_id: Set(item.category_id),
            name: Set(item.name),
            price: Set(item.price),
            image_url: Set(item.image_url),
        };
        let model = active.insert(&self.conn).await.map_err(classify)?;
        Ok(item_from_entity(model))
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let categories = Categories::find()
            .order_by_asc(CategoryCol::Name)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(category_from_entity)
            .collect();
        Ok(categories)
    }

    async fn insert_category(&self, category: NewCategory) -> StoreResult<Category> {
        let active = CategoryActive {
            id: Set(Uuid::new_v4()),
            name: Set(category.name),
            description: Set(category.description),
        };
        let model = active.insert(&self.conn).await.map_err(classify)?;
        Ok(category_from_entity(model))
    }

    async fn find_cart_entry(
        &self,
        user_id: &str,
        product_id: i64,
    ) -> StoreResult<Option<CartEntry>> {
        let entry = CartEntries::find()
            .filter(CartCol::UserId.eq(user_id))
            .filter(CartCol::ProductId.eq(product_id))
            .one(&self.conn)
            .await?
            .map(cart_entry_from_entity);
        Ok(entry)
    }

    async fn insert_cart_entry(&self, entry: NewCartEntry) -> StoreResult<CartEntry> {
        let active = CartActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(entry.user_id),
            product_id: Set(entry.product_id),
            category_id: Set(entry.category_id),
            name: Set(entry.name),
            price: Set(entry.price),
            image_url: Set(entry.image_url),
            quantity: Set(entry.quantity),
            created_at: NotSet,
        };
        let model = active.insert(&self.conn).await.map_err(classify)?;
        Ok(cart_entry_from_entity(model))
    }

    async fn list_cart_entries(&self, user_id: &str) -> StoreResult<Vec<CartEntry>> {
        let entries = CartEntries::find()
            .filter(CartCol::UserId.eq(user_id))
            .order_by_asc(CartCol::CreatedAt)
            .order_by_asc(CartCol::ProductId)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(cart_entry_from_entity)
            .collect();
        Ok(entries)
    }

    async fn delete_cart_entry(&self, user_id: &str, product_id: i64) -> StoreResult<u64> {
        let result = CartEntries::delete_many()
            .filter(CartCol::UserId.eq(user_id))
            .filter(CartCol::ProductId.eq(product_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn update_cart_quantity(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: i32,
    ) -> StoreResult<u64> {
        let result = CartEntries::update_many()
            .col_expr(CartCol::Quantity, Expr::value(quantity))
            .filter(CartCol::UserId.eq(user_id))
            .filter(CartCol::ProductId.eq(product_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}

fn classify(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Duplicate(detail),
        _ => StoreError::Database(err),
    }
}

fn stored_user_from_entity(model: UserModel) -> StoredUser {
    StoredUser {
        user: User {
            id: model.id,
            username: model.username,
            email: model.email,
            created_at: model.created_at.with_timezone(&Utc),
        },
        password_hash: model.password,
    }
}

fn item_from_entity(model: ItemModel) -> Item {
    Item {
        id: model.id,
        category_id: model.category_id,
        name: model.name,
        price: model.price,
        image_url: model.image_url,
    }
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}

fn cart_entry_from_entity(model: CartModel) -> CartEntry {
    CartEntry {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        category_id: model.category_id,
        name: model.name,
        price: model.price,
        image_url: model.image_url,
        quantity: model.quantity,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
