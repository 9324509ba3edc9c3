use shopcart_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    models::{Item, NewCategory, NewUser},
    services::auth_service::hash_password,
    store::{PgStore, Store},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let store = PgStore::new(orm);

    seed_categories(&store).await?;
    seed_items(&store).await?;
    ensure_user(&store, "demo", "demo@example.com", "demo123").await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_categories(store: &PgStore) -> anyhow::Result<()> {
    let categories = [
        ("Fruits", "Fresh seasonal fruit"),
        ("Vegetables", "Farm vegetables"),
        ("Bakery", "Bread and pastries"),
    ];

    let existing = store.list_categories().await?;
    for (name, description) in categories {
        if existing.iter().any(|c| c.name == name) {
            continue;
        }
        store
            .insert_category(NewCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .await?;
    }

    println!("Seeded categories");
    Ok(())
}

async fn seed_items(store: &PgStore) -> anyhow::Result<()> {
    let items = [
        (1, 1, "Apple", 120.0, "https://example.com/img/apple.png"),
        (2, 1, "Mango", 150.0, "https://example.com/img/mango.png"),
        (3, 2, "Carrot", 40.0, "https://example.com/img/carrot.png"),
        (4, 2, "Spinach", 30.0, "https://example.com/img/spinach.png"),
        (5, 3, "Sourdough", 220.0, "https://example.com/img/sourdough.png"),
    ];

    for (id, category_id, name, price, image_url) in items {
        if store.find_item(id).await?.is_some() {
            continue;
        }
        store
            .insert_item(Item {
                id,
                category_id,
                name: name.to_string(),
                price,
                image_url: image_url.to_string(),
            })
            .await?;
    }

    println!("Seeded items");
    Ok(())
}

async fn ensure_user(
    store: &PgStore,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    if store.find_user_by_username(username).await?.is_some() {
        println!("User {username} already present");
        return Ok(());
    }

    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let user = store
        .insert_user(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    println!("Ensured user {username} (id={})", user.id);
    Ok(())
}
