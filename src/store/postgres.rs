use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool, Row,
};

use crate::model::{Item, ItemId, NewUser, User, UserId, DEFAULT_ACCENT_COLOR};
use crate::store::traits::{ItemStore, Store, UserStore};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given connection options
    pub async fn new(options: PgConnectOptions, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the `users` and `items` tables if they do not exist yet
    pub async fn migrate(&self) -> Result<()> {
        let create_users = format!(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                color TEXT NOT NULL DEFAULT '{}'
            )
            "#,
            DEFAULT_ACCENT_COLOR
        );
        sqlx::query(&create_users)
            .execute(&self.pool)
            .await
            .context("Failed to create users table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id SERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create items table")?;

        log::info!("Database schema ready (users, items)");
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT id, name, color FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list users")
    }

    async fn create_user(&self, user: NewUser) -> Result<UserId> {
        let row = sqlx::query("INSERT INTO users (name, color) VALUES ($1, $2) RETURNING id")
            .bind(&user.name)
            .bind(&user.color)
            .fetch_one(&self.pool)
            .await
            .context("Failed to create user")?;

        Ok(row.try_get("id")?)
    }

    async fn rename_user(&self, id: UserId, name: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET name = $1 WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to rename user")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl ItemStore for PostgresStore {
    async fn list_items_for_user(&self, user_id: UserId) -> Result<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT id, title, user_id FROM items WHERE user_id = $1 ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list items")
    }

    async fn add_item(&self, user_id: UserId, title: &str) -> Result<ItemId> {
        let row = sqlx::query("INSERT INTO items (title, user_id) VALUES ($1, $2) RETURNING id")
            .bind(title)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to add item")?;

        Ok(row.try_get("id")?)
    }

    async fn update_item_title(&self, id: ItemId, user_id: UserId, title: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE items SET title = $1 WHERE id = $2 AND user_id = $3")
            .bind(title)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to update item")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_item(&self, id: ItemId, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete item")?;

        Ok(result.rows_affected() > 0)
    }
}

impl Store for PostgresStore {}
