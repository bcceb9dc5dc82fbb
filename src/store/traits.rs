use crate::model::{Item, ItemId, NewUser, User, UserId};
use anyhow::Result;

#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// All users ordered by ascending id
    async fn list_users(&self) -> Result<Vec<User>>;
    /// Insert a user and return its generated id
    async fn create_user(&self, user: NewUser) -> Result<UserId>;
    /// Rename a user; returns whether a row matched
    async fn rename_user(&self, id: UserId, name: &str) -> Result<bool>;
}

/// Item operations. Every mutation is scoped by the owning user's id, so a
/// known item id alone is never enough to touch another user's row.
#[async_trait::async_trait]
pub trait ItemStore: Send + Sync {
    /// Items owned by `user_id` ordered by ascending id
    async fn list_items_for_user(&self, user_id: UserId) -> Result<Vec<Item>>;
    /// Insert an item and return its generated id
    async fn add_item(&self, user_id: UserId, title: &str) -> Result<ItemId>;
    /// Returns whether a row matched both `id` and `user_id`
    async fn update_item_title(&self, id: ItemId, user_id: UserId, title: &str) -> Result<bool>;
    /// Returns whether a row matched both `id` and `user_id`
    async fn delete_item(&self, id: ItemId, user_id: UserId) -> Result<bool>;
}

pub trait Store: UserStore + ItemStore + Send + Sync {}
