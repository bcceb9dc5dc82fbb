use anyhow::{anyhow, bail, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::model::{Item, ItemId, NewUser, User, UserId};
use crate::store::traits::{ItemStore, Store, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    items: BTreeMap<ItemId, Item>,
    last_user_id: UserId,
    last_item_id: ItemId,
}

/// In-process store with the same ordering, id generation and foreign-key
/// behavior as the Postgres schema. Used for tests and database-less runs.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }

    /// While unavailable every operation fails like a dropped connection
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(anyhow!("connection refused: memory store marked unavailable"))
        }
    }

    /// Look up a single item regardless of owner
    pub fn item(&self, id: ItemId) -> Option<Item> {
        self.tables.read().items.get(&id).cloned()
    }

    /// Look up a single user
    pub fn user(&self, id: UserId) -> Option<User> {
        self.tables.read().users.get(&id).cloned()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.ensure_available()?;
        Ok(self.tables.read().users.values().cloned().collect())
    }

    async fn create_user(&self, user: NewUser) -> Result<UserId> {
        self.ensure_available()?;
        let mut tables = self.tables.write();
        tables.last_user_id += 1;
        let id = tables.last_user_id;
        tables.users.insert(
            id,
            User {
                id,
                name: user.name,
                color: user.color,
            },
        );
        Ok(id)
    }

    async fn rename_user(&self, id: UserId, name: &str) -> Result<bool> {
        self.ensure_available()?;
        let mut tables = self.tables.write();
        match tables.users.get_mut(&id) {
            Some(user) => {
                user.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl ItemStore for MemoryStore {
    async fn list_items_for_user(&self, user_id: UserId) -> Result<Vec<Item>> {
        self.ensure_available()?;
        Ok(self
            .tables
            .read()
            .items
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_item(&self, user_id: UserId, title: &str) -> Result<ItemId> {
        self.ensure_available()?;
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&user_id) {
            bail!("insert on items violates foreign key: user {} does not exist", user_id);
        }
        tables.last_item_id += 1;
        let id = tables.last_item_id;
        tables.items.insert(
            id,
            Item {
                id,
                title: title.to_string(),
                user_id,
            },
        );
        Ok(id)
    }

    async fn update_item_title(&self, id: ItemId, user_id: UserId, title: &str) -> Result<bool> {
        self.ensure_available()?;
        let mut tables = self.tables.write();
        match tables.items.get_mut(&id) {
            Some(item) if item.user_id == user_id => {
                item.title = title.to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_item(&self, id: ItemId, user_id: UserId) -> Result<bool> {
        self.ensure_available()?;
        let mut tables = self.tables.write();
        let owned = tables
            .items
            .get(&id)
            .is_some_and(|item| item.user_id == user_id);
        if owned {
            tables.items.remove(&id);
        }
        Ok(owned)
    }
}

impl Store for MemoryStore {}
