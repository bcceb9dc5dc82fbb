//! Request-independent core of every endpoint: reconcile the caller's
//! selection, run the scoped queries, and hand back view data or the
//! outcome of a mutation.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::model::{find_user, Item, ItemId, NewUser, User, UserId, DEFAULT_ACCENT_COLOR};
use crate::session::{SessionKey, SessionRegistry};
use crate::store::traits::Store;

/// Title shown when no user is selected
pub const FALLBACK_LIST_TITLE: &str = "To-Do";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub list_title: String,
    pub list_items: Vec<Item>,
    pub users: Vec<User>,
    pub current_user_id: Option<UserId>,
    pub accent_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserView {
    pub accent_color: String,
}

fn accent_color(user: Option<&User>) -> String {
    user.map(|user| user.color.clone())
        .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string())
}

/// Reload users and repair the caller's selection against them
async fn reconciled_users<S: Store>(
    store: &S,
    sessions: &SessionRegistry,
    key: &SessionKey,
) -> Result<(Vec<User>, Option<UserId>)> {
    let users = store.list_users().await?;
    let current = sessions.reconcile(key, &users);
    Ok((users, current))
}

pub async fn load_list_view<S: Store>(
    store: &S,
    sessions: &SessionRegistry,
    key: &SessionKey,
) -> Result<ListView> {
    let (users, current) = reconciled_users(store, sessions, key).await?;

    let list_items = match current {
        Some(user_id) => store.list_items_for_user(user_id).await?,
        None => Vec::new(),
    };

    let current_user = find_user(&users, current);
    let list_title = current_user
        .map(User::list_title)
        .unwrap_or_else(|| FALLBACK_LIST_TITLE.to_string());
    let accent_color = accent_color(current_user);

    Ok(ListView {
        list_title,
        list_items,
        users,
        current_user_id: current,
        accent_color,
    })
}

pub async fn add_item<S: Store>(
    store: &S,
    sessions: &SessionRegistry,
    key: &SessionKey,
    title: &str,
) -> Result<ItemId> {
    let user_id = sessions
        .get(key)
        .ok_or_else(|| anyhow!("no active user to own the new item"))?;
    let id = store.add_item(user_id, title).await?;
    log::debug!("Added item {} for user {}", id, user_id);
    Ok(id)
}

/// Returns whether an item owned by the active user was updated
pub async fn edit_item<S: Store>(
    store: &S,
    sessions: &SessionRegistry,
    key: &SessionKey,
    id: ItemId,
    title: &str,
) -> Result<bool> {
    let Some(user_id) = sessions.get(key) else {
        return Ok(false);
    };
    let updated = store.update_item_title(id, user_id, title).await?;
    if !updated {
        log::debug!("Edit of item {} by user {} matched nothing", id, user_id);
    }
    Ok(updated)
}

/// Returns whether an item owned by the active user was deleted
pub async fn delete_item<S: Store>(
    store: &S,
    sessions: &SessionRegistry,
    key: &SessionKey,
    id: ItemId,
) -> Result<bool> {
    let Some(user_id) = sessions.get(key) else {
        return Ok(false);
    };
    let deleted = store.delete_item(id, user_id).await?;
    if !deleted {
        log::debug!("Delete of item {} by user {} matched nothing", id, user_id);
    }
    Ok(deleted)
}

pub async fn new_user_form<S: Store>(
    store: &S,
    sessions: &SessionRegistry,
    key: &SessionKey,
) -> Result<NewUserView> {
    let (users, current) = reconciled_users(store, sessions, key).await?;
    Ok(NewUserView {
        accent_color: accent_color(find_user(&users, current)),
    })
}

/// Select `user_id` without checking it exists; the next list view reconciles it
pub fn switch_user(sessions: &SessionRegistry, key: &SessionKey, user_id: UserId) {
    sessions.set(key, user_id);
    log::debug!("Session {:?} switched to user {}", key, user_id);
}

pub async fn create_user<S: Store>(
    store: &S,
    sessions: &SessionRegistry,
    key: &SessionKey,
    name: String,
    color: Option<String>,
) -> Result<UserId> {
    let id = store.create_user(NewUser::new(name, color)).await?;
    sessions.set(key, id);
    log::info!("Created user {}", id);
    Ok(id)
}

/// Any user may be renamed regardless of who is active
pub async fn rename_user<S: Store>(store: &S, user_id: UserId, name: &str) -> Result<bool> {
    store.rename_user(user_id, name).await
}
