use serde::{Deserialize, Serialize};

use crate::model::UserId;

/// Accent color given to users created without one
pub const DEFAULT_ACCENT_COLOR: &str = "#a683e3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub color: String,
}

impl User {
    /// Title shown above this user's list
    pub fn list_title(&self) -> String {
        format!("{}'s List", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub color: String,
}

impl NewUser {
    /// An empty or missing color falls back to [`DEFAULT_ACCENT_COLOR`].
    pub fn new(name: String, color: Option<String>) -> Self {
        let color = match color {
            Some(color) if !color.is_empty() => color,
            _ => DEFAULT_ACCENT_COLOR.to_string(),
        };
        Self { name, color }
    }
}

/// Find a user by id in an already loaded list
pub fn find_user(users: &[User], id: Option<UserId>) -> Option<&User> {
    let id = id?;
    users.iter().find(|user| user.id == id)
}
