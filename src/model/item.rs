use serde::{Deserialize, Serialize};

use crate::model::{ItemId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub user_id: UserId,
}
