pub mod item;
pub mod user;

pub use item::*;
pub use user::*;

/// Server-generated key of a row in `users` (Postgres SERIAL)
pub type UserId = i32;
/// Server-generated key of a row in `items` (Postgres SERIAL)
pub type ItemId = i32;
