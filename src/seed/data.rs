use crate::model::NewUser;
use crate::store::traits::Store;
use anyhow::Result;

/// Demo profiles and their starting lists
const SEED_USERS: &[(&str, &str, &[&str])] = &[
    ("Angela", "teal", &["Buy milk", "Finish homework"]),
    ("Jack", "powderblue", &["Walk the dog"]),
];

/// Insert demo users and items. Does nothing when any user already exists,
/// so restarting with seeding enabled never duplicates rows.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<bool> {
    if !store.list_users().await?.is_empty() {
        log::info!("Users already present, skipping seed data");
        return Ok(false);
    }

    for (name, color, items) in SEED_USERS {
        let user_id = store
            .create_user(NewUser::new(name.to_string(), Some(color.to_string())))
            .await?;
        for title in items.iter() {
            store.add_item(user_id, title).await?;
        }
    }

    log::info!("Loaded seed data for {} users", SEED_USERS.len());
    Ok(true)
}
