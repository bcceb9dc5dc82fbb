use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use uuid::Uuid;

use crate::model::{User, UserId};
use crate::session::ActiveSelection;

/// How active-user selections are scoped across clients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    #[default]
    /// Each client (identified by its session cookie) has its own selection
    PerClient,
    /// One selection shared by every client of the process
    Shared,
}

/// Identifies whose selection a request reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Shared,
    Client(Uuid),
}

/// Upper bound on remembered client selections
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    selection: ActiveSelection,
    last_seen: Instant,
}

/// Selections keyed by session. Holds at most `max_sessions` entries; the
/// least recently touched one is evicted to make room, and that client falls
/// back to `initial_user_id` like a new one.
#[derive(Debug)]
pub struct SessionRegistry {
    mode: SessionMode,
    initial_user_id: Option<UserId>,
    max_sessions: usize,
    selections: RwLock<HashMap<SessionKey, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new(mode: SessionMode, initial_user_id: Option<UserId>) -> Self {
        Self {
            mode,
            initial_user_id,
            max_sessions: DEFAULT_MAX_SESSIONS,
            selections: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Key for a client's cookie id; in shared mode every client maps to the same slot
    pub fn key_for(&self, client_id: Option<Uuid>) -> SessionKey {
        match (self.mode, client_id) {
            (SessionMode::PerClient, Some(id)) => SessionKey::Client(id),
            _ => SessionKey::Shared,
        }
    }

    pub fn get(&self, key: &SessionKey) -> Option<UserId> {
        match self.selections.read().get(key) {
            Some(entry) => entry.selection.get(),
            None => self.initial_user_id,
        }
    }

    pub fn set(&self, key: &SessionKey, id: UserId) {
        let mut selections = self.selections.write();
        if let Some(entry) = selections.get_mut(key) {
            entry.selection.set(id);
            entry.last_seen = Instant::now();
            return;
        }

        let mut selection = ActiveSelection::new(self.initial_user_id);
        selection.set(id);
        self.insert(&mut selections, *key, selection);
    }

    /// An unseen session whose reconciled selection is still the initial one
    /// is not stored; [`SessionRegistry::get`] already answers that value.
    pub fn reconcile(&self, key: &SessionKey, users: &[User]) -> Option<UserId> {
        let mut selections = self.selections.write();
        if let Some(entry) = selections.get_mut(key) {
            entry.last_seen = Instant::now();
            return entry.selection.reconcile(users);
        }

        let mut selection = ActiveSelection::new(self.initial_user_id);
        let current = selection.reconcile(users);
        if current != self.initial_user_id {
            self.insert(&mut selections, *key, selection);
        }
        current
    }

    fn insert(
        &self,
        selections: &mut HashMap<SessionKey, SessionEntry>,
        key: SessionKey,
        selection: ActiveSelection,
    ) {
        while selections.len() >= self.max_sessions {
            let oldest = selections
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(key, _)| *key);
            match oldest {
                Some(oldest) => {
                    selections.remove(&oldest);
                    log::debug!("Evicted session {:?}", oldest);
                }
                None => break,
            }
        }
        selections.insert(
            key,
            SessionEntry {
                selection,
                last_seen: Instant::now(),
            },
        );
    }

    /// Number of sessions currently holding a stored selection
    pub fn len(&self) -> usize {
        self.selections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.read().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionMode::default(), Some(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId) -> User {
        User {
            id,
            name: format!("user-{}", id),
            color: "#000".to_string(),
        }
    }

    #[test]
    fn test_per_client_selections_are_independent() {
        let registry = SessionRegistry::new(SessionMode::PerClient, Some(1));
        let a = registry.key_for(Some(Uuid::new_v4()));
        let b = registry.key_for(Some(Uuid::new_v4()));
        assert_ne!(a, b);

        registry.set(&a, 2);
        assert_eq!(registry.get(&a), Some(2));
        assert_eq!(registry.get(&b), Some(1));
    }

    #[test]
    fn test_shared_mode_collapses_clients() {
        let registry = SessionRegistry::new(SessionMode::Shared, Some(1));
        let a = registry.key_for(Some(Uuid::new_v4()));
        let b = registry.key_for(Some(Uuid::new_v4()));
        assert_eq!(a, SessionKey::Shared);

        registry.set(&a, 3);
        assert_eq!(registry.get(&b), Some(3));
    }

    #[test]
    fn test_unseen_session_starts_at_initial_id() {
        let registry = SessionRegistry::new(SessionMode::PerClient, Some(1));
        let key = registry.key_for(Some(Uuid::new_v4()));
        assert_eq!(registry.reconcile(&key, &[user(5), user(6)]), Some(5));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_initial_selection_is_not_stored() {
        let registry = SessionRegistry::new(SessionMode::PerClient, Some(1));
        for _ in 0..100 {
            let key = registry.key_for(Some(Uuid::new_v4()));
            assert_eq!(registry.reconcile(&key, &[user(1), user(2)]), Some(1));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_capacity_evicts_least_recently_seen() {
        let registry = SessionRegistry::new(SessionMode::PerClient, Some(1)).with_max_sessions(3);
        let keys: Vec<SessionKey> = (0..10)
            .map(|_| registry.key_for(Some(Uuid::new_v4())))
            .collect();

        for (n, key) in keys.iter().enumerate() {
            registry.set(key, n as UserId + 2);
            assert!(registry.len() <= 3);
        }

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(&keys[9]), Some(11));
        // Evicted sessions read as new ones
        let evicted = keys.iter().filter(|key| registry.get(key) == Some(1)).count();
        assert_eq!(evicted, 7);
    }
}
