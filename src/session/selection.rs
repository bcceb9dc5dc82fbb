use crate::model::{User, UserId};

/// The user id a client currently has selected. Never validated on write;
/// [`ActiveSelection::reconcile`] repairs it against the live user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveSelection {
    current: Option<UserId>,
}

impl ActiveSelection {
    pub fn new(current: Option<UserId>) -> Self {
        Self { current }
    }

    pub fn get(&self) -> Option<UserId> {
        self.current
    }

    pub fn set(&mut self, id: UserId) {
        self.current = Some(id);
    }

    /// Falls back to the first user (lowest id) when the selected id is not
    /// in `users`. An empty list clears the selection.
    pub fn reconcile(&mut self, users: &[User]) -> Option<UserId> {
        let present = self
            .current
            .is_some_and(|id| users.iter().any(|user| user.id == id));
        if !present {
            self.current = users.iter().map(|user| user.id).min();
        }
        self.current
    }
}
