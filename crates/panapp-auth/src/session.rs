use panapp_store::StoreAdapter;
use panapp_types::User;

/// Durable-store key of the current-session record.
pub const SESSION_KEY: &str = "user.session";

/// The persisted "currently logged-in user" record.
///
/// Holds the public [`User`] view only, never a credential record. Absent
/// means logged out. Kept separate from the credential table so logout can
/// drop it without touching credentials.
pub struct SessionStore {
    store: StoreAdapter,
}

impl SessionStore {
    pub fn new(store: StoreAdapter) -> Self {
        Self { store }
    }

    /// The logged-in user, if any.
    pub fn current(&self) -> Option<User> {
        self.store.read_record(SESSION_KEY)
    }

    /// Persist `user` as the session owner.
    pub fn save(&self, user: &User) {
        self.store.write_record(SESSION_KEY, user);
    }

    /// Log out: drop the session record, credentials stay.
    pub fn clear(&self) {
        self.store.remove(SESSION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use panapp_types::RecordId;

    fn user() -> User {
        User {
            id: RecordId::new(),
            username: "ana".into(),
            name: "Ana".into(),
            email: None,
            avatar: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn save_then_current_then_clear() {
        let session = SessionStore::new(StoreAdapter::in_memory());
        assert!(session.current().is_none());

        let ana = user();
        session.save(&ana);
        assert_eq!(session.current(), Some(ana));

        session.clear();
        assert!(session.current().is_none());
    }

    #[test]
    fn clear_when_logged_out_is_a_no_op() {
        let session = SessionStore::new(StoreAdapter::in_memory());
        session.clear();
        assert!(session.current().is_none());
    }
}
