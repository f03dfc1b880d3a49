use chrono::Utc;
use panapp_store::StoreAdapter;
use panapp_types::{Credential, RecordId, User};
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use crate::password;

/// Durable-store key of the credential table.
pub const CREDENTIALS_KEY: &str = "user.credentials";

/// Caller-supplied fields for registering a user.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: Option<String>,
}

/// Partial update of non-credential profile fields. `None` fields are left
/// untouched; the password digest is never writable through this type.
#[derive(Clone, Debug, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

/// The persisted user-credential table.
///
/// Invariant: exactly one [`Credential`] record per case-insensitive
/// username. Every operation reads the whole table, mutates it, and writes
/// it back; the table is small (one row per staff member) and access is
/// single-threaded.
pub struct CredentialDirectory {
    store: StoreAdapter,
}

impl CredentialDirectory {
    pub fn new(store: StoreAdapter) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Credential> {
        self.store.read_table(CREDENTIALS_KEY)
    }

    fn save(&self, table: &[Credential]) {
        self.store.write_table(CREDENTIALS_KEY, table);
    }

    /// Create a credential record and return the public view.
    ///
    /// Fails with [`AuthError::MissingField`] when username, password, or
    /// name is empty, and [`AuthError::DuplicateUsername`] when the
    /// username is already taken (case-insensitive). Password policy
    /// (minimum length) is the caller's responsibility.
    pub fn register(&self, new_user: NewUser) -> AuthResult<User> {
        if new_user.username.is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        if new_user.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if new_user.name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }

        let mut table = self.load();
        if table.iter().any(|c| c.matches_username(&new_user.username)) {
            return Err(AuthError::DuplicateUsername);
        }

        let credential = Credential {
            id: RecordId::new(),
            username: new_user.username,
            name: new_user.name,
            email: new_user.email,
            avatar: None,
            created_at: Utc::now(),
            password_hash: password::digest(&new_user.password),
        };
        let user = credential.to_public();
        debug!(username = %user.username, "registered user");
        table.push(credential);
        self.save(&table);
        Ok(user)
    }

    /// Look up by case-insensitive username and check the password.
    /// `None` covers both "no such user" and "wrong password"; the
    /// collaborator shows one message for either.
    pub fn authenticate(&self, username: &str, password_plain: &str) -> Option<User> {
        let table = self.load();
        let credential = table.iter().find(|c| c.matches_username(username))?;
        password::verify(password_plain, &credential.password_hash)
            .then(|| credential.to_public())
    }

    /// Replace the stored digest, gated on the current password.
    pub fn change_password(
        &self,
        user_id: RecordId,
        current: &str,
        new: &str,
    ) -> AuthResult<()> {
        let mut table = self.load();
        let credential = table
            .iter_mut()
            .find(|c| c.id == user_id)
            .ok_or(AuthError::UserNotFound)?;
        if !password::verify(current, &credential.password_hash) {
            return Err(AuthError::WrongPassword);
        }
        credential.password_hash = password::digest(new);
        self.save(&table);
        Ok(())
    }

    /// Merge profile fields into the stored record, digest untouched.
    /// Silent no-op when no record carries `user_id`.
    pub fn update_profile(&self, user_id: RecordId, patch: ProfilePatch) {
        let mut table = self.load();
        let Some(credential) = table.iter_mut().find(|c| c.id == user_id) else {
            return;
        };
        if let Some(name) = patch.name {
            credential.name = name;
        }
        if let Some(email) = patch.email {
            credential.email = Some(email);
        }
        if let Some(avatar) = patch.avatar {
            credential.avatar = Some(avatar);
        }
        self.save(&table);
    }
}
