use panapp_auth::{AuthError, AuthResult, CredentialDirectory, NewUser, ProfilePatch, SessionStore};
use panapp_store::StoreAdapter;
use panapp_types::User;
use tracing::debug;

/// Session user lifecycle over the credential subsystem.
///
/// Mirrors the persisted `user.session` record in memory the same way the
/// collection stores mirror their tables: mutations write through, the
/// in-memory user is what the collaborator renders.
pub struct AuthState {
    directory: CredentialDirectory,
    session: SessionStore,
    user: Option<User>,
    is_loading: bool,
}

impl AuthState {
    pub fn new(store: StoreAdapter) -> Self {
        Self {
            directory: CredentialDirectory::new(store.clone()),
            session: SessionStore::new(store),
            user: None,
            is_loading: true,
        }
    }

    /// Bootstrap: pick up a session persisted by a previous run, if any.
    pub fn init(&mut self) {
        self.user = self.session.current();
        self.is_loading = false;
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// `true` until the first [`init`](Self::init) completes.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Create a credential record and log the new user straight in.
    pub fn register(&mut self, new_user: NewUser) -> AuthResult<User> {
        let user = self.directory.register(new_user)?;
        self.session.save(&user);
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Authenticate and establish the session. `None` on unknown
    /// username or wrong password; the current session is untouched in
    /// that case.
    pub fn login(&mut self, username: &str, password: &str) -> Option<User> {
        let user = self.directory.authenticate(username, password)?;
        debug!(username = %user.username, "login");
        self.session.save(&user);
        self.user = Some(user.clone());
        Some(user)
    }

    /// Drop the session record and the in-memory user. Credentials and
    /// entity tables stay durable.
    pub fn logout(&mut self) {
        self.session.clear();
        self.user = None;
    }

    /// Merge profile fields into both the credential record and the
    /// session record. No-op when logged out.
    pub fn update_profile(&mut self, patch: ProfilePatch) {
        let Some(user) = self.user.as_mut() else {
            return;
        };
        self.directory.update_profile(user.id, patch.clone());
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = Some(email);
        }
        if let Some(avatar) = patch.avatar {
            user.avatar = Some(avatar);
        }
        self.session.save(user);
    }

    /// Change the logged-in user's password, gated on the current one.
    pub fn change_password(&mut self, current: &str, new: &str) -> AuthResult<()> {
        let user = self.user.as_ref().ok_or(AuthError::UserNotFound)?;
        self.directory.change_password(user.id, current, new)
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("user", &self.user.as_ref().map(|u| u.username.as_str()))
            .field("is_loading", &self.is_loading)
            .finish()
    }
}
