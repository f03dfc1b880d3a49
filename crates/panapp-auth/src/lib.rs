//! Credential subsystem for the panapp core.
//!
//! Two persisted tables, both behind the fail-soft
//! [`StoreAdapter`](panapp_store::StoreAdapter):
//!
//! - `user.credentials` -- one [`Credential`](panapp_types::Credential)
//!   record per registered user, managed by [`CredentialDirectory`]
//! - `user.session` -- the currently logged-in public user, managed by
//!   [`SessionStore`]
//!
//! Domain failures (duplicate username, wrong password, ...) are explicit
//! [`AuthError`] values, never panics: the collaborator branches on them
//! without exception machinery.

pub mod directory;
pub mod error;
pub mod password;
pub mod session;

pub use directory::{CredentialDirectory, NewUser, ProfilePatch, CREDENTIALS_KEY};
pub use error::{AuthError, AuthResult};
pub use session::{SessionStore, SESSION_KEY};
