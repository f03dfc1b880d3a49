use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// Public view of a registered user.
///
/// This is what the rest of the application sees: the session record, the
/// return value of authentication, the profile screen. It never carries the
/// password digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    /// Login name, unique case-insensitively across the credential table.
    pub username: String,
    /// Display name.
    pub name: String,
    pub email: Option<String>,
    /// Data URI or URL of the profile picture.
    pub avatar: Option<String>,
    /// Set at registration, immutable afterwards.
    pub created_at: DateTime<Utc>,
}

/// Stored credential record: the [`User`] fields plus the password digest.
///
/// Lives only in the `user.credentials` table. Exactly one record exists per
/// case-insensitive username.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: RecordId,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Hex-encoded one-way digest of the password. Never leaves this record.
    pub password_hash: String,
}

impl Credential {
    /// The public view, digest stripped.
    pub fn to_public(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            created_at: self.created_at,
        }
    }

    /// Case-insensitive username match, the uniqueness key of the table.
    pub fn matches_username(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(username: &str) -> Credential {
        Credential {
            id: RecordId::new(),
            username: username.into(),
            name: "Ana".into(),
            email: Some("ana@example.com".into()),
            avatar: None,
            created_at: Utc::now(),
            password_hash: "deadbeef".into(),
        }
    }

    #[test]
    fn public_view_drops_the_digest() {
        let cred = credential("ana");
        let user = cred.to_public();
        assert_eq!(user.id, cred.id);
        assert_eq!(user.username, "ana");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("deadbeef"));
    }

    #[test]
    fn username_match_ignores_case() {
        let cred = credential("Ana");
        assert!(cred.matches_username("ana"));
        assert!(cred.matches_username("ANA"));
        assert!(!cred.matches_username("anna"));
    }

    #[test]
    fn stored_layout_uses_camel_case() {
        let json = serde_json::to_value(credential("ana")).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("passwordHash").is_some());
        assert!(json.get("created_at").is_none());
    }
}
