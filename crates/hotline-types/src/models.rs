use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed identifier of the single admin status record.
pub const ADMIN_STATUS_ID: &str = "admin_status";

/// An account. The password doubles as the login credential, so it must be
/// unique across all users; it is stored and returned in plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub password: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// A direct message. Sender and receiver are not checked against the user set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True if `user_id` sent or received this message.
    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// True if this message belongs to the conversation between `a` and `b`,
    /// in either direction.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Busy,
}

/// Availability broadcast by the admin to every user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatus {
    pub id: String,
    pub status: Availability,
    pub updated_at: DateTime<Utc>,
}

impl AdminStatus {
    pub fn new() -> Self {
        Self {
            id: ADMIN_STATUS_ID.to_string(),
            status: Availability::default(),
            updated_at: Utc::now(),
        }
    }
}

impl Default for AdminStatus {
    fn default() -> Self {
        Self::new()
    }
}
