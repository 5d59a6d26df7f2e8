use anyhow::Result;
use chrono::Utc;
use hotline_types::models::{AdminStatus, Availability, Message, User};
use uuid::Uuid;

use crate::Store;

impl Store {
    // -- Users --

    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.with_tables(|t| {
            Ok(t.user_index.get(id).and_then(|&i| t.users.get(i)).cloned())
        })
    }

    /// First user (in creation order) whose password equals `password`.
    pub fn get_user_by_password(&self, password: &str) -> Result<Option<User>> {
        self.with_tables(|t| Ok(t.users.iter().find(|u| u.password == password).cloned()))
    }

    /// Creates a regular (non-admin) user. Password uniqueness is the caller's
    /// job: this always inserts.
    pub fn create_user(&self, name: &str, password: &str) -> Result<User> {
        let user = new_user(name, password, false);
        self.with_tables_mut(|t| {
            t.user_index.insert(user.id.clone(), t.users.len());
            t.users.push(user.clone());
            Ok(())
        })?;
        Ok(user)
    }

    /// Every user, admin included, in creation order.
    pub fn get_all_users(&self) -> Result<Vec<User>> {
        self.with_tables(|t| Ok(t.users.clone()))
    }

    // -- Messages --

    pub fn create_message(&self, sender_id: &str, receiver_id: &str, content: &str) -> Result<Message> {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.with_tables_mut(|t| {
            t.messages.push(message.clone());
            Ok(())
        })?;
        Ok(message)
    }

    /// The conversation between two users, oldest first. Argument order does
    /// not matter.
    pub fn get_messages_between_users(&self, user_id1: &str, user_id2: &str) -> Result<Vec<Message>> {
        self.with_tables(|t| {
            Ok(sorted_by_creation(
                t.messages.iter().filter(|m| m.is_between(user_id1, user_id2)),
            ))
        })
    }

    /// Every message the user sent or received, oldest first.
    pub fn get_user_messages(&self, user_id: &str) -> Result<Vec<Message>> {
        self.with_tables(|t| {
            Ok(sorted_by_creation(t.messages.iter().filter(|m| m.involves(user_id))))
        })
    }

    // -- Admin status --

    pub fn get_admin_status(&self) -> Result<AdminStatus> {
        self.with_tables(|t| Ok(t.admin_status.clone()))
    }

    /// Merges `status` (if given) into the record and refreshes `updated_at`.
    pub fn update_admin_status(&self, status: Option<Availability>) -> Result<AdminStatus> {
        self.with_tables_mut(|t| {
            if let Some(status) = status {
                t.admin_status.status = status;
            }
            t.admin_status.updated_at = Utc::now();
            Ok(t.admin_status.clone())
        })
    }
}

pub(crate) fn new_user(name: &str, password: &str, is_admin: bool) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        password: password.to_string(),
        is_admin,
        created_at: Utc::now(),
    }
}

// Stable sort: messages created in the same instant keep insertion order.
fn sorted_by_creation<'a>(messages: impl Iterator<Item = &'a Message>) -> Vec<Message> {
    let mut out: Vec<Message> = messages.cloned().collect();
    out.sort_by_key(|m| m.created_at);
    out
}
