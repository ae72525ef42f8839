//! User model
//!
//! Passive record type; nothing enforces a relationship between
//! `Task.assignee_id` and a user.

use serde::{Deserialize, Serialize};

/// A user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }
}
