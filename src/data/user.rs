use serde::{Deserialize, Serialize};

use super::{ThoughtID, UserID};

/// A registered user. `thoughts` and `friends` are weak references: they are
/// kept for lookup only and never govern the lifetime of what they point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserID,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub thoughts: Vec<ThoughtID>,
    #[serde(default)]
    pub friends: Vec<UserID>,
}

impl User {
    pub fn new(id: UserID, username: &str, email: &str) -> Self {
        Self {
            id,
            username: username.trim().to_string(),
            email: email.to_string(),
            thoughts: vec![],
            friends: vec![],
        }
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn apply(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.trim().to_string();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
    }
}
