use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Reaction, ReactionID, ThoughtID};

/// A thought with its reactions embedded. `username` is the author's name at
/// the time of writing and is not kept in sync with the `User` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: ThoughtID,
    pub thought_text: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Thought {
    pub fn new(id: ThoughtID, thought_text: &str, username: &str) -> Self {
        Self {
            id,
            thought_text: thought_text.to_string(),
            username: username.to_string(),
            created_at: Utc::now(),
            reactions: vec![],
        }
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    pub fn get_reaction(&self, id: &ReactionID) -> Option<&Reaction> {
        self.reactions.iter().find(|r| &r.id == id)
    }

    /// Reaction ids are only unique within one thought, so they are generated
    /// against this thought's own list.
    pub fn has_reaction_id(&self, id: &str) -> bool {
        self.reactions.iter().any(|r| r.id.0 == id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtPatch {
    pub thought_text: Option<String>,
    pub username: Option<String>,
}

impl ThoughtPatch {
    pub fn apply(&self, thought: &mut Thought) {
        if let Some(text) = &self.thought_text {
            thought.thought_text = text.clone();
        }
        if let Some(username) = &self.username {
            thought.username = username.clone();
        }
    }
}
