use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ReactionID;

/// Lives only inside its parent `Thought`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: ReactionID,
    pub reaction_body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(id: ReactionID, reaction_body: &str, username: &str) -> Self {
        Self {
            id,
            reaction_body: reaction_body.to_string(),
            username: username.to_string(),
            created_at: Utc::now(),
        }
    }
}
