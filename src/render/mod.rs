//! JSON shapes returned to clients. Counts are derived here on every read and
//! never stored; timestamps are rendered as locale text.

use serde::Serialize;

use crate::{
    data::{Reaction, ReactionID, Thought, ThoughtID, User, UserID},
    db::PopulatedUser,
};

use self::format::format_date_time;

mod format;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView<'a> {
    pub id: &'a UserID,
    pub username: &'a str,
    pub email: &'a str,
    pub thoughts: &'a [ThoughtID],
    pub friends: &'a [UserID],
    pub friend_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedUserView<'a> {
    pub id: &'a UserID,
    pub username: &'a str,
    pub email: &'a str,
    pub thoughts: Vec<ThoughtView<'a>>,
    pub friends: Vec<UserView<'a>>,
    pub friend_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtView<'a> {
    pub id: &'a ThoughtID,
    pub thought_text: &'a str,
    pub username: &'a str,
    pub created_at: String,
    pub reactions: Vec<ReactionView<'a>>,
    pub reaction_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionView<'a> {
    pub id: &'a ReactionID,
    pub reaction_body: &'a str,
    pub username: &'a str,
    pub created_at: String,
}

pub fn render_user(user: &User) -> UserView<'_> {
    UserView {
        id: &user.id,
        username: &user.username,
        email: &user.email,
        thoughts: &user.thoughts,
        friends: &user.friends,
        friend_count: user.friend_count(),
    }
}

/// `friendCount` follows the stored friends list, so it also counts friends
/// that no longer resolve.
pub fn render_populated_user<'a>(populated: &PopulatedUser<'a>) -> PopulatedUserView<'a> {
    let user = populated.user;
    PopulatedUserView {
        id: &user.id,
        username: &user.username,
        email: &user.email,
        thoughts: populated.thoughts.iter().map(|t| render_thought(*t)).collect(),
        friends: populated.friends.iter().map(|f| render_user(*f)).collect(),
        friend_count: user.friend_count(),
    }
}

pub fn render_thought(thought: &Thought) -> ThoughtView<'_> {
    ThoughtView {
        id: &thought.id,
        thought_text: &thought.thought_text,
        username: &thought.username,
        created_at: format_date_time(&thought.created_at),
        reactions: thought.reactions.iter().map(render_reaction).collect(),
        reaction_count: thought.reaction_count(),
    }
}

pub fn render_reaction(reaction: &Reaction) -> ReactionView<'_> {
    ReactionView {
        id: &reaction.id,
        reaction_body: &reaction.reaction_body,
        username: &reaction.username,
        created_at: format_date_time(&reaction.created_at),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::DB;

    #[test]
    fn thought_view_carries_counts() {
        let mut db = DB::in_memory();
        let id = db.create_thought("hi", "alice").unwrap().id.clone();
        let thought = db.add_reaction(&id, "nice", "bob").unwrap();

        let value = serde_json::to_value(render_thought(thought)).unwrap();
        assert_eq!(value["thoughtText"], "hi");
        assert_eq!(value["reactionCount"], 1);
        assert_eq!(value["reactions"][0]["reactionBody"], "nice");
        assert!(value["createdAt"].as_str().unwrap().contains(", "));
    }

    #[test]
    fn populated_user_expands_references() {
        let mut db = DB::in_memory();
        let alice = db.create_user("alice", "a@x.com").unwrap().id.clone();
        let bob = db.create_user("bob", "b@x.com").unwrap().id.clone();
        db.create_thought("hi", "alice").unwrap();
        db.add_friend(&alice, &bob).unwrap();

        let populated = db.get_user(&alice).unwrap();
        let value = serde_json::to_value(render_populated_user(&populated)).unwrap();
        assert_eq!(value["friendCount"], 1);
        assert_eq!(value["friends"][0]["username"], "bob");
        assert_eq!(value["friends"][0]["friends"], json!([]));
        assert_eq!(value["thoughts"][0]["thoughtText"], "hi");
    }
}
