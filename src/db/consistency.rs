//! Side effects that keep users and thoughts pointing at each other.
//!
//! Both links go through the author's *username*, not the user id. A thought
//! keeps the name it was written under, so renaming a user orphans its older
//! thoughts from both the cascade and the author link. Each step is its own
//! document write; a failure between two steps is not rolled back.

use crate::data::{Thought, ThoughtID, UserID};

use super::{store::StoreResult, DB};

impl DB {
    /// Deletes every thought whose `username` equals `username`, whether or
    /// not the author's `thoughts` list mentions it. A thought created under
    /// the same name while this runs may or may not be caught.
    pub fn cascade_delete_thoughts_by_username(&mut self, username: &str) -> StoreResult<Vec<Thought>> {
        let deleted = self.thoughts.delete_many(|t| t.username == username)?;
        log::info!("cascade removed {} thought(s) written by '{}'", deleted.len(), username);
        Ok(deleted)
    }

    /// Appends `thought_id` to the `thoughts` of the user named `username`.
    /// Without such a user this does nothing and is not an error.
    pub fn link_thought_to_author(&mut self, username: &str, thought_id: &ThoughtID) -> StoreResult<Option<UserID>> {
        let linked = self
            .users
            .find_one_and_update(|u| u.username == username, |u| u.thoughts.push(thought_id.clone()))?
            .map(|u| u.id.clone());
        match &linked {
            Some(user_id) => log::debug!("linked thought {} to user {}", thought_id, user_id),
            None => log::debug!("no user named '{}', thought {} left unlinked", username, thought_id),
        }
        Ok(linked)
    }
}
