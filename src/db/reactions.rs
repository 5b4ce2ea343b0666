use crate::{
    data::{validation::validate_reaction, Reaction, ReactionID, Thought, ThoughtID},
    errors::{ApiError, ApiResult},
};

use super::{store::gen_id, DB};

impl DB {
    pub fn add_reaction(&mut self, thought_id: &ThoughtID, reaction_body: &str, username: &str) -> ApiResult<&Thought> {
        let mut thought = self.get_thought(thought_id)?.clone();
        let reaction_id = loop {
            let id = gen_id();
            if !thought.has_reaction_id(&id) {
                break ReactionID(id);
            }
        };
        let reaction = Reaction::new(reaction_id, reaction_body, username);
        validate_reaction(&reaction)?;
        log::info!("adding reaction {} to thought {}", reaction.id, thought.id);
        thought.reactions.push(reaction);
        Ok(self.thoughts.save(thought)?)
    }

    pub fn remove_reaction(&mut self, thought_id: &ThoughtID, reaction_id: &ReactionID) -> ApiResult<Reaction> {
        let mut thought = self.get_thought(thought_id)?.clone();
        let Some(pos) = thought.reactions.iter().position(|r| &r.id == reaction_id) else {
            return Err(ApiError::NotFound("Reaction"));
        };
        log::debug!("reactions of {} before removal: {:?}", thought.id, thought.reactions);
        let removed = thought.reactions.remove(pos);
        log::debug!("reactions of {} after removal: {:?}", thought.id, thought.reactions);
        self.thoughts.save(thought)?;
        Ok(removed)
    }
}
