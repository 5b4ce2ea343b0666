use crate::{
    data::{validation::validate_thought, Thought, ThoughtID, ThoughtPatch},
    errors::{ApiError, ApiResult},
};

use super::DB;

impl DB {
    pub fn list_thoughts(&self) -> Vec<&Thought> {
        self.thoughts.all()
    }

    pub fn get_thought(&self, id: &ThoughtID) -> ApiResult<&Thought> {
        self.find_thought(id).ok_or(ApiError::NotFound("Thought"))
    }

    pub fn create_thought(&mut self, thought_text: &str, username: &str) -> ApiResult<&Thought> {
        let thought = Thought::new(ThoughtID(self.thoughts.gen_id()), thought_text, username);
        validate_thought(&thought)?;
        let id = thought.id.clone();
        self.thoughts.insert(thought)?;
        log::info!("created thought {} by '{}'", id, username);
        self.link_thought_to_author(username, &id)?;
        self.get_thought(&id)
    }

    pub fn update_thought(&mut self, id: &ThoughtID, patch: &ThoughtPatch) -> ApiResult<&Thought> {
        let mut thought = self.get_thought(id)?.clone();
        patch.apply(&mut thought);
        validate_thought(&thought)?;
        Ok(self.thoughts.save(thought)?)
    }

    pub fn delete_thought(&mut self, id: &ThoughtID) -> ApiResult<Thought> {
        let thought = self.thoughts.find_by_id_and_delete(&id.0)?.ok_or(ApiError::NotFound("Thought"))?;
        log::info!("deleted thought {}", thought.id);
        Ok(thought)
    }
}
