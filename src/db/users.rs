use crate::{
    data::{validation::{validate_user, ValidationError, ValidationIssue}, Thought, User, UserID, UserPatch},
    errors::{ApiError, ApiResult},
};

use super::DB;

/// A user with its `thoughts` and `friends` resolved. References that no
/// longer resolve are left out.
#[derive(Debug)]
pub struct PopulatedUser<'a> {
    pub user: &'a User,
    pub thoughts: Vec<&'a Thought>,
    pub friends: Vec<&'a User>,
}

impl DB {
    fn populate<'a>(&'a self, user: &'a User) -> PopulatedUser<'a> {
        PopulatedUser {
            user,
            thoughts: user.thoughts.iter().filter_map(|id| self.find_thought(id)).collect(),
            friends: user.friends.iter().filter_map(|id| self.find_user(id)).collect(),
        }
    }

    pub fn list_users(&self) -> Vec<PopulatedUser<'_>> {
        self.users.all().into_iter().map(|u| self.populate(u)).collect()
    }

    pub fn get_user(&self, id: &UserID) -> ApiResult<PopulatedUser<'_>> {
        self.find_user(id)
            .map(|u| self.populate(u))
            .ok_or(ApiError::NotFound("User"))
    }

    fn check_unique(&self, candidate: &User) -> Result<(), ValidationError> {
        let mut issues = vec![];
        let others = self.users.find(|u| u.id != candidate.id);
        if others.iter().any(|u| u.username == candidate.username) {
            issues.push(ValidationIssue::duplicate("username", &candidate.username));
        }
        if others.iter().any(|u| u.email == candidate.email) {
            issues.push(ValidationIssue::duplicate("email", &candidate.email));
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }

    pub fn create_user(&mut self, username: &str, email: &str) -> ApiResult<&User> {
        let user = User::new(UserID(self.users.gen_id()), username, email);
        validate_user(&user)?;
        self.check_unique(&user)?;
        log::info!("creating user {} ({})", user.id, user.username);
        Ok(self.users.insert(user)?)
    }

    pub fn update_user(&mut self, id: &UserID, patch: &UserPatch) -> ApiResult<&User> {
        let mut user = self.find_user(id).ok_or(ApiError::NotFound("User"))?.clone();
        patch.apply(&mut user);
        validate_user(&user)?;
        self.check_unique(&user)?;
        Ok(self.users.save(user)?)
    }

    // thoughts go first; other users' friends lists keep the id
    pub fn delete_user(&mut self, id: &UserID) -> ApiResult<User> {
        let username = self.find_user(id).ok_or(ApiError::NotFound("User"))?.username.clone();
        self.cascade_delete_thoughts_by_username(&username)?;
        let user = self.users.find_by_id_and_delete(&id.0)?.ok_or(ApiError::NotFound("User"))?;
        log::info!("deleted user {} ({})", user.id, user.username);
        Ok(user)
    }
}
