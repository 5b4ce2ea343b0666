use crate::{data::{User, UserID}, errors::{ApiError, ApiResult}};

use super::DB;

impl DB {
    fn check_friendship(&self, user_id: &UserID, friend_id: &UserID) -> ApiResult<()> {
        if self.find_user(user_id).is_none() || self.find_user(friend_id).is_none() {
            return Err(ApiError::NotFound("User or friend"));
        }
        Ok(())
    }

    pub fn add_friend(&mut self, user_id: &UserID, friend_id: &UserID) -> ApiResult<&User> {
        self.check_friendship(user_id, friend_id)?;
        let user = self
            .users
            .find_by_id_and_update(&user_id.0, |u| u.friends.push(friend_id.clone()))?
            .ok_or(ApiError::NotFound("User or friend"))?;
        log::info!("user {} added friend {}", user_id, friend_id);
        Ok(user)
    }

    pub fn remove_friend(&mut self, user_id: &UserID, friend_id: &UserID) -> ApiResult<&User> {
        self.check_friendship(user_id, friend_id)?;
        let user = self
            .users
            .find_by_id_and_update(&user_id.0, |u| {
                if let Some(i) = u.friends.iter().position(|f| f == friend_id) {
                    u.friends.remove(i);
                }
            })?
            .ok_or(ApiError::NotFound("User or friend"))?;
        log::info!("user {} removed friend {}", user_id, friend_id);
        Ok(user)
    }
}
