use crate::{config::StoreLocation, data::{Thought, ThoughtID, User, UserID}};

use self::store::{Collection, StoreResult};

pub mod consistency;
pub mod friends;
pub mod reactions;
pub mod store;
pub mod thoughts;
pub mod users;

pub use users::PopulatedUser;

pub struct DB {
    users: Collection<User>,
    thoughts: Collection<Thought>,
}

impl DB {
    pub fn in_memory() -> Self {
        Self {
            users: Collection::in_memory(),
            thoughts: Collection::in_memory(),
        }
    }

    pub fn open(location: &StoreLocation) -> StoreResult<Self> {
        match location {
            StoreLocation::Memory => Ok(Self::in_memory()),
            StoreLocation::Directory(root) => Ok(Self {
                users: Collection::open(root)?,
                thoughts: Collection::open(root)?,
            }),
        }
    }

    pub fn find_user(&self, id: &UserID) -> Option<&User> {
        self.users.find_by_id(&id.0)
    }

    pub fn find_user_by_name(&self, username: &str) -> Option<&User> {
        self.users.find_one(|u| u.username == username)
    }

    pub fn find_thought(&self, id: &ThoughtID) -> Option<&Thought> {
        self.thoughts.find_by_id(&id.0)
    }
}
