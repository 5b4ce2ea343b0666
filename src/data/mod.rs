use std::fmt;

use serde::{Deserialize, Serialize};

mod reaction;
mod thought;
mod user;
pub mod validation;

pub use reaction::*;
pub use thought::*;
pub use user::*;

macro_rules! document_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

document_id!(UserID);
document_id!(ThoughtID);
document_id!(ReactionID);
