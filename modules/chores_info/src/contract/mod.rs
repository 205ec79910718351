pub mod client;
pub mod error;
pub mod model;

pub use client::ChoresInfoApi;
pub use error::ChoresInfoError;
pub use model::{
    Chore, ChoreFilter, ChorePatch, ChoreView, DeleteOutcome, NewChore, NewUser, User, UserPatch,
    UserSummary,
};
