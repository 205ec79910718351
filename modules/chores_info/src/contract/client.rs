use async_trait::async_trait;

use crate::contract::{
    error::ChoresInfoError,
    model::{
        Chore, ChoreFilter, ChorePatch, ChoreView, DeleteOutcome, NewChore, NewUser, User,
        UserPatch, UserSummary,
    },
};

/// Public API of the chores_info module for in-process consumers
#[async_trait]
pub trait ChoresInfoApi: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User, ChoresInfoError>;

    async fn get_user(&self, id: i64) -> Result<UserSummary, ChoresInfoError>;

    async fn list_users(&self) -> Result<Vec<UserSummary>, ChoresInfoError>;

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, ChoresInfoError>;

    /// Cascades to the user's chores once confirmed.
    async fn delete_user(&self, id: i64, confirm: bool) -> Result<DeleteOutcome, ChoresInfoError>;

    async fn create_chore(&self, new_chore: NewChore) -> Result<ChoreView, ChoresInfoError>;

    async fn get_chore(&self, id: i64) -> Result<ChoreView, ChoresInfoError>;

    async fn list_chores(&self, filter: ChoreFilter) -> Result<Vec<ChoreView>, ChoresInfoError>;

    async fn update_chore(&self, id: i64, patch: ChorePatch) -> Result<Chore, ChoresInfoError>;

    async fn delete_chore(&self, id: i64, confirm: bool)
        -> Result<DeleteOutcome, ChoresInfoError>;
}
