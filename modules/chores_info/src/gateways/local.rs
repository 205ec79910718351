use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::ChoresInfoApi,
    error::ChoresInfoError,
    model::{
        Chore, ChoreFilter, ChorePatch, ChoreView, DeleteOutcome, NewChore, NewUser, User,
        UserPatch, UserSummary,
    },
};
use crate::domain::service::Service;

/// Local implementation of the ChoresInfoApi trait that delegates to the domain service
#[derive(Clone)]
pub struct ChoresInfoLocalClient {
    service: Arc<Service>,
}

impl ChoresInfoLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ChoresInfoApi for ChoresInfoLocalClient {
    async fn create_user(&self, new_user: NewUser) -> Result<User, ChoresInfoError> {
        Ok(self.service.create_user(new_user).await?)
    }

    async fn get_user(&self, id: i64) -> Result<UserSummary, ChoresInfoError> {
        Ok(self.service.get_user_summary(id).await?)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, ChoresInfoError> {
        Ok(self.service.list_user_summaries().await?)
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, ChoresInfoError> {
        Ok(self.service.update_user(id, patch).await?)
    }

    async fn delete_user(&self, id: i64, confirm: bool) -> Result<DeleteOutcome, ChoresInfoError> {
        Ok(self.service.delete_user(id, confirm).await?)
    }

    async fn create_chore(&self, new_chore: NewChore) -> Result<ChoreView, ChoresInfoError> {
        Ok(self.service.create_chore(new_chore).await?)
    }

    async fn get_chore(&self, id: i64) -> Result<ChoreView, ChoresInfoError> {
        Ok(self.service.get_chore_view(id).await?)
    }

    async fn list_chores(&self, filter: ChoreFilter) -> Result<Vec<ChoreView>, ChoresInfoError> {
        Ok(self.service.list_chore_views(filter).await?)
    }

    async fn update_chore(&self, id: i64, patch: ChorePatch) -> Result<Chore, ChoresInfoError> {
        Ok(self.service.update_chore(id, patch).await?)
    }

    async fn delete_chore(
        &self,
        id: i64,
        confirm: bool,
    ) -> Result<DeleteOutcome, ChoresInfoError> {
        Ok(self.service.delete_chore(id, confirm).await?)
    }
}
