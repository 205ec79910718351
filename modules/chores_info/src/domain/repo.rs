use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::contract::model::{Chore, ChoreFilter, User};

/// Port for the domain layer: hands out one unit of work per service call.
#[async_trait]
pub trait ChoresRepository: Send + Sync {
    /// Open a transaction. Dropping the unit of work without `commit` rolls it back.
    async fn begin(&self) -> anyhow::Result<Box<dyn ChoresUnitOfWork>>;

    /// Open a transaction that will write. Write units of work run one at a time.
    async fn begin_write(&self) -> anyhow::Result<Box<dyn ChoresUnitOfWork>> {
        self.begin().await
    }
}

/// A fully validated chore ready to be stored.
#[derive(Debug, Clone)]
pub struct ChoreDraft {
    pub description: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub user_id: i64,
}

/// User and chore store primitives, all executed inside one transaction.
///
/// The service decides *what* to do; implementations only persist.
#[async_trait]
pub trait ChoresUnitOfWork: Send + Sync {
    // --- users ---
    async fn find_user(&self, id: i64) -> anyhow::Result<Option<User>>;
    /// Unicode-lowercase comparison of trimmed names.
    async fn find_user_by_name_ignore_case(&self, name: &str) -> anyhow::Result<Option<User>>;
    /// Ascending id.
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;
    async fn insert_user(&self, name: &str, color: &str) -> anyhow::Result<User>;
    async fn update_user(&self, user: &User) -> anyhow::Result<()>;
    /// Returns true if a row was deleted.
    async fn delete_user(&self, id: i64) -> anyhow::Result<bool>;

    // --- chores ---
    async fn count_chores_for_user(&self, user_id: i64) -> anyhow::Result<u64>;
    /// user_id → number of chores; users without chores are absent.
    async fn chore_counts(&self) -> anyhow::Result<HashMap<i64, u64>>;
    async fn find_chore(&self, id: i64) -> anyhow::Result<Option<Chore>>;
    /// Ascending id, exact date equality.
    async fn list_chores(&self, filter: &ChoreFilter) -> anyhow::Result<Vec<Chore>>;
    async fn insert_chore(&self, draft: ChoreDraft) -> anyhow::Result<Chore>;
    async fn update_chore(&self, chore: &Chore) -> anyhow::Result<()>;
    async fn delete_chore(&self, id: i64) -> anyhow::Result<bool>;
    async fn delete_chores_for_user(&self, user_id: i64) -> anyhow::Result<u64>;

    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
}
