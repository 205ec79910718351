use std::collections::HashMap;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::contract::model::{Chore, ChoreFilter, User};
use crate::domain::repo::{ChoreDraft, ChoresRepository, ChoresUnitOfWork};
use crate::infra::storage::entity::{chore, user};
use crate::infra::storage::mapper::{chore_to_contract, user_to_contract};

/// SeaORM-backed repository. Every unit of work is one database transaction.
///
/// SQLite cannot upgrade two overlapping deferred transactions from read to
/// write; the loser fails with `database is locked` without waiting. Write
/// units of work therefore hold `write_lock` until commit or drop.
#[derive(Clone)]
pub struct SeaOrmChoresRepository {
    db: DatabaseConnection,
    write_lock: Arc<Mutex<()>>,
}

impl SeaOrmChoresRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl ChoresRepository for SeaOrmChoresRepository {
    async fn begin(&self) -> anyhow::Result<Box<dyn ChoresUnitOfWork>> {
        let txn = self.db.begin().await.context("begin transaction")?;
        Ok(Box::new(SeaOrmUnitOfWork { txn, _write: None }))
    }

    async fn begin_write(&self) -> anyhow::Result<Box<dyn ChoresUnitOfWork>> {
        let guard = self.write_lock.clone().lock_owned().await;
        let txn = self.db.begin().await.context("begin write transaction")?;
        Ok(Box::new(SeaOrmUnitOfWork {
            txn,
            _write: Some(guard),
        }))
    }
}

pub struct SeaOrmUnitOfWork {
    // Declared before the guard so a dropped transaction rolls back first.
    txn: DatabaseTransaction,
    _write: Option<OwnedMutexGuard<()>>,
}

#[async_trait]
impl ChoresUnitOfWork for SeaOrmUnitOfWork {
    async fn find_user(&self, id: i64) -> anyhow::Result<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .with_context(|| format!("find user {id}"))?;
        Ok(found.map(user_to_contract))
    }

    async fn find_user_by_name_ignore_case(&self, name: &str) -> anyhow::Result<Option<User>> {
        let wanted = name.trim().to_lowercase();
        // SQLite LOWER() only folds ASCII, so compare in Rust.
        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.txn)
            .await
            .context("scan users by name")?;
        Ok(users
            .into_iter()
            .find(|u| u.name.trim().to_lowercase() == wanted)
            .map(user_to_contract))
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.txn)
            .await
            .context("list users")?;
        Ok(users.into_iter().map(user_to_contract).collect())
    }

    async fn insert_user(&self, name: &str, color: &str) -> anyhow::Result<User> {
        let model = user::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            color: Set(color.to_string()),
        }
        .insert(&self.txn)
        .await
        .context("insert user")?;
        Ok(user_to_contract(model))
    }

    async fn update_user(&self, u: &User) -> anyhow::Result<()> {
        user::ActiveModel {
            id: Set(u.id),
            name: Set(u.name.clone()),
            color: Set(u.color.clone()),
        }
        .update(&self.txn)
        .await
        .with_context(|| format!("update user {}", u.id))?;
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> anyhow::Result<bool> {
        let res = user::Entity::delete_by_id(id)
            .exec(&self.txn)
            .await
            .with_context(|| format!("delete user {id}"))?;
        Ok(res.rows_affected > 0)
    }

    async fn count_chores_for_user(&self, user_id: i64) -> anyhow::Result<u64> {
        chore::Entity::find()
            .filter(chore::Column::UserId.eq(user_id))
            .count(&self.txn)
            .await
            .with_context(|| format!("count chores of user {user_id}"))
    }

    async fn chore_counts(&self) -> anyhow::Result<HashMap<i64, u64>> {
        let rows: Vec<(i64, i64)> = chore::Entity::find()
            .select_only()
            .column(chore::Column::UserId)
            .column_as(Expr::col(chore::Column::Id).count(), "chore_count")
            .group_by(chore::Column::UserId)
            .into_tuple()
            .all(&self.txn)
            .await
            .context("count chores per user")?;
        Ok(rows
            .into_iter()
            .map(|(user_id, n)| (user_id, u64::try_from(n).unwrap_or(0)))
            .collect())
    }

    async fn find_chore(&self, id: i64) -> anyhow::Result<Option<Chore>> {
        let found = chore::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .with_context(|| format!("find chore {id}"))?;
        Ok(found.map(chore_to_contract))
    }

    async fn list_chores(&self, filter: &ChoreFilter) -> anyhow::Result<Vec<Chore>> {
        let mut query = chore::Entity::find();
        match *filter {
            ChoreFilter::All => {}
            ChoreFilter::OnDate(date) => {
                query = query.filter(chore::Column::Date.eq(date));
            }
            ChoreFilter::ForUser { user_id, date } => {
                query = query.filter(chore::Column::UserId.eq(user_id));
                if let Some(date) = date {
                    query = query.filter(chore::Column::Date.eq(date));
                }
            }
        }
        let chores = query
            .order_by_asc(chore::Column::Id)
            .all(&self.txn)
            .await
            .with_context(|| format!("list chores ({filter:?})"))?;
        Ok(chores.into_iter().map(chore_to_contract).collect())
    }

    async fn insert_chore(&self, draft: ChoreDraft) -> anyhow::Result<Chore> {
        let model = chore::ActiveModel {
            id: NotSet,
            description: Set(draft.description),
            date: Set(draft.date),
            time: Set(draft.time),
            user_id: Set(draft.user_id),
        }
        .insert(&self.txn)
        .await
        .context("insert chore")?;
        Ok(chore_to_contract(model))
    }

    async fn update_chore(&self, c: &Chore) -> anyhow::Result<()> {
        chore::ActiveModel {
            id: Set(c.id),
            description: Set(c.description.clone()),
            date: Set(c.date),
            time: Set(c.time),
            user_id: Set(c.user_id),
        }
        .update(&self.txn)
        .await
        .with_context(|| format!("update chore {}", c.id))?;
        Ok(())
    }

    async fn delete_chore(&self, id: i64) -> anyhow::Result<bool> {
        let res = chore::Entity::delete_by_id(id)
            .exec(&self.txn)
            .await
            .with_context(|| format!("delete chore {id}"))?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_chores_for_user(&self, user_id: i64) -> anyhow::Result<u64> {
        let res = chore::Entity::delete_many()
            .filter(chore::Column::UserId.eq(user_id))
            .exec(&self.txn)
            .await
            .with_context(|| format!("delete chores of user {user_id}"))?;
        Ok(res.rows_affected)
    }

    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        self.txn.commit().await.context("commit transaction")
    }
}
