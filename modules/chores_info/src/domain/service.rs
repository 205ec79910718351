use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::contract::model::{
    Chore, ChoreFilter, ChorePatch, ChoreView, DeleteOutcome, NewChore, NewUser, User, UserPatch,
    UserSummary,
};
use crate::domain::dates;
use crate::domain::error::DomainError;
use crate::domain::repo::{ChoreDraft, ChoresRepository, ChoresUnitOfWork};

pub const USER_DELETE_PROMPT: &str =
    "Confirmation required. This will delete the user and ALL their chores. Re-issue with confirm:true";
pub const CHORE_DELETE_PROMPT: &str =
    "Confirmation required. Re-issue with confirm:true to delete this chore";

/// Domain service with the business rules for users and chores.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ChoresRepository>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_color: String,
    pub max_name_length: usize,
    pub max_description_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_color: "#3B82F6".to_string(),
            max_name_length: 100,
            max_description_length: 500,
        }
    }
}

/// Trimmed value, or `None` when missing or blank.
fn provided(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl Service {
    pub fn new(repo: Arc<dyn ChoresRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    async fn begin(&self) -> Result<Box<dyn ChoresUnitOfWork>, DomainError> {
        Ok(self.repo.begin().await?)
    }

    async fn begin_write(&self) -> Result<Box<dyn ChoresUnitOfWork>, DomainError> {
        Ok(self.repo.begin_write().await?)
    }

    async fn require_user(uow: &dyn ChoresUnitOfWork, id: i64) -> Result<User, DomainError> {
        uow.find_user(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn require_chore(uow: &dyn ChoresUnitOfWork, id: i64) -> Result<Chore, DomainError> {
        uow.find_chore(id)
            .await?
            .ok_or_else(|| DomainError::chore_not_found(id))
    }

    /// Duplicate check that ignores the record being renamed.
    async fn ensure_name_free(
        uow: &dyn ChoresUnitOfWork,
        name: &str,
        except: Option<i64>,
    ) -> Result<(), DomainError> {
        match uow.find_user_by_name_ignore_case(name).await? {
            Some(existing) if Some(existing.id) != except => {
                warn!(name, existing_id = existing.id, "user name already taken");
                Err(DomainError::duplicate_user_name(name))
            }
            _ => Ok(()),
        }
    }

    // --- users ---

    #[instrument(name = "chores_info.service.create_user", skip(self), fields(name = %new_user.name))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        let name = provided(Some(&new_user.name))
            .ok_or_else(|| DomainError::validation("name", "User name is required"))?;
        self.validate_name(&name)?;
        let color = provided(new_user.color.as_deref())
            .unwrap_or_else(|| self.config.default_color.clone());

        let uow = self.begin_write().await?;
        Self::ensure_name_free(uow.as_ref(), &name, None).await?;
        let user = uow.insert_user(&name, &color).await?;
        uow.commit().await?;

        info!(user_id = user.id, "Successfully created user");
        Ok(user)
    }

    #[instrument(name = "chores_info.service.get_user", skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        debug!("Getting user by id");
        let uow = self.begin().await?;
        Self::require_user(uow.as_ref(), id).await
    }

    #[instrument(name = "chores_info.service.get_user_summary", skip(self), fields(user_id = id))]
    pub async fn get_user_summary(&self, id: i64) -> Result<UserSummary, DomainError> {
        let uow = self.begin().await?;
        let user = Self::require_user(uow.as_ref(), id).await?;
        let chore_count = uow.count_chores_for_user(id).await?;
        Ok(UserSummary { user, chore_count })
    }

    #[instrument(name = "chores_info.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let uow = self.begin().await?;
        let users = uow.list_users().await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    #[instrument(name = "chores_info.service.list_user_summaries", skip(self))]
    pub async fn list_user_summaries(&self) -> Result<Vec<UserSummary>, DomainError> {
        let uow = self.begin().await?;
        let users = uow.list_users().await?;
        let counts = uow.chore_counts().await?;
        Ok(users
            .into_iter()
            .map(|user| UserSummary {
                chore_count: counts.get(&user.id).copied().unwrap_or(0),
                user,
            })
            .collect())
    }

    #[instrument(name = "chores_info.service.update_user", skip(self), fields(user_id = id))]
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        let name = provided(patch.name.as_deref());
        let color = provided(patch.color.as_deref());

        let uow = self.begin_write().await?;
        let mut current = Self::require_user(uow.as_ref(), id).await?;

        if name.is_none() && color.is_none() {
            return Err(DomainError::no_fields(
                "At least one of name or color must be provided",
            ));
        }

        if let Some(name) = name {
            self.validate_name(&name)?;
            if current.name.to_lowercase() != name.to_lowercase() {
                Self::ensure_name_free(uow.as_ref(), &name, Some(id)).await?;
            }
            current.name = name;
        }
        if let Some(color) = color {
            current.color = color;
        }

        uow.update_user(&current).await?;
        uow.commit().await?;

        info!("Successfully updated user");
        Ok(current)
    }

    /// Two-phase delete: without `confirm` nothing changes and a prompt is returned.
    #[instrument(name = "chores_info.service.delete_user", skip(self), fields(user_id = id, confirm))]
    pub async fn delete_user(&self, id: i64, confirm: bool) -> Result<DeleteOutcome, DomainError> {
        if !confirm {
            let uow = self.begin().await?;
            let message = match uow.find_user(id).await? {
                Some(_) => {
                    let n = uow.count_chores_for_user(id).await?;
                    format!(
                        "Confirmation required. This will delete the user and ALL their chores ({n} chore(s)). Re-issue with confirm:true"
                    )
                }
                None => USER_DELETE_PROMPT.to_string(),
            };
            warn!("User deletion requires confirmation");
            return Ok(DeleteOutcome::ConfirmationRequired { message });
        }

        let uow = self.begin_write().await?;
        Self::require_user(uow.as_ref(), id).await?;
        let cascaded = uow.delete_chores_for_user(id).await?;
        if !uow.delete_user(id).await? {
            return Err(DomainError::user_not_found(id));
        }
        uow.commit().await?;

        info!(cascaded, "Successfully deleted user");
        Ok(DeleteOutcome::Deleted { cascaded })
    }

    // --- chores ---

    #[instrument(
        name = "chores_info.service.create_chore",
        skip(self, new_chore),
        fields(user_id = ?new_chore.user_id)
    )]
    pub async fn create_chore(&self, new_chore: NewChore) -> Result<ChoreView, DomainError> {
        info!("Creating new chore");

        let description = provided(Some(&new_chore.description))
            .ok_or_else(|| DomainError::validation("description", "Chore description is required"))?;
        self.validate_description(&description)?;
        let user_id = new_chore
            .user_id
            .ok_or_else(|| DomainError::validation("userId", "userId is required"))?;

        let uow = self.begin_write().await?;
        let owner = Self::require_user(uow.as_ref(), user_id).await?;

        let draft = ChoreDraft {
            description,
            date: dates::resolve_date(new_chore.date.as_deref())?,
            time: dates::parse_optional_time(new_chore.time.as_deref())?,
            user_id,
        };
        let chore = uow.insert_chore(draft).await?;
        uow.commit().await?;

        info!(chore_id = chore.id, date = %chore.date, "Successfully created chore");
        Ok(ChoreView {
            chore,
            user_name: owner.name,
        })
    }

    #[instrument(name = "chores_info.service.get_chore", skip(self), fields(chore_id = id))]
    pub async fn get_chore(&self, id: i64) -> Result<Chore, DomainError> {
        debug!("Getting chore by id");
        let uow = self.begin().await?;
        Self::require_chore(uow.as_ref(), id).await
    }

    #[instrument(name = "chores_info.service.get_chore_view", skip(self), fields(chore_id = id))]
    pub async fn get_chore_view(&self, id: i64) -> Result<ChoreView, DomainError> {
        let uow = self.begin().await?;
        let chore = Self::require_chore(uow.as_ref(), id).await?;
        let owner = Self::require_user(uow.as_ref(), chore.user_id).await?;
        Ok(ChoreView {
            chore,
            user_name: owner.name,
        })
    }

    #[instrument(name = "chores_info.service.list_chores", skip(self))]
    pub async fn list_chores(&self, filter: ChoreFilter) -> Result<Vec<Chore>, DomainError> {
        let uow = self.begin().await?;
        if let ChoreFilter::ForUser { user_id, .. } = filter {
            Self::require_user(uow.as_ref(), user_id).await?;
        }
        let chores = uow.list_chores(&filter).await?;
        debug!(count = chores.len(), "Listed chores");
        Ok(chores)
    }

    /// Same as [`Service::list_chores`] with owner names resolved.
    #[instrument(name = "chores_info.service.list_chore_views", skip(self))]
    pub async fn list_chore_views(&self, filter: ChoreFilter) -> Result<Vec<ChoreView>, DomainError> {
        let uow = self.begin().await?;
        if let ChoreFilter::ForUser { user_id, .. } = filter {
            Self::require_user(uow.as_ref(), user_id).await?;
        }
        let names: std::collections::HashMap<i64, String> = uow
            .list_users()
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();
        let views = uow
            .list_chores(&filter)
            .await?
            .into_iter()
            .map(|chore| ChoreView {
                user_name: names.get(&chore.user_id).cloned().unwrap_or_default(),
                chore,
            })
            .collect();
        Ok(views)
    }

    #[instrument(name = "chores_info.service.update_chore", skip(self, patch), fields(chore_id = id))]
    pub async fn update_chore(&self, id: i64, patch: ChorePatch) -> Result<Chore, DomainError> {
        info!("Updating chore");

        let uow = self.begin_write().await?;
        let mut current = Self::require_chore(uow.as_ref(), id).await?;
        let mut updated = false;

        if let Some(description) = provided(patch.description.as_deref()) {
            self.validate_description(&description)?;
            current.description = description;
            updated = true;
        }
        if let Some(date) = dates::parse_optional_date(patch.date.as_deref())? {
            current.date = date;
            updated = true;
        }
        if let Some(time) = dates::parse_optional_time(patch.time.as_deref())? {
            current.time = Some(time);
            updated = true;
        }
        if let Some(user_id) = patch.user_id {
            Self::require_user(uow.as_ref(), user_id).await?;
            current.user_id = user_id;
            updated = true;
        }

        if !updated {
            return Err(DomainError::no_fields(
                "At least one field (description, date, time, or userId) must be provided",
            ));
        }

        uow.update_chore(&current).await?;
        uow.commit().await?;

        info!("Successfully updated chore");
        Ok(current)
    }

    #[instrument(name = "chores_info.service.delete_chore", skip(self), fields(chore_id = id, confirm))]
    pub async fn delete_chore(&self, id: i64, confirm: bool) -> Result<DeleteOutcome, DomainError> {
        if !confirm {
            warn!("Chore deletion requires confirmation");
            return Ok(DeleteOutcome::ConfirmationRequired {
                message: CHORE_DELETE_PROMPT.to_string(),
            });
        }

        let uow = self.begin_write().await?;
        if !uow.delete_chore(id).await? {
            return Err(DomainError::chore_not_found(id));
        }
        uow.commit().await?;

        info!("Successfully deleted chore");
        Ok(DeleteOutcome::Deleted { cascaded: 0 })
    }

    // --- validation helpers ---

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        let max = self.config.max_name_length;
        if name.chars().count() > max {
            return Err(DomainError::validation(
                "name",
                format!("User name must be at most {max} characters"),
            ));
        }
        Ok(())
    }

    fn validate_description(&self, description: &str) -> Result<(), DomainError> {
        let max = self.config.max_description_length;
        if description.chars().count() > max {
            return Err(DomainError::validation(
                "description",
                format!("Chore description must be at most {max} characters"),
            ));
        }
        Ok(())
    }
}
