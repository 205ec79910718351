// Tool inputs are lenient: every field defaults so that a missing id
// surfaces as "userId is required" instead of a deserialization error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::contract::model::{Chore, ChoreView, UserSummary};
use crate::domain::dates::{format_date, format_time};

// ============================================================================
// User Tools
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserInput {
    #[schemars(description = "The user's name; must be unique ignoring case")]
    pub name: String,
    #[schemars(description = "Hex color for calendar display, e.g. #FF5733 (defaults to #3B82F6)")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserIdInput {
    #[schemars(description = "Id of the user")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserInput {
    #[schemars(description = "Id of the user to update")]
    pub user_id: Option<i64>,
    #[schemars(description = "New name")]
    pub name: Option<String>,
    #[schemars(description = "New hex color")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteUserInput {
    #[schemars(description = "Id of the user to delete")]
    pub user_id: Option<i64>,
    #[schemars(description = "Must be true to actually delete; otherwise a confirmation prompt is returned")]
    pub confirm: bool,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoInput {}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user_id: i64,
    pub name: String,
    pub color: String,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: i64,
    pub name: String,
    pub color: String,
    pub chore_count: u64,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct UserListResponse {
    pub count: usize,
    pub users: Vec<UserInfo>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserResponse {
    pub user_id: i64,
    pub name: String,
    pub color: String,
    pub updated: bool,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserResponse {
    pub user_id: i64,
    pub deleted: bool,
    pub message: String,
}

// ============================================================================
// Chore Tools
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateChoreInput {
    #[schemars(description = "What needs to be done, e.g. 'Take out trash'")]
    pub description: String,
    #[schemars(description = "Time of day, HH:MM or HH:MM:SS")]
    pub time: Option<String>,
    #[schemars(description = "Date as YYYY-MM-DD; defaults to today")]
    pub date: Option<String>,
    #[schemars(description = "Id of the user who will do the chore")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoreIdInput {
    #[schemars(description = "Id of the chore")]
    pub chore_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoresByDateInput {
    #[schemars(description = "Date as YYYY-MM-DD; defaults to today")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoresByUserInput {
    #[schemars(description = "Id of the user")]
    pub user_id: Option<i64>,
    #[schemars(description = "Optional date filter, YYYY-MM-DD; omit for all dates")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateChoreInput {
    #[schemars(description = "Id of the chore to update")]
    pub chore_id: Option<i64>,
    #[schemars(description = "New description")]
    pub description: Option<String>,
    #[schemars(description = "New time, HH:MM")]
    pub time: Option<String>,
    #[schemars(description = "New date, YYYY-MM-DD")]
    pub date: Option<String>,
    #[schemars(description = "Reassign to this user")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteChoreInput {
    #[schemars(description = "Id of the chore to delete")]
    pub chore_id: Option<i64>,
    #[schemars(description = "Must be true to actually delete; otherwise a confirmation prompt is returned")]
    pub confirm: bool,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoreResponse {
    pub chore_id: i64,
    pub description: String,
    pub time: Option<String>,
    pub date: String,
    pub user_id: i64,
    pub user_name: String,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChoreInfo {
    pub chore_id: i64,
    pub description: String,
    pub time: Option<String>,
    pub date: String,
    pub user_id: i64,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ChoreListResponse {
    pub count: usize,
    pub chores: Vec<ChoreInfo>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChoreResponse {
    pub chore_id: i64,
    pub description: String,
    pub time: Option<String>,
    pub date: String,
    pub user_id: i64,
    pub updated: bool,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChoreResponse {
    pub chore_id: i64,
    pub deleted: bool,
    pub message: String,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<UserSummary> for UserInfo {
    fn from(s: UserSummary) -> Self {
        Self {
            user_id: s.user.id,
            name: s.user.name,
            color: s.user.color,
            chore_count: s.chore_count,
        }
    }
}

impl From<ChoreView> for ChoreInfo {
    fn from(v: ChoreView) -> Self {
        Self {
            chore_id: v.chore.id,
            description: v.chore.description,
            time: v.chore.time.map(format_time),
            date: format_date(v.chore.date),
            user_id: v.chore.user_id,
            user_name: v.user_name,
        }
    }
}

impl From<ChoreView> for CreateChoreResponse {
    fn from(v: ChoreView) -> Self {
        let info = ChoreInfo::from(v);
        Self {
            chore_id: info.chore_id,
            description: info.description,
            time: info.time,
            date: info.date,
            user_id: info.user_id,
            user_name: info.user_name,
            created: true,
        }
    }
}

impl From<Chore> for UpdateChoreResponse {
    fn from(c: Chore) -> Self {
        Self {
            chore_id: c.id,
            description: c.description,
            time: c.time.map(format_time),
            date: format_date(c.date),
            user_id: c.user_id,
            updated: true,
        }
    }
}

impl FromIterator<ChoreView> for ChoreListResponse {
    fn from_iter<I: IntoIterator<Item = ChoreView>>(iter: I) -> Self {
        let chores: Vec<ChoreInfo> = iter.into_iter().map(ChoreInfo::from).collect();
        Self {
            count: chores.len(),
            chores,
        }
    }
}

impl FromIterator<UserSummary> for UserListResponse {
    fn from_iter<I: IntoIterator<Item = UserSummary>>(iter: I) -> Self {
        let users: Vec<UserInfo> = iter.into_iter().map(UserInfo::from).collect();
        Self {
            count: users.len(),
            users,
        }
    }
}
