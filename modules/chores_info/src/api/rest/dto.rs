use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{Chore, ChorePatch, ChoreView, NewChore, NewUser, User, UserPatch};

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// REST DTO for chore representation; `time` is null when unset.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChoreDto {
    pub id: i64,
    pub description: String,
    #[schema(value_type = Option<String>, example = "14:30:00")]
    pub time: Option<NaiveTime>,
    #[schema(value_type = String, example = "2025-10-30")]
    pub date: NaiveDate,
    pub user_id: i64,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateUserReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// REST DTO for updating a user (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// `date` is `YYYY-MM-DD` and defaults to today; `time` is `HH:MM[:SS]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoreReq {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChoreReq {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// REST DTO for query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChoresQuery {
    /// Exact date filter, `YYYY-MM-DD`.
    pub date: Option<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            color: user.color,
        }
    }
}

impl From<Chore> for ChoreDto {
    fn from(chore: Chore) -> Self {
        Self {
            id: chore.id,
            description: chore.description,
            time: chore.time,
            date: chore.date,
            user_id: chore.user_id,
        }
    }
}

impl From<ChoreView> for ChoreDto {
    fn from(view: ChoreView) -> Self {
        view.chore.into()
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            color: req.color,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            color: req.color,
        }
    }
}

impl From<CreateChoreReq> for NewChore {
    fn from(req: CreateChoreReq) -> Self {
        Self {
            description: req.description,
            date: req.date,
            time: req.time,
            user_id: req.user_id,
        }
    }
}

impl From<UpdateChoreReq> for ChorePatch {
    fn from(req: UpdateChoreReq) -> Self {
        Self {
            description: req.description,
            date: req.date,
            time: req.time,
            user_id: req.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chore_dto_uses_camel_case_and_null_time() {
        let dto = ChoreDto {
            id: 3,
            description: "Dishes".into(),
            time: None,
            date: NaiveDate::from_ymd_opt(2025, 10, 30).unwrap(),
            user_id: 7,
        };
        let v = serde_json::to_value(&dto).unwrap();
        assert_eq!(v["userId"], 7);
        assert_eq!(v["date"], "2025-10-30");
        assert!(v["time"].is_null());
    }

    #[test]
    fn create_chore_request_tolerates_missing_fields() {
        let req: CreateChoreReq = serde_json::from_str(r#"{"userId": 2}"#).unwrap();
        assert_eq!(req.user_id, Some(2));
        assert!(req.description.is_empty());
        assert!(req.date.is_none());
    }
}
