//! Transport-agnostic models shared by every surface of the module.

use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chore {
    pub id: i64,
    pub description: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub user_id: i64,
}

/// A user together with the number of chores they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user: User,
    pub chore_count: u64,
}

/// A chore together with its owner's current name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreView {
    pub chore: Chore,
    pub user_name: String,
}

/// Input for creating a user. `color` falls back to the configured default
/// when absent or blank.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub color: Option<String>,
}

/// Partial update; blank strings count as "not provided".
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Input for creating a chore.
///
/// Date and time stay textual here so every caller gets the same parsing and
/// the same format errors: a missing or blank date means today, a missing or
/// blank time means "no time".
#[derive(Debug, Clone, Default)]
pub struct NewChore {
    pub description: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ChorePatch {
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoreFilter {
    All,
    OnDate(NaiveDate),
    ForUser {
        user_id: i64,
        date: Option<NaiveDate>,
    },
}

/// Result of a gated delete. Without confirmation nothing is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    ConfirmationRequired { message: String },
    Deleted { cascaded: u64 },
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }
}
