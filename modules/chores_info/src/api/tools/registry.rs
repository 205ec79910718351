use std::sync::Arc;

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::api::tools::dto::*;
use crate::contract::client::ChoresInfoApi;
use crate::contract::error::ChoresInfoError;
use crate::contract::model::{
    ChoreFilter, ChorePatch, DeleteOutcome, NewChore, NewUser, UserPatch,
};
use crate::domain::dates;

// ============================================================================
// Tool Definitions
// ============================================================================

/// Operations exposed to conversational agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoreTool {
    CreateUser,
    GetUser,
    ListUsers,
    UpdateUser,
    DeleteUser,
    CreateChore,
    GetChore,
    ListAllChores,
    ListChoresByDate,
    ListChoresForUser,
    UpdateChore,
    DeleteChore,
}

impl ChoreTool {
    pub fn name(&self) -> &'static str {
        match self {
            ChoreTool::CreateUser => "createUser",
            ChoreTool::GetUser => "getUser",
            ChoreTool::ListUsers => "listUsers",
            ChoreTool::UpdateUser => "updateUser",
            ChoreTool::DeleteUser => "deleteUser",
            ChoreTool::CreateChore => "createChore",
            ChoreTool::GetChore => "getChore",
            ChoreTool::ListAllChores => "listAllChores",
            ChoreTool::ListChoresByDate => "listChoresByDate",
            ChoreTool::ListChoresForUser => "listChoresForUser",
            ChoreTool::UpdateChore => "updateChore",
            ChoreTool::DeleteChore => "deleteChore",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChoreTool::CreateUser => {
                "Create a user. Requires name; color is an optional hex code for the calendar."
            }
            ChoreTool::GetUser => "Get one user, including how many chores they own, by userId.",
            ChoreTool::ListUsers => "List every user with their chore counts.",
            ChoreTool::UpdateUser => {
                "Change a user's name and/or color. Requires userId and at least one of name or color."
            }
            ChoreTool::DeleteUser => {
                "Delete a user and ALL of their chores. Requires userId and confirm=true; \
                 without confirm a confirmation prompt is returned and nothing is deleted."
            }
            ChoreTool::CreateChore => {
                "Create a chore. Requires description and userId; date (YYYY-MM-DD) defaults to \
                 today and time (HH:MM) is optional."
            }
            ChoreTool::GetChore => "Get one chore by choreId.",
            ChoreTool::ListAllChores => "List every chore across all users and dates.",
            ChoreTool::ListChoresByDate => {
                "List chores on one date (YYYY-MM-DD) across all users; defaults to today."
            }
            ChoreTool::ListChoresForUser => {
                "List a user's chores. Requires userId; with date only that day, otherwise all dates."
            }
            ChoreTool::UpdateChore => {
                "Change a chore. Requires choreId and at least one of description, date, time or \
                 userId (to reassign)."
            }
            ChoreTool::DeleteChore => {
                "Delete a chore. Requires choreId and confirm=true; without confirm a confirmation \
                 prompt is returned."
            }
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.name() == name)
    }

    /// Get all tools
    pub fn all() -> Vec<Self> {
        vec![
            ChoreTool::CreateUser,
            ChoreTool::GetUser,
            ChoreTool::ListUsers,
            ChoreTool::UpdateUser,
            ChoreTool::DeleteUser,
            ChoreTool::CreateChore,
            ChoreTool::GetChore,
            ChoreTool::ListAllChores,
            ChoreTool::ListChoresByDate,
            ChoreTool::ListChoresForUser,
            ChoreTool::UpdateChore,
            ChoreTool::DeleteChore,
        ]
    }

    /// JSON Schema of the tool's input object.
    pub fn input_schema(&self) -> Value {
        match self {
            ChoreTool::CreateUser => schema_of::<CreateUserInput>(),
            ChoreTool::GetUser => schema_of::<UserIdInput>(),
            ChoreTool::ListUsers | ChoreTool::ListAllChores => schema_of::<NoInput>(),
            ChoreTool::UpdateUser => schema_of::<UpdateUserInput>(),
            ChoreTool::DeleteUser => schema_of::<DeleteUserInput>(),
            ChoreTool::CreateChore => schema_of::<CreateChoreInput>(),
            ChoreTool::GetChore => schema_of::<ChoreIdInput>(),
            ChoreTool::ListChoresByDate => schema_of::<ChoresByDateInput>(),
            ChoreTool::ListChoresForUser => schema_of::<ChoresByUserInput>(),
            ChoreTool::UpdateChore => schema_of::<UpdateChoreInput>(),
            ChoreTool::DeleteChore => schema_of::<DeleteChoreInput>(),
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.input_schema(),
        }
    }
}

fn schema_of<T: JsonSchema>() -> Value {
    let gen = SchemaSettings::draft07()
        .with(|s| {
            s.inline_subschemas = true;
            s.meta_schema = None;
        })
        .into_generator();
    let mut schema =
        serde_json::to_value(gen.into_root_schema_for::<T>()).unwrap_or_else(|_| json!({}));
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("title");
        obj.entry("type").or_insert_with(|| json!("object"));
        obj.entry("properties").or_insert_with(|| json!({}));
    }
    schema
}

/// Name, description and input schema of one tool, in the shape function-calling
/// providers expect.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub parameters: Value,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },

    #[error(transparent)]
    Failed(#[from] ChoresInfoError),
}

// ============================================================================
// Dispatch
// ============================================================================

/// Static name → handler mapping over the chores_info contract.
#[derive(Clone)]
pub struct ToolRegistry {
    client: Arc<dyn ChoresInfoApi>,
}

fn parse<T: DeserializeOwned>(tool: ChoreTool, args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
        tool: tool.name(),
        message: e.to_string(),
    })
}

fn reply<T: Serialize>(out: T) -> Result<Value, ToolError> {
    serde_json::to_value(out).map_err(|_| ToolError::Failed(ChoresInfoError::Internal))
}

fn require(id: Option<i64>, field: &str) -> Result<i64, ToolError> {
    id.ok_or_else(|| ChoresInfoError::validation(format!("{field} is required")).into())
}

impl ToolRegistry {
    pub fn new(client: Arc<dyn ChoresInfoApi>) -> Self {
        Self { client }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ChoreTool::all().iter().map(ChoreTool::definition).collect()
    }

    /// Run a tool by name. `null` arguments count as an empty object.
    #[instrument(name = "chores_info.tools.invoke", skip(self, args), fields(tool = name))]
    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = ChoreTool::from_name(name).ok_or_else(|| {
            warn!("unknown tool requested");
            ToolError::UnknownTool(name.to_string())
        })?;
        info!("{} called with {}", name, args);

        let result = self.dispatch(tool, args).await;
        match &result {
            Ok(_) => info!("{} succeeded", name),
            Err(e) => warn!("{} failed: {}", name, e),
        }
        result
    }

    async fn dispatch(&self, tool: ChoreTool, args: Value) -> Result<Value, ToolError> {
        let api = &self.client;
        match tool {
            ChoreTool::CreateUser => {
                let req: CreateUserInput = parse(tool, args)?;
                let user = api
                    .create_user(NewUser {
                        name: req.name,
                        color: req.color,
                    })
                    .await?;
                reply(CreateUserResponse {
                    user_id: user.id,
                    name: user.name,
                    color: user.color,
                    created: true,
                })
            }
            ChoreTool::GetUser => {
                let req: UserIdInput = parse(tool, args)?;
                let id = require(req.user_id, "userId")?;
                reply(UserInfo::from(api.get_user(id).await?))
            }
            ChoreTool::ListUsers => {
                let _: NoInput = parse(tool, args)?;
                reply(api.list_users().await?.into_iter().collect::<UserListResponse>())
            }
            ChoreTool::UpdateUser => {
                let req: UpdateUserInput = parse(tool, args)?;
                let id = require(req.user_id, "userId")?;
                let user = api
                    .update_user(
                        id,
                        UserPatch {
                            name: req.name,
                            color: req.color,
                        },
                    )
                    .await?;
                reply(UpdateUserResponse {
                    user_id: user.id,
                    name: user.name,
                    color: user.color,
                    updated: true,
                })
            }
            ChoreTool::DeleteUser => {
                let req: DeleteUserInput = parse(tool, args)?;
                let id = require(req.user_id, "userId")?;
                let (deleted, message) = match api.delete_user(id, req.confirm).await? {
                    DeleteOutcome::ConfirmationRequired { message } => (false, message),
                    DeleteOutcome::Deleted { cascaded } => (
                        true,
                        format!("User deleted successfully along with {cascaded} chore(s)"),
                    ),
                };
                reply(DeleteUserResponse {
                    user_id: id,
                    deleted,
                    message,
                })
            }
            ChoreTool::CreateChore => {
                let req: CreateChoreInput = parse(tool, args)?;
                let view = api
                    .create_chore(NewChore {
                        description: req.description,
                        date: req.date,
                        time: req.time,
                        user_id: req.user_id,
                    })
                    .await?;
                reply(CreateChoreResponse::from(view))
            }
            ChoreTool::GetChore => {
                let req: ChoreIdInput = parse(tool, args)?;
                let id = require(req.chore_id, "choreId")?;
                reply(ChoreInfo::from(api.get_chore(id).await?))
            }
            ChoreTool::ListAllChores => {
                let _: NoInput = parse(tool, args)?;
                let chores = api.list_chores(ChoreFilter::All).await?;
                reply(chores.into_iter().collect::<ChoreListResponse>())
            }
            ChoreTool::ListChoresByDate => {
                let req: ChoresByDateInput = parse(tool, args)?;
                let date = dates::resolve_date(req.date.as_deref())
                    .map_err(ChoresInfoError::from)?;
                let chores = api.list_chores(ChoreFilter::OnDate(date)).await?;
                reply(chores.into_iter().collect::<ChoreListResponse>())
            }
            ChoreTool::ListChoresForUser => {
                let req: ChoresByUserInput = parse(tool, args)?;
                let user_id = require(req.user_id, "userId")?;
                let date = dates::parse_optional_date(req.date.as_deref())
                    .map_err(ChoresInfoError::from)?;
                let chores = api
                    .list_chores(ChoreFilter::ForUser { user_id, date })
                    .await?;
                reply(chores.into_iter().collect::<ChoreListResponse>())
            }
            ChoreTool::UpdateChore => {
                let req: UpdateChoreInput = parse(tool, args)?;
                let id = require(req.chore_id, "choreId")?;
                let chore = api
                    .update_chore(
                        id,
                        ChorePatch {
                            description: req.description,
                            date: req.date,
                            time: req.time,
                            user_id: req.user_id,
                        },
                    )
                    .await?;
                reply(UpdateChoreResponse::from(chore))
            }
            ChoreTool::DeleteChore => {
                let req: DeleteChoreInput = parse(tool, args)?;
                let id = require(req.chore_id, "choreId")?;
                let (deleted, message) = match api.delete_chore(id, req.confirm).await? {
                    DeleteOutcome::ConfirmationRequired { message } => (false, message),
                    DeleteOutcome::Deleted { .. } => (true, "Chore deleted successfully".to_string()),
                };
                reply(DeleteChoreResponse {
                    chore_id: id,
                    deleted,
                    message,
                })
            }
        }
    }
}
