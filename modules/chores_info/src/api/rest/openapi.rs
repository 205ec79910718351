use modkit::api::Problem;
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::api::tools::handlers as tool_handlers;
use crate::api::tools::registry::ToolDefinition;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user,
        handlers::list_chores,
        handlers::list_chores_for_user,
        handlers::get_chore,
        handlers::create_chore,
        handlers::update_chore,
        handlers::delete_chore,
        tool_handlers::list_tools,
        tool_handlers::invoke_tool,
    ),
    components(schemas(
        dto::UserDto,
        dto::ChoreDto,
        dto::CreateUserReq,
        dto::UpdateUserReq,
        dto::CreateChoreReq,
        dto::UpdateChoreReq,
        ToolDefinition,
        Problem,
    )),
    tags(
        (name = "users", description = "Family members who own chores"),
        (name = "chores", description = "Dated tasks owned by one user"),
        (name = "tools", description = "Operations exposed to conversational agents")
    )
)]
pub struct ChoresApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ChoresApiDoc::openapi();
        for path in [
            "/users",
            "/users/{id}",
            "/chores",
            "/chores/user/{userId}",
            "/chores/{id}",
            "/tools",
            "/tools/{name}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
