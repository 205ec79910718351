use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use modkit::api::{Problem, ProblemResponse};
use tracing::{error, info};

use crate::api::rest::dto::{
    ChoreDto, ChoresQuery, CreateChoreReq, CreateUserReq, UpdateChoreReq, UpdateUserReq, UserDto,
};
use crate::api::rest::error::map_domain_error;
use crate::config::ErrorStatusPolicy;
use crate::contract::model::ChoreFilter;
use crate::domain::dates;
use crate::domain::service::Service;

type ApiResult<T> = Result<T, ProblemResponse>;

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    operation_id = "chores_info.list_users",
    responses(
        (status = 200, description = "All users", body = [UserDto]),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    uri: Uri,
) -> ApiResult<Json<Vec<UserDto>>> {
    info!("Listing users");

    match svc.list_users().await {
        Ok(users) => Ok(Json(users.into_iter().map(UserDto::from).collect())),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    operation_id = "chores_info.get_user",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    Path(id): Path<i64>,
    uri: Uri,
) -> ApiResult<Json<UserDto>> {
    info!("Getting user with id: {}", id);

    match svc.get_user(id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    operation_id = "chores_info.create_user",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Conflict", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    uri: Uri,
    Json(req): Json<CreateUserReq>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    info!("Creating user: {:?}", req);

    match svc.create_user(req.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// Update an existing user; only supplied, non-blank fields change
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    operation_id = "chores_info.update_user",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Conflict", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    Path(id): Path<i64>,
    uri: Uri,
    Json(req): Json<UpdateUserReq>,
) -> ApiResult<Json<UserDto>> {
    info!("Updating user {} with: {:?}", id, req);

    match svc.update_user(id, req.into()).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// Delete a user and all of their chores
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    operation_id = "chores_info.delete_user",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User and chores deleted"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    Path(id): Path<i64>,
    uri: Uri,
) -> ApiResult<StatusCode> {
    info!("Deleting user: {}", id);

    // The DELETE request itself is the confirmation.
    match svc.delete_user(id, true).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// List chores, optionally on one date
#[utoipa::path(
    get,
    path = "/chores",
    tag = "chores",
    operation_id = "chores_info.list_chores",
    params(ChoresQuery),
    responses(
        (status = 200, description = "Matching chores", body = [ChoreDto]),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_chores(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    Query(query): Query<ChoresQuery>,
    uri: Uri,
) -> ApiResult<Json<Vec<ChoreDto>>> {
    info!("Listing chores with query: {:?}", query);

    let result = match dates::parse_optional_date(query.date.as_deref()) {
        Ok(Some(date)) => svc.list_chores(ChoreFilter::OnDate(date)).await,
        Ok(None) => svc.list_chores(ChoreFilter::All).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(chores) => Ok(Json(chores.into_iter().map(ChoreDto::from).collect())),
        Err(e) => {
            error!("Failed to list chores: {}", e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// List the chores of one user, optionally on one date
#[utoipa::path(
    get,
    path = "/chores/user/{userId}",
    tag = "chores",
    operation_id = "chores_info.list_chores_for_user",
    params(("userId" = i64, Path, description = "Owner id"), ChoresQuery),
    responses(
        (status = 200, description = "The user's chores", body = [ChoreDto]),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_chores_for_user(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    Path(user_id): Path<i64>,
    Query(query): Query<ChoresQuery>,
    uri: Uri,
) -> ApiResult<Json<Vec<ChoreDto>>> {
    info!("Listing chores for user {} with query: {:?}", user_id, query);

    let result = match dates::parse_optional_date(query.date.as_deref()) {
        Ok(date) => svc.list_chores(ChoreFilter::ForUser { user_id, date }).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(chores) => Ok(Json(chores.into_iter().map(ChoreDto::from).collect())),
        Err(e) => {
            error!("Failed to list chores for user {}: {}", user_id, e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// Get a specific chore by ID
#[utoipa::path(
    get,
    path = "/chores/{id}",
    tag = "chores",
    operation_id = "chores_info.get_chore",
    params(("id" = i64, Path, description = "Chore id")),
    responses(
        (status = 200, description = "Chore found", body = ChoreDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_chore(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    Path(id): Path<i64>,
    uri: Uri,
) -> ApiResult<Json<ChoreDto>> {
    info!("Getting chore with id: {}", id);

    match svc.get_chore(id).await {
        Ok(chore) => Ok(Json(ChoreDto::from(chore))),
        Err(e) => {
            error!("Failed to get chore {}: {}", id, e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// Create a new chore
#[utoipa::path(
    post,
    path = "/chores",
    tag = "chores",
    operation_id = "chores_info.create_chore",
    request_body = CreateChoreReq,
    responses(
        (status = 201, description = "Created chore", body = ChoreDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Owner not found", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_chore(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    uri: Uri,
    Json(req): Json<CreateChoreReq>,
) -> ApiResult<(StatusCode, Json<ChoreDto>)> {
    info!("Creating chore: {:?}", req);

    match svc.create_chore(req.into()).await {
        Ok(view) => Ok((StatusCode::CREATED, Json(ChoreDto::from(view)))),
        Err(e) => {
            error!("Failed to create chore: {}", e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// Update an existing chore; only supplied, non-blank fields change
#[utoipa::path(
    put,
    path = "/chores/{id}",
    tag = "chores",
    operation_id = "chores_info.update_chore",
    params(("id" = i64, Path, description = "Chore id")),
    request_body = UpdateChoreReq,
    responses(
        (status = 200, description = "Updated chore", body = ChoreDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn update_chore(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    Path(id): Path<i64>,
    uri: Uri,
    Json(req): Json<UpdateChoreReq>,
) -> ApiResult<Json<ChoreDto>> {
    info!("Updating chore {} with: {:?}", id, req);

    match svc.update_chore(id, req.into()).await {
        Ok(chore) => Ok(Json(ChoreDto::from(chore))),
        Err(e) => {
            error!("Failed to update chore {}: {}", id, e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}

/// Delete a chore
#[utoipa::path(
    delete,
    path = "/chores/{id}",
    tag = "chores",
    operation_id = "chores_info.delete_chore",
    params(("id" = i64, Path, description = "Chore id")),
    responses(
        (status = 204, description = "Chore deleted"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_chore(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<ErrorStatusPolicy>,
    Path(id): Path<i64>,
    uri: Uri,
) -> ApiResult<StatusCode> {
    info!("Deleting chore: {}", id);

    match svc.delete_chore(id, true).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete chore {}: {}", id, e);
            Err(map_domain_error(&e, uri.path(), policy))
        }
    }
}
