use axum::{
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::config::ErrorStatusPolicy;
use crate::domain::service::Service;

/// User and chore routes, relative to the API base path.
pub fn router(service: Arc<Service>, policy: ErrorStatusPolicy) -> Router {
    Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/chores",
            get(handlers::list_chores).post(handlers::create_chore),
        )
        .route("/chores/user/{userId}", get(handlers::list_chores_for_user))
        .route(
            "/chores/{id}",
            get(handlers::get_chore)
                .put(handlers::update_chore)
                .delete(handlers::delete_chore),
        )
        .layer(Extension(service))
        .layer(Extension(policy))
}
