//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use common::AppResult;
use domain::{UserRequest, UserResponse, HELLO_RESPONSE};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/hello", get(hello))
        .route("/:id", get(get_user))
}

/// Create a user in the identity provider (moderator only)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created"),
        (status = 400, description = "Validation error, keyed by field"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Moderator only"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<StatusCode> {
    state.user_service.create_user(payload).await?;
    Ok(StatusCode::OK)
}

/// Get user with roles and groups (moderator only)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Moderator only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user_by_id(id).await?;
    Ok(Json(user))
}

/// Greeting for callers holding the moderator role
#[utoipa::path(
    get,
    path = "/api/users/hello",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Greeting", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Moderator only")
    )
)]
pub async fn hello() -> &'static str {
    HELLO_RESPONSE
}
