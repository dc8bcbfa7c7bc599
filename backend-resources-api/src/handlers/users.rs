use crate::{error::AppResult, state::AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use backend_resources_domain::{
    application::ports::auth::AuthorizationContext,
    domain::entities::{UserRequest, UserResponse},
};
use uuid::Uuid;

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(request) = payload?;
    state.user_service.create_user(&request).await?;
    Ok(StatusCode::OK)
}

pub async fn get_user(
    State(state): State<AppState>,
    user_id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<UserResponse>> {
    let Path(user_id) = user_id?;
    let user = state.user_service.get_user_by_id(&user_id.to_string()).await?;
    Ok(Json(user))
}

pub async fn hello(Extension(principal): Extension<AuthorizationContext>) -> String {
    principal.username
}
