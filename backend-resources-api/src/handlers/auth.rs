use crate::{error::AppError, state::AppState};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use backend_resources_domain::domain::errors::AuthError;
use tracing::debug;

/// Resolves the bearer token into an [`AuthorizationContext`] and stores it
/// in the request extensions for handlers to pick up.
///
/// [`AuthorizationContext`]: backend_resources_domain::application::ports::auth::AuthorizationContext
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Skip auth for health check
    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken)?;

    let context = state.auth_provider.create_context_from_token(token).await?;
    context.require_role(&state.required_role)?;

    debug!("Request authorized for '{}'", context.username);
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
