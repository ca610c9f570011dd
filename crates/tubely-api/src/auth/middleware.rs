use crate::auth::jwt::{get_bearer_token, JwtValidator};
use crate::auth::models::AuthenticatedUser;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub validator: JwtValidator,
}

impl AuthState {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            validator: JwtValidator::new(jwt_secret),
        }
    }
}

/// Resolve the bearer token into an `AuthenticatedUser` request extension.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = match get_bearer_token(request.headers())
        .and_then(|token| auth_state.validator.validate(token))
    {
        Ok(user_id) => user_id,
        Err(err) => {
            tracing::debug!(
                path = %request.uri().path(),
                reason = %err,
                "Authentication failed"
            );
            return HttpAppError(err).into_response();
        }
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });
    next.run(request).await
}
