use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};

use crate::{
    error::AppError,
    models::Role,
    services::auth_service::decode_token,
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn ensure_role(user: &AuthUser, role: Role) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Admin)
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::unauthorized("missing_token"))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::unauthorized("invalid_token"))?;

        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return Err(AppError::unauthorized("invalid_token"));
        };

        let state = AppState::from_ref(state);
        decode_token(&state.auth, token.trim())
    }
}
