use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Role, User},
    state::AppState,
    storage::keys,
};

pub mod admin_service;
pub mod auth_service;
pub mod contact_service;
pub mod reservation_service;
pub mod review_service;
pub mod room_service;

/// Timestamp-based id, bumped past the largest existing id so that two
/// records created in the same millisecond stay distinct.
pub(crate) fn next_id(existing: impl IntoIterator<Item = i64>) -> i64 {
    let now = Utc::now().timestamp_millis();
    match existing.into_iter().max() {
        Some(max) if max >= now => max + 1,
        _ => now,
    }
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The stored account behind a token. Tokens outlive account deletion, so
/// every mutation re-reads the user document.
pub(crate) async fn active_account(state: &AppState, user: &AuthUser) -> AppResult<User> {
    let users: Vec<User> = state.storage.load(keys::USERS).await?;
    users
        .into_iter()
        .find(|u| u.id == user.user_id)
        .ok_or_else(|| AppError::unauthorized("unknown_user"))
}

/// Admin role in the token and still admin in the user document.
pub(crate) async fn active_admin(state: &AppState, user: &AuthUser) -> AppResult<User> {
    ensure_admin(user)?;
    let account = active_account(state, user).await?;
    if account.role != Role::Admin {
        return Err(AppError::Forbidden);
    }
    Ok(account)
}
