use chrono::Utc;

use crate::{
    audit::log_audit,
    dto::contact::ContactRequest,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{ContactMessage, User},
    response::ApiResponse,
    services::next_id,
    state::AppState,
    storage::keys,
};

pub const MAX_MESSAGES: usize = 500;

pub async fn send_message(
    state: &AppState,
    user: &AuthUser,
    payload: ContactRequest,
) -> AppResult<ApiResponse<ContactMessage>> {
    let subject = payload.subject.trim();
    let message = payload.message.trim();
    if subject.is_empty() || message.is_empty() {
        return Err(AppError::bad_request("empty_fields"));
    }

    let _write = state.begin_write().await;
    let users: Vec<User> = state.storage.load(keys::USERS).await?;
    let sender = users
        .iter()
        .find(|u| u.id == user.user_id)
        .ok_or_else(|| AppError::unauthorized("unknown_user"))?;

    let phone = payload
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|phone| !phone.is_empty())
        .unwrap_or(&sender.phone)
        .to_string();

    let mut messages: Vec<ContactMessage> = state.storage.load(keys::MESSAGES).await?;
    let entry = ContactMessage {
        id: next_id(messages.iter().map(|m| m.id)),
        user_id: sender.id,
        user_name: sender.name.clone(),
        email: sender.email.clone(),
        phone,
        subject: subject.to_string(),
        message: message.to_string(),
        created_at: Utc::now(),
    };
    messages.insert(0, entry.clone());
    messages.truncate(MAX_MESSAGES);
    state.storage.save(keys::MESSAGES, &messages).await?;

    log_audit(
        Some(user.user_id),
        "contact_message",
        Some("messages"),
        Some(serde_json::json!({ "message_id": entry.id })),
    );

    Ok(ApiResponse::item("Message sent", entry))
}
