use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::contact::ContactRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::ContactMessage,
    response::ApiResponse,
    routes::extract::ApiJson,
    services::contact_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(send_message))
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored for the front desk", body = ApiResponse<ContactMessage>),
        (status = 400, description = "Empty subject or message"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Contact"
)]
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ContactMessage>>)> {
    let resp = contact_service::send_message(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
