use axum::{
    Json, Router,
    extract::State,
    routing::{get, patch, post, put},
};

use crate::{
    dto::{
        admin::{Overview, UserList},
        contact::MessageList,
        reservations::{CheckInRequest, ModifyReservationRequest, ReservationList},
        reviews::ReviewList,
        rooms::RoomList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Reservation, Room},
    response::ApiResponse,
    routes::{
        extract::{ApiJson, ApiPath, ApiQuery},
        params::{Pagination, ReservationListQuery},
    },
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(overview))
        .route("/reservations", get(list_all_reservations))
        .route(
            "/reservations/{id}",
            put(modify_reservation).delete(delete_reservation),
        )
        .route("/reservations/{id}/cancel", post(cancel_reservation))
        .route("/reservations/{id}/reactivate", post(reactivate_reservation))
        .route("/reservations/{id}/check-in", post(check_in_reservation))
        .route("/rooms", get(list_rooms))
        .route("/rooms/{id}/availability", patch(toggle_room_availability))
        .route("/users", get(list_users))
        .route("/users/{id}", axum::routing::delete(delete_user))
        .route("/reviews", get(list_reviews))
        .route("/messages", get(list_messages))
}

#[utoipa::path(
    get,
    path = "/api/admin/overview",
    responses(
        (status = 200, description = "Dashboard totals and recent reservations", body = ApiResponse<Overview>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn overview(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Overview>>> {
    let resp = admin_service::overview(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/reservations",
    params(ReservationListQuery),
    responses(
        (status = 200, description = "Get all reservations (admin only)", body = ApiResponse<ReservationList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_reservations(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ReservationListQuery>,
) -> AppResult<Json<ApiResponse<ReservationList>>> {
    let resp = admin_service::list_all_reservations(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/reservations/{id}",
    params(("id" = i64, Path, description = "Reservation ID")),
    request_body = ModifyReservationRequest,
    responses(
        (status = 200, description = "Reservation modified", body = ApiResponse<Reservation>),
        (status = 400, description = "Invalid dates or guest count"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Room not available"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn modify_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<ModifyReservationRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let resp = admin_service::modify_reservation(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/reservations/{id}",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation permanently removed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_reservation(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/reservations/{id}/cancel",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<Reservation>),
        (status = 400, description = "Already cancelled"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let resp = admin_service::cancel_reservation(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/reservations/{id}/reactivate",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation confirmed again", body = ApiResponse<Reservation>),
        (status = 400, description = "Reservation is not cancelled"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Dates were taken in the meantime"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reactivate_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let resp = admin_service::reactivate_reservation(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/reservations/{id}/check-in",
    params(("id" = i64, Path, description = "Reservation ID")),
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Check-in recorded", body = ApiResponse<Reservation>),
        (status = 400, description = "Missing fields, cancelled or already checked in"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn check_in_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<CheckInRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let resp = admin_service::check_in_reservation(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/rooms",
    responses(
        (status = 200, description = "All rooms including disabled ones", body = ApiResponse<RoomList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<RoomList>>> {
    let resp = admin_service::list_rooms(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/rooms/{id}/availability",
    params(("id" = i64, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Availability flag toggled", body = ApiResponse<Room>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn toggle_room_availability(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<Room>>> {
    let resp = admin_service::toggle_room_availability(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(Pagination),
    responses(
        (status = 200, description = "Registered accounts", body = ApiResponse<UserList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = admin_service::list_users(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User removed"),
        (status = 400, description = "Admins cannot delete themselves"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/reviews",
    params(Pagination),
    responses(
        (status = 200, description = "Guest reviews", body = ApiResponse<ReviewList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = admin_service::list_reviews(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/messages",
    params(Pagination),
    responses(
        (status = 200, description = "Contact form messages", body = ApiResponse<MessageList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_messages(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> AppResult<Json<ApiResponse<MessageList>>> {
    let resp = admin_service::list_messages(&state, &user, pagination).await?;
    Ok(Json(resp))
}
