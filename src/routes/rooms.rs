use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    booking::PriceQuote,
    dto::rooms::{AvailabilityQuery, QuoteQuery, RoomList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Room,
    response::ApiResponse,
    routes::extract::{ApiPath, ApiQuery},
    services::room_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms))
        .route("/available", get(search_available))
        .route("/{id}", get(get_room))
        .route("/{id}/quote", get(quote_room))
}

#[utoipa::path(
    get,
    path = "/api/rooms",
    responses(
        (status = 200, description = "List rooms", body = ApiResponse<RoomList>)
    ),
    tag = "Rooms"
)]
pub async fn list_rooms(State(state): State<AppState>) -> AppResult<Json<ApiResponse<RoomList>>> {
    let resp = room_service::list_rooms(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/rooms/available",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Rooms free for the whole stay and large enough", body = ApiResponse<RoomList>),
        (status = 400, description = "Missing fields or invalid dates"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Rooms"
)]
pub async fn search_available(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<RoomList>>> {
    let resp = room_service::search_available(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    params(("id" = i64, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room", body = ApiResponse<Room>),
        (status = 404, description = "Not Found")
    ),
    tag = "Rooms"
)]
pub async fn get_room(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<Room>>> {
    let resp = room_service::get_room(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{id}/quote",
    params(("id" = i64, Path, description = "Room ID"), QuoteQuery),
    responses(
        (status = 200, description = "Nights and total for a stay", body = ApiResponse<PriceQuote>),
        (status = 404, description = "Not Found")
    ),
    tag = "Rooms"
)]
pub async fn quote_room(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<QuoteQuery>,
) -> AppResult<Json<ApiResponse<PriceQuote>>> {
    let resp = room_service::quote_room(&state, id, query).await?;
    Ok(Json(resp))
}
