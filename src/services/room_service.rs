use crate::{
    booking::{self, PriceQuote},
    dto::rooms::{AvailabilityQuery, QuoteQuery, RoomList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Reservation, Room},
    response::{ApiResponse, Meta},
    services::today,
    state::AppState,
    storage::keys,
};

pub(crate) async fn load_rooms(state: &AppState) -> AppResult<Vec<Room>> {
    state.storage.load(keys::ROOMS).await
}

pub async fn list_rooms(state: &AppState) -> AppResult<ApiResponse<RoomList>> {
    let items = load_rooms(state).await?;
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success("Rooms", RoomList { items }, Some(meta)))
}

pub async fn get_room(state: &AppState, id: i64) -> AppResult<ApiResponse<Room>> {
    let room = load_rooms(state)
        .await?
        .into_iter()
        .find(|room| room.id == id)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Room", room, None))
}

/// Price a stay without booking it. Unusable dates quote zero nights.
pub async fn quote_room(
    state: &AppState,
    id: i64,
    query: QuoteQuery,
) -> AppResult<ApiResponse<PriceQuote>> {
    let rooms = load_rooms(state).await?;
    let room = rooms.iter().find(|room| room.id == id).ok_or(AppError::NotFound)?;
    let quote = booking::quote(room, &query.check_in, &query.check_out);
    Ok(ApiResponse::item("Quote", quote))
}

pub async fn search_available(
    state: &AppState,
    user: &AuthUser,
    query: AvailabilityQuery,
) -> AppResult<ApiResponse<RoomList>> {
    let AvailabilityQuery {
        check_in,
        check_out,
        guests,
    } = query;
    let (Some(check_in), Some(check_out), Some(guests)) = (
        check_in.filter(|s| !s.trim().is_empty()),
        check_out.filter(|s| !s.trim().is_empty()),
        guests,
    ) else {
        return Err(AppError::bad_request("empty_fields"));
    };
    if guests < 1 {
        return Err(AppError::bad_request("invalid_guests"));
    }
    booking::validate_stay(&check_in, &check_out, today())?;

    let rooms = load_rooms(state).await?;
    let reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;
    let items = booking::available_rooms(&rooms, &reservations, &check_in, &check_out, guests);

    tracing::debug!(
        user_id = user.user_id,
        %check_in,
        %check_out,
        guests,
        found = items.len(),
        "availability search"
    );

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success("Available rooms", RoomList { items }, Some(meta)))
}
