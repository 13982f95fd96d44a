use chrono::{NaiveTime, Utc};

use crate::{
    audit::log_audit,
    booking,
    dto::{
        admin::{Overview, UserList},
        contact::MessageList,
        reservations::{CheckInRequest, ModifyReservationRequest, ReservationList},
        rooms::RoomList,
        reviews::ReviewList,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{ContactMessage, PublicUser, Reservation, ReservationStatus, Review, Role, Room, User},
    response::{ApiResponse, Meta},
    routes::params::{Pagination, ReservationListQuery, SortOrder},
    services::{
        reservation_service::{apply_cancel, apply_modification, apply_reactivate},
        active_admin,
        room_service::load_rooms,
        today,
    },
    state::AppState,
    storage::keys,
};

const RECENT_RESERVATIONS: usize = 5;

pub async fn overview(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Overview>> {
    active_admin(state, user).await?;
    let mut reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;
    let rooms = load_rooms(state).await?;
    let users: Vec<User> = state.storage.load(keys::USERS).await?;

    let total_revenue = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Confirmed)
        .map(|r| r.total_price)
        .sum();
    let total_reservations = reservations.len();

    reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    reservations.truncate(RECENT_RESERVATIONS);

    let data = Overview {
        total_reservations,
        total_rooms: rooms.len(),
        total_users: users.iter().filter(|u| u.role != Role::Admin).count(),
        total_revenue,
        recent_reservations: reservations,
    };
    Ok(ApiResponse::item("Overview", data))
}

pub async fn list_all_reservations(
    state: &AppState,
    user: &AuthUser,
    query: ReservationListQuery,
) -> AppResult<ApiResponse<ReservationList>> {
    active_admin(state, user).await?;
    let reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;

    let mut items: Vec<Reservation> = reservations
        .into_iter()
        .filter(|r| query.status.is_none_or(|status| r.status == status))
        .filter(|r| query.room_id.is_none_or(|room_id| r.room_id == room_id))
        .collect();

    match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))),
        SortOrder::Desc => items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))),
    }

    let (items, meta) = query.pagination().apply(items);
    Ok(ApiResponse::success("Reservations", ReservationList { items }, Some(meta)))
}

pub async fn modify_reservation(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: ModifyReservationRequest,
) -> AppResult<ApiResponse<Reservation>> {
    active_admin(state, user).await?;
    let _write = state.begin_write().await;
    let rooms = load_rooms(state).await?;
    let mut reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;

    let updated = apply_modification(&mut reservations, &rooms, id, payload, today())?;
    state.storage.save(keys::RESERVATIONS, &reservations).await?;

    log_audit(
        Some(user.user_id),
        "admin_reservation_modify",
        Some("reservations"),
        Some(serde_json::json!({ "reservation_id": id, "total_price": updated.total_price })),
    );

    Ok(ApiResponse::item("Reservation modified", updated))
}

pub async fn cancel_reservation(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<Reservation>> {
    active_admin(state, user).await?;
    let _write = state.begin_write().await;
    let mut reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;

    let cancelled = apply_cancel(&mut reservations, id)?;
    state.storage.save(keys::RESERVATIONS, &reservations).await?;

    log_audit(
        Some(user.user_id),
        "admin_reservation_cancel",
        Some("reservations"),
        Some(serde_json::json!({ "reservation_id": id })),
    );

    Ok(ApiResponse::item("Reservation cancelled", cancelled))
}

pub async fn reactivate_reservation(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<Reservation>> {
    active_admin(state, user).await?;
    let _write = state.begin_write().await;
    let mut reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;

    let reactivated = apply_reactivate(&mut reservations, id)?;
    state.storage.save(keys::RESERVATIONS, &reservations).await?;

    log_audit(
        Some(user.user_id),
        "admin_reservation_reactivate",
        Some("reservations"),
        Some(serde_json::json!({ "reservation_id": id })),
    );

    Ok(ApiResponse::item("Reservation reactivated", reactivated))
}

/// Hard delete. The record is gone from every later listing.
pub async fn delete_reservation(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    active_admin(state, user).await?;
    let _write = state.begin_write().await;
    let mut reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;

    let before = reservations.len();
    reservations.retain(|r| r.id != id);
    if reservations.len() == before {
        return Err(AppError::NotFound);
    }
    state.storage.save(keys::RESERVATIONS, &reservations).await?;

    log_audit(
        Some(user.user_id),
        "admin_reservation_delete",
        Some("reservations"),
        Some(serde_json::json!({ "reservation_id": id })),
    );

    Ok(ApiResponse::success(
        "Reservation deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

pub async fn check_in_reservation(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: CheckInRequest,
) -> AppResult<ApiResponse<Reservation>> {
    active_admin(state, user).await?;
    let time = payload.time.trim();
    let document = payload.verified_document.trim();
    if time.is_empty() || document.is_empty() {
        return Err(AppError::bad_request("empty_fields"));
    }
    let arrival = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::bad_request("invalid_time"))?;

    let _write = state.begin_write().await;
    let mut reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;
    let reservation = reservations
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or(AppError::NotFound)?;
    if reservation.is_cancelled() {
        return Err(AppError::bad_request("reservation_cancelled"));
    }
    if reservation.checked_in_at.is_some() {
        return Err(AppError::bad_request("already_checked_in"));
    }

    let checked_in_at = booking::stay_calendar_date(&reservation.check_in)
        .map(|day| day.and_time(arrival).and_utc())
        .unwrap_or_else(Utc::now);
    reservation.checked_in_at = Some(checked_in_at);
    reservation.checked_in_by = Some(user.user_id);
    reservation.checkin_doc = Some(document.to_string());
    reservation.checkin_notes = payload
        .notes
        .map(|notes| notes.trim().to_string())
        .filter(|notes| !notes.is_empty());
    let checked_in = reservation.clone();

    state.storage.save(keys::RESERVATIONS, &reservations).await?;

    log_audit(
        Some(user.user_id),
        "admin_reservation_check_in",
        Some("reservations"),
        Some(serde_json::json!({ "reservation_id": id, "checked_in_at": checked_in_at })),
    );

    Ok(ApiResponse::item("Check-in recorded", checked_in))
}

pub async fn list_rooms(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<RoomList>> {
    active_admin(state, user).await?;
    let items = load_rooms(state).await?;
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success("Rooms", RoomList { items }, Some(meta)))
}

/// Flip the bookable flag, e.g. for maintenance. Existing reservations stay.
pub async fn toggle_room_availability(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<Room>> {
    active_admin(state, user).await?;
    let _write = state.begin_write().await;
    let mut rooms = load_rooms(state).await?;
    let room = rooms.iter_mut().find(|r| r.id == id).ok_or(AppError::NotFound)?;
    room.available = !room.available;
    let updated = room.clone();
    state.storage.save(keys::ROOMS, &rooms).await?;

    log_audit(
        Some(user.user_id),
        "admin_room_toggle",
        Some("rooms"),
        Some(serde_json::json!({ "room_id": id, "available": updated.available })),
    );

    let message = if updated.available {
        "Room enabled"
    } else {
        "Room disabled"
    };
    Ok(ApiResponse::item(message, updated))
}

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    active_admin(state, user).await?;
    let users: Vec<User> = state.storage.load(keys::USERS).await?;
    let public: Vec<PublicUser> = users.iter().map(PublicUser::from).collect();
    let (items, meta) = pagination.apply(public);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

/// Reservations made by the account are kept with their name snapshots.
pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    active_admin(state, user).await?;
    if id == user.user_id {
        return Err(AppError::bad_request("cannot_delete_self"));
    }
    let _write = state.begin_write().await;
    let mut users: Vec<User> = state.storage.load(keys::USERS).await?;
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        return Err(AppError::NotFound);
    }
    state.storage.save(keys::USERS, &users).await?;

    log_audit(
        Some(user.user_id),
        "admin_user_delete",
        Some("users"),
        Some(serde_json::json!({ "user_id": id })),
    );

    Ok(ApiResponse::success(
        "User deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

pub async fn list_reviews(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ReviewList>> {
    active_admin(state, user).await?;
    let reviews: Vec<Review> = state.storage.load(keys::REVIEWS).await?;
    let (items, meta) = pagination.apply(reviews);
    Ok(ApiResponse::success("Reviews", ReviewList { items }, Some(meta)))
}

pub async fn list_messages(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<MessageList>> {
    active_admin(state, user).await?;
    let messages: Vec<ContactMessage> = state.storage.load(keys::MESSAGES).await?;
    let (items, meta) = pagination.apply(messages);
    Ok(ApiResponse::success("Messages", MessageList { items }, Some(meta)))
}
