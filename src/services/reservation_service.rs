use chrono::{NaiveDate, Utc};

use crate::{
    audit::log_audit,
    booking,
    dto::reservations::{CreateReservationRequest, ModifyReservationRequest, ReservationList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Reservation, ReservationStatus, Room, User},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{active_account, next_id, room_service::load_rooms, today},
    state::AppState,
    storage::keys,
};

pub async fn list_my_reservations(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ReservationList>> {
    let reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;
    let mut mine: Vec<Reservation> = reservations
        .into_iter()
        .filter(|r| r.user_id == user.user_id)
        .collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let (items, meta) = pagination.apply(mine);
    Ok(ApiResponse::success("Ok", ReservationList { items }, Some(meta)))
}

pub async fn get_my_reservation(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<Reservation>> {
    let reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;
    let reservation = reservations
        .into_iter()
        .find(|r| r.id == id && r.user_id == user.user_id)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", reservation, Some(Meta::empty())))
}

pub async fn create_reservation(
    state: &AppState,
    user: &AuthUser,
    payload: CreateReservationRequest,
) -> AppResult<ApiResponse<Reservation>> {
    let CreateReservationRequest {
        room_id,
        check_in,
        check_out,
        guests,
        notes,
    } = payload;

    let _write = state.begin_write().await;

    let users: Vec<User> = state.storage.load(keys::USERS).await?;
    let guest = users
        .iter()
        .find(|u| u.id == user.user_id)
        .ok_or_else(|| AppError::unauthorized("unknown_user"))?;

    let rooms = load_rooms(state).await?;
    let room = rooms.iter().find(|r| r.id == room_id).ok_or(AppError::NotFound)?;
    if !room.available {
        return Err(AppError::conflict("room_unavailable"));
    }

    let range = booking::validate_stay(&check_in, &check_out, today())?;
    booking::validate_guests(room, guests)?;

    let mut reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;
    if booking::find_conflict(&reservations, room.id, &range, None).is_some() {
        return Err(AppError::conflict("room_unavailable"));
    }

    let nights = range.nights();
    let reservation = Reservation {
        id: next_id(reservations.iter().map(|r| r.id)),
        room_id: room.id,
        user_id: guest.id,
        check_in,
        check_out,
        guests,
        total_price: booking::calculate_total_price(room.price, nights),
        notes: notes.unwrap_or_default().trim().to_string(),
        status: ReservationStatus::Confirmed,
        created_at: Utc::now(),
        modified_at: None,
        cancelled_at: None,
        room_name: room.name.clone(),
        user_name: guest.name.clone(),
        user_email: guest.email.clone(),
        checked_in_at: None,
        checked_in_by: None,
        checkin_doc: None,
        checkin_notes: None,
    };
    reservations.push(reservation.clone());
    state.storage.save(keys::RESERVATIONS, &reservations).await?;

    log_audit(
        Some(user.user_id),
        "reservation_create",
        Some("reservations"),
        Some(serde_json::json!({
            "reservation_id": reservation.id,
            "room_id": reservation.room_id,
            "nights": nights,
            "total_price": reservation.total_price,
        })),
    );

    Ok(ApiResponse::success(
        "Reservation confirmed",
        reservation,
        Some(Meta::empty()),
    ))
}

pub async fn modify_my_reservation(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: ModifyReservationRequest,
) -> AppResult<ApiResponse<Reservation>> {
    let _write = state.begin_write().await;
    active_account(state, user).await?;
    let rooms = load_rooms(state).await?;
    let mut reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;
    ensure_owner_or_admin(&reservations, user, id)?;

    let updated = apply_modification(&mut reservations, &rooms, id, payload, today())?;
    state.storage.save(keys::RESERVATIONS, &reservations).await?;

    log_audit(
        Some(user.user_id),
        "reservation_modify",
        Some("reservations"),
        Some(serde_json::json!({ "reservation_id": id, "total_price": updated.total_price })),
    );

    Ok(ApiResponse::success(
        "Reservation modified",
        updated,
        Some(Meta::empty()),
    ))
}

pub async fn cancel_my_reservation(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<Reservation>> {
    let _write = state.begin_write().await;
    active_account(state, user).await?;
    let mut reservations: Vec<Reservation> = state.storage.load(keys::RESERVATIONS).await?;
    ensure_owner_or_admin(&reservations, user, id)?;

    let cancelled = apply_cancel(&mut reservations, id)?;
    state.storage.save(keys::RESERVATIONS, &reservations).await?;

    log_audit(
        Some(user.user_id),
        "reservation_cancel",
        Some("reservations"),
        Some(serde_json::json!({ "reservation_id": id })),
    );

    Ok(ApiResponse::success(
        "Reservation cancelled",
        cancelled,
        Some(Meta::empty()),
    ))
}

fn ensure_owner_or_admin(reservations: &[Reservation], user: &AuthUser, id: i64) -> AppResult<()> {
    let reservation = reservations
        .iter()
        .find(|r| r.id == id)
        .ok_or(AppError::NotFound)?;
    if reservation.user_id != user.user_id && !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Re-validate and re-price a reservation in place. Availability is checked
/// against every other reservation of the same room.
pub(crate) fn apply_modification(
    reservations: &mut [Reservation],
    rooms: &[Room],
    id: i64,
    payload: ModifyReservationRequest,
    today: NaiveDate,
) -> AppResult<Reservation> {
    let ModifyReservationRequest {
        check_in,
        check_out,
        guests,
        notes,
    } = payload;

    let index = reservations
        .iter()
        .position(|r| r.id == id)
        .ok_or(AppError::NotFound)?;
    if reservations[index].is_cancelled() {
        return Err(AppError::bad_request("reservation_cancelled"));
    }

    let room_id = reservations[index].room_id;
    let room = rooms.iter().find(|r| r.id == room_id).ok_or(AppError::NotFound)?;

    let range = booking::validate_stay(&check_in, &check_out, today)?;
    booking::validate_guests(room, guests)?;
    if booking::find_conflict(reservations, room_id, &range, Some(id)).is_some() {
        return Err(AppError::conflict("room_unavailable"));
    }

    let reservation = &mut reservations[index];
    reservation.total_price = booking::calculate_total_price(room.price, range.nights());
    reservation.check_in = check_in;
    reservation.check_out = check_out;
    reservation.guests = guests;
    reservation.notes = notes.unwrap_or_default().trim().to_string();
    reservation.modified_at = Some(Utc::now());
    Ok(reservation.clone())
}

pub(crate) fn apply_cancel(reservations: &mut [Reservation], id: i64) -> AppResult<Reservation> {
    let reservation = reservations
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or(AppError::NotFound)?;
    if reservation.is_cancelled() {
        return Err(AppError::bad_request("reservation_cancelled"));
    }
    reservation.status = ReservationStatus::Cancelled;
    reservation.cancelled_at = Some(Utc::now());
    Ok(reservation.clone())
}

/// Bring a cancelled reservation back, provided its dates are still free.
pub(crate) fn apply_reactivate(reservations: &mut [Reservation], id: i64) -> AppResult<Reservation> {
    let index = reservations
        .iter()
        .position(|r| r.id == id)
        .ok_or(AppError::NotFound)?;
    let current = &reservations[index];
    if !current.is_cancelled() {
        return Err(AppError::bad_request("reservation_not_cancelled"));
    }
    if !booking::is_room_available_excluding(
        reservations,
        current.room_id,
        &current.check_in,
        &current.check_out,
        id,
    ) {
        return Err(AppError::conflict("room_unavailable"));
    }

    let reservation = &mut reservations[index];
    reservation.status = ReservationStatus::Confirmed;
    reservation.cancelled_at = None;
    Ok(reservation.clone())
}
