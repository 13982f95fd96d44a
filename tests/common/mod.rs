#![allow(dead_code)]

use chrono::{Duration, Utc};
use hotel_booking_api::{
    dto::{
        auth::RegisterRequest,
        reservations::CreateReservationRequest,
    },
    middleware::auth::AuthUser,
    models::{Reservation, Role},
    seed::{DEFAULT_ADMIN_ID, ensure_defaults},
    services::{auth_service, reservation_service},
    state::{AppState, AuthSettings},
    storage::Storage,
};

pub const ADMIN_PASSWORD: &str = "admin123";

pub fn empty_state() -> AppState {
    AppState::new(Storage::memory(), AuthSettings::new("integration-test-secret", 1))
}

/// In-memory state with the six default rooms and the default admin.
pub async fn seeded_state() -> anyhow::Result<AppState> {
    let state = empty_state();
    ensure_defaults(&state, ADMIN_PASSWORD).await?;
    Ok(state)
}

pub fn admin() -> AuthUser {
    AuthUser {
        user_id: DEFAULT_ADMIN_ID,
        role: Role::Admin,
    }
}

pub fn registration(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        id_number: "1020304050".into(),
        name: "Laura Martinez".into(),
        nationality: "Colombian".into(),
        email: email.into(),
        phone: "+57 300 123 4567".into(),
        password: password.into(),
    }
}

pub async fn register_guest(state: &AppState, email: &str) -> anyhow::Result<AuthUser> {
    let resp = auth_service::register_user(state, registration(email, "secret123")).await?;
    let token = resp.data.expect("auth data").token;
    Ok(auth_service::decode_token(&state.auth, &token)?)
}

/// `YYYY-MM-DD` for a day relative to today.
pub fn day(offset: i64) -> String {
    (Utc::now().date_naive() + Duration::days(offset))
        .format("%Y-%m-%d")
        .to_string()
}

pub async fn book(
    state: &AppState,
    user: &AuthUser,
    room_id: i64,
    check_in: i64,
    check_out: i64,
    guests: u32,
) -> anyhow::Result<Reservation> {
    let resp = reservation_service::create_reservation(
        state,
        user,
        CreateReservationRequest {
            room_id,
            check_in: day(check_in),
            check_out: day(check_out),
            guests,
            notes: None,
        },
    )
    .await?;
    Ok(resp.data.expect("reservation"))
}
