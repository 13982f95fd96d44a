mod common;

use chrono::Utc;
use hotel_booking_api::{
    dto::{
        reservations::{CheckInRequest, CreateReservationRequest, ModifyReservationRequest},
        rooms::AvailabilityQuery,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{ReservationStatus, Role, User},
    routes::params::{Pagination, ReservationListQuery},
    seed::DEFAULT_ADMIN_ID,
    services::{admin_service, reservation_service, room_service},
    storage::keys,
};

use common::{admin, book, day, register_guest, seeded_state};

fn check_in(time: &str, document: &str) -> CheckInRequest {
    CheckInRequest {
        time: time.into(),
        verified_document: document.into(),
        notes: Some("early arrival".into()),
    }
}

#[tokio::test]
async fn admin_endpoints_require_the_admin_role() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;

    let err = admin_service::overview(&state, &guest).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = admin_service::list_users(&state, &guest, Pagination::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = admin_service::toggle_room_availability(&state, &guest, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}

#[tokio::test]
async fn overview_counts_confirmed_revenue() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;
    register_guest(&state, "other@example.com").await?;

    book(&state, &guest, 1, 5, 7, 2).await?; // 500_000
    let cancelled = book(&state, &guest, 4, 5, 6, 1).await?; // 180_000, cancelled below
    book(&state, &guest, 2, 5, 6, 2).await?; // 450_000
    reservation_service::cancel_my_reservation(&state, &guest, cancelled.id).await?;

    let overview = admin_service::overview(&state, &admin()).await?.data.expect("overview");
    assert_eq!(overview.total_reservations, 3);
    assert_eq!(overview.total_revenue, 950_000);
    assert_eq!(overview.total_rooms, 6);
    assert_eq!(overview.total_users, 2);
    assert_eq!(overview.recent_reservations.len(), 3);
    Ok(())
}

#[tokio::test]
async fn cancel_then_reactivate_restores_the_reservation() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;
    let reservation = book(&state, &guest, 1, 10, 12, 2).await?;

    let err = admin_service::reactivate_reservation(&state, &admin(), reservation.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "reservation_not_cancelled");

    admin_service::cancel_reservation(&state, &admin(), reservation.id).await?;
    let restored = admin_service::reactivate_reservation(&state, &admin(), reservation.id)
        .await?
        .data
        .expect("reservation");
    assert_eq!(restored.status, ReservationStatus::Confirmed);
    assert!(restored.cancelled_at.is_none());
    Ok(())
}

#[tokio::test]
async fn reactivation_is_blocked_once_dates_are_rebooked() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let first = register_guest(&state, "first@example.com").await?;
    let second = register_guest(&state, "second@example.com").await?;

    let original = book(&state, &first, 1, 10, 12, 2).await?;
    admin_service::cancel_reservation(&state, &admin(), original.id).await?;
    book(&state, &second, 1, 11, 13, 2).await?;

    let err = admin_service::reactivate_reservation(&state, &admin(), original.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.code(), "room_unavailable");
    Ok(())
}

#[tokio::test]
async fn deleted_reservations_leave_every_listing() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;
    let reservation = book(&state, &guest, 1, 10, 12, 2).await?;

    admin_service::delete_reservation(&state, &admin(), reservation.id).await?;

    let all = admin_service::list_all_reservations(&state, &admin(), ReservationListQuery::default())
        .await?
        .data
        .expect("list");
    assert!(all.items.is_empty());

    let mine = reservation_service::list_my_reservations(&state, &guest, Pagination::default())
        .await?
        .data
        .expect("list");
    assert!(mine.items.is_empty());

    let err = admin_service::delete_reservation(&state, &admin(), reservation.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    // The dates are free again.
    book(&state, &guest, 1, 10, 12, 2).await?;
    Ok(())
}

#[tokio::test]
async fn listing_filters_by_status_and_room() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;

    let kept = book(&state, &guest, 1, 3, 4, 1).await?;
    let dropped = book(&state, &guest, 2, 3, 4, 1).await?;
    book(&state, &guest, 3, 3, 4, 1).await?;
    admin_service::cancel_reservation(&state, &admin(), dropped.id).await?;

    let cancelled = admin_service::list_all_reservations(
        &state,
        &admin(),
        ReservationListQuery {
            status: Some(ReservationStatus::Cancelled),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("list")
    .items;
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, dropped.id);

    let by_room = admin_service::list_all_reservations(
        &state,
        &admin(),
        ReservationListQuery {
            room_id: Some(1),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("list")
    .items;
    assert_eq!(by_room.len(), 1);
    assert_eq!(by_room[0].id, kept.id);

    let page = admin_service::list_all_reservations(
        &state,
        &admin(),
        ReservationListQuery {
            page: Some(2),
            per_page: Some(2),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(page.data.expect("list").items.len(), 1);
    assert_eq!(page.meta.and_then(|m| m.total), Some(3));
    Ok(())
}

#[tokio::test]
async fn toggling_a_room_hides_it_from_search() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;
    let query = || AvailabilityQuery {
        check_in: Some(day(5)),
        check_out: Some(day(6)),
        guests: Some(1),
    };

    let disabled = admin_service::toggle_room_availability(&state, &admin(), 4)
        .await?
        .data
        .expect("room");
    assert!(!disabled.available);

    let rooms = room_service::search_available(&state, &guest, query())
        .await?
        .data
        .expect("rooms")
        .items;
    assert!(!rooms.iter().any(|r| r.id == 4));

    // The admin listing still shows it.
    let all = admin_service::list_rooms(&state, &admin()).await?.data.expect("rooms").items;
    assert!(all.iter().any(|r| r.id == 4 && !r.available));

    admin_service::toggle_room_availability(&state, &admin(), 4).await?;
    let rooms = room_service::search_available(&state, &guest, query())
        .await?
        .data
        .expect("rooms")
        .items;
    assert!(rooms.iter().any(|r| r.id == 4));
    Ok(())
}

#[tokio::test]
async fn check_in_records_the_arrival_once() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;
    let reservation = book(&state, &guest, 1, 2, 4, 2).await?;

    let err = admin_service::check_in_reservation(&state, &admin(), reservation.id, check_in("", "CC 123"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "empty_fields");

    let err = admin_service::check_in_reservation(&state, &admin(), reservation.id, check_in("25:99", "CC 123"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "invalid_time");

    let checked = admin_service::check_in_reservation(&state, &admin(), reservation.id, check_in("14:30", "CC 123"))
        .await?
        .data
        .expect("reservation");
    let at = checked.checked_in_at.expect("check-in time");
    assert_eq!(at.format("%Y-%m-%d %H:%M").to_string(), format!("{} 14:30", day(2)));
    assert_eq!(checked.checked_in_by, Some(DEFAULT_ADMIN_ID));
    assert_eq!(checked.checkin_doc.as_deref(), Some("CC 123"));
    assert_eq!(checked.checkin_notes.as_deref(), Some("early arrival"));

    let err = admin_service::check_in_reservation(&state, &admin(), reservation.id, check_in("15:00", "CC 123"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "already_checked_in");

    let cancelled = book(&state, &guest, 2, 2, 4, 2).await?;
    admin_service::cancel_reservation(&state, &admin(), cancelled.id).await?;
    let err = admin_service::check_in_reservation(&state, &admin(), cancelled.id, check_in("15:00", "CC 123"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "reservation_cancelled");
    Ok(())
}

#[tokio::test]
async fn deleting_users_keeps_their_reservations() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;
    book(&state, &guest, 1, 3, 5, 2).await?;

    let err = admin_service::delete_user(&state, &admin(), DEFAULT_ADMIN_ID)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "cannot_delete_self");

    admin_service::delete_user(&state, &admin(), guest.user_id).await?;

    let users = admin_service::list_users(&state, &admin(), Pagination::default())
        .await?
        .data
        .expect("users")
        .items;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Admin);

    let all = admin_service::list_all_reservations(&state, &admin(), ReservationListQuery::default())
        .await?
        .data
        .expect("list")
        .items;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].user_email, "guest@example.com");

    let err = admin_service::delete_user(&state, &admin(), guest.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn deleted_guests_lose_access_to_their_reservations() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "gone@example.com").await?;
    let reservation = book(&state, &guest, 1, 3, 5, 2).await?;

    admin_service::delete_user(&state, &admin(), guest.user_id).await?;

    let err = reservation_service::modify_my_reservation(
        &state,
        &guest,
        reservation.id,
        ModifyReservationRequest {
            check_in: day(3),
            check_out: day(6),
            guests: 2,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.code(), "unknown_user");

    let err = reservation_service::cancel_my_reservation(&state, &guest, reservation.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "unknown_user");

    let stored = admin_service::list_all_reservations(&state, &admin(), ReservationListQuery::default())
        .await?
        .data
        .expect("list")
        .items;
    assert_eq!(stored[0].status, ReservationStatus::Confirmed);
    assert_eq!(stored[0].check_out, day(5));
    Ok(())
}

#[tokio::test]
async fn admin_rights_follow_the_stored_account() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;

    let mut users: Vec<User> = state.storage.load(keys::USERS).await?;
    let deputy = User {
        id: 2,
        id_number: "99887766".into(),
        name: "Deputy Manager".into(),
        nationality: "Colombian".into(),
        email: "deputy@hotel.com".into(),
        phone: "+57 310 000 0000".into(),
        password_hash: String::new(),
        role: Role::Admin,
        created_at: Utc::now(),
    };
    users.push(deputy);
    state.storage.save(keys::USERS, &users).await?;
    let deputy = AuthUser {
        user_id: 2,
        role: Role::Admin,
    };

    admin_service::overview(&state, &deputy).await?;
    admin_service::delete_user(&state, &admin(), deputy.user_id).await?;

    let err = admin_service::overview(&state, &deputy).await.unwrap_err();
    assert_eq!(err.code(), "unknown_user");
    let err = admin_service::delete_user(&state, &deputy, guest.user_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "unknown_user");

    // A token claiming admin for a plain user account is not enough.
    let forged = AuthUser {
        user_id: guest.user_id,
        role: Role::Admin,
    };
    let err = admin_service::overview(&state, &forged).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}

#[tokio::test]
async fn check_in_uses_the_date_as_written() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "late@example.com").await?;
    let reservation = reservation_service::create_reservation(
        &state,
        &guest,
        CreateReservationRequest {
            room_id: 1,
            check_in: format!("{}T23:30:00-05:00", day(3)),
            check_out: day(5),
            guests: 1,
            notes: None,
        },
    )
    .await?
    .data
    .expect("reservation");

    let checked = admin_service::check_in_reservation(&state, &admin(), reservation.id, check_in("14:30", "PA 998"))
        .await?
        .data
        .expect("reservation");
    let at = checked.checked_in_at.expect("check-in time");
    assert_eq!(at.format("%Y-%m-%d %H:%M").to_string(), format!("{} 14:30", day(3)));
    Ok(())
}
