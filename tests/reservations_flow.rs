mod common;

use hotel_booking_api::{
    dto::{
        reservations::{CreateReservationRequest, ModifyReservationRequest},
        rooms::AvailabilityQuery,
    },
    error::AppError,
    models::ReservationStatus,
    routes::params::Pagination,
    services::{admin_service, reservation_service, room_service},
};

use common::{admin, book, day, register_guest, seeded_state};

const DELUXE: i64 = 1;
const EXECUTIVE: i64 = 2;

fn search(check_in: i64, check_out: i64, guests: u32) -> AvailabilityQuery {
    AvailabilityQuery {
        check_in: Some(day(check_in)),
        check_out: Some(day(check_out)),
        guests: Some(guests),
    }
}

#[tokio::test]
async fn booking_prices_by_nights() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;

    let reservation = book(&state, &guest, DELUXE, 10, 12, 2).await?;
    assert_eq!(reservation.total_price, 500_000);
    assert_eq!(reservation.status, ReservationStatus::Confirmed);
    assert_eq!(reservation.room_name, "Deluxe Room");
    assert_eq!(reservation.user_email, "guest@example.com");
    assert_eq!(reservation.check_in, day(10));
    Ok(())
}

#[tokio::test]
async fn overlapping_stays_conflict_but_back_to_back_is_fine() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let first = register_guest(&state, "first@example.com").await?;
    let second = register_guest(&state, "second@example.com").await?;

    book(&state, &first, DELUXE, 10, 13, 2).await?;

    let err = book(&state, &second, DELUXE, 12, 15, 1).await.unwrap_err();
    let err = err.downcast::<AppError>()?;
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.code(), "room_unavailable");

    // Checking in on the previous guest's check-out day does not overlap.
    book(&state, &second, DELUXE, 13, 15, 1).await?;
    // A different room on the same nights is unaffected.
    book(&state, &second, EXECUTIVE, 10, 13, 4).await?;
    Ok(())
}

#[tokio::test]
async fn invalid_requests_are_rejected() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;

    let err = book(&state, &guest, DELUXE, 5, 6, 3).await.unwrap_err();
    assert_eq!(err.downcast::<AppError>()?.code(), "invalid_guests");

    let err = book(&state, &guest, DELUXE, -2, 3, 1).await.unwrap_err();
    assert_eq!(err.downcast::<AppError>()?.code(), "check_in_in_past");

    let err = book(&state, &guest, DELUXE, 6, 6, 1).await.unwrap_err();
    assert_eq!(err.downcast::<AppError>()?.code(), "invalid_date_range");

    let err = reservation_service::create_reservation(
        &state,
        &guest,
        CreateReservationRequest {
            room_id: DELUXE,
            check_in: "someday".into(),
            check_out: day(3),
            guests: 1,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "invalid_dates");

    let err = book(&state, &guest, 999, 5, 6, 1).await.unwrap_err();
    assert!(matches!(err.downcast::<AppError>()?, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn cancelling_frees_the_dates() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let first = register_guest(&state, "first@example.com").await?;
    let second = register_guest(&state, "second@example.com").await?;

    let reservation = book(&state, &first, DELUXE, 20, 22, 2).await?;
    let cancelled = reservation_service::cancel_my_reservation(&state, &first, reservation.id)
        .await?
        .data
        .expect("reservation");
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());

    book(&state, &second, DELUXE, 20, 22, 2).await?;

    let err = reservation_service::cancel_my_reservation(&state, &first, reservation.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "reservation_cancelled");
    Ok(())
}

#[tokio::test]
async fn modification_reprices_and_checks_availability() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;
    let other = register_guest(&state, "other@example.com").await?;

    let reservation = book(&state, &guest, DELUXE, 10, 12, 2).await?;
    book(&state, &other, DELUXE, 15, 17, 2).await?;

    // Extending over its own current dates is allowed.
    let modified = reservation_service::modify_my_reservation(
        &state,
        &guest,
        reservation.id,
        ModifyReservationRequest {
            check_in: day(10),
            check_out: day(13),
            guests: 1,
            notes: Some("  late arrival ".into()),
        },
    )
    .await?
    .data
    .expect("reservation");
    assert_eq!(modified.total_price, 750_000);
    assert_eq!(modified.guests, 1);
    assert_eq!(modified.notes, "late arrival");
    assert!(modified.modified_at.is_some());

    let err = reservation_service::modify_my_reservation(
        &state,
        &guest,
        reservation.id,
        ModifyReservationRequest {
            check_in: day(14),
            check_out: day(16),
            guests: 1,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "room_unavailable");
    Ok(())
}

#[tokio::test]
async fn guests_only_see_their_own_reservations() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let owner = register_guest(&state, "owner@example.com").await?;
    let stranger = register_guest(&state, "stranger@example.com").await?;

    let first = book(&state, &owner, DELUXE, 3, 4, 1).await?;
    let second = book(&state, &owner, EXECUTIVE, 3, 4, 1).await?;
    book(&state, &stranger, DELUXE, 8, 9, 1).await?;

    let mine = reservation_service::list_my_reservations(&state, &owner, Pagination::default())
        .await?
        .data
        .expect("list")
        .items;
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, second.id);
    assert!(mine.iter().all(|r| r.user_id == owner.user_id));

    let err = reservation_service::get_my_reservation(&state, &stranger, first.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = reservation_service::cancel_my_reservation(&state, &stranger, first.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Staff may act on any reservation through the same endpoint.
    reservation_service::cancel_my_reservation(&state, &admin(), first.id).await?;
    Ok(())
}

#[tokio::test]
async fn search_excludes_booked_rooms() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;

    let before = room_service::search_available(&state, &guest, search(30, 32, 2))
        .await?
        .data
        .expect("rooms")
        .items;
    assert!(before.iter().any(|r| r.id == DELUXE));
    assert!(before.iter().all(|r| r.max_guests >= 2));

    book(&state, &guest, DELUXE, 31, 33, 2).await?;

    let after = room_service::search_available(&state, &guest, search(30, 32, 2))
        .await?
        .data
        .expect("rooms")
        .items;
    assert!(!after.iter().any(|r| r.id == DELUXE));
    assert_eq!(after.len(), before.len() - 1);

    let large = room_service::search_available(&state, &guest, search(30, 32, 5))
        .await?
        .data
        .expect("rooms")
        .items;
    assert_eq!(large.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);

    let err = room_service::search_available(
        &state,
        &guest,
        AvailabilityQuery {
            check_in: Some(day(1)),
            check_out: None,
            guests: Some(2),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "empty_fields");
    Ok(())
}

#[tokio::test]
async fn disabled_rooms_cannot_be_booked() -> anyhow::Result<()> {
    let state = seeded_state().await?;
    let guest = register_guest(&state, "guest@example.com").await?;

    admin_service::toggle_room_availability(&state, &admin(), DELUXE).await?;

    let err = book(&state, &guest, DELUXE, 4, 5, 1).await.unwrap_err();
    let err = err.downcast::<AppError>()?;
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.code(), "room_unavailable");
    Ok(())
}
