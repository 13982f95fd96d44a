//! Availability and pricing rules for room stays.
//!
//! Everything here is pure: callers load the room and reservation documents,
//! ask these functions for a verdict, and persist the outcome themselves.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{Reservation, Room},
};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Parse a stay boundary. Plain dates are taken as midnight; date-times carry
/// no timezone unless one is given, in which case they are normalized to UTC.
pub fn parse_stay_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Calendar day of a stay boundary as the guest wrote it, ignoring any
/// offset. Falls back to [`parse_stay_date`] for shapes without a leading
/// `YYYY-MM-DD`.
pub fn stay_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .or_else(|| parse_stay_date(raw).map(|dt| dt.date()))
}

/// Half-open interval `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
}

impl StayRange {
    pub fn parse(check_in: &str, check_out: &str) -> Option<Self> {
        Some(Self {
            check_in: parse_stay_date(check_in)?,
            check_out: parse_stay_date(check_out)?,
        })
    }

    /// Whole nights, rounding partial days up. Zero for empty or inverted ranges.
    pub fn nights(&self) -> i64 {
        let secs = (self.check_out - self.check_in).num_seconds();
        if secs <= 0 {
            return 0;
        }
        (secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
    }

    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}

pub fn calculate_nights(check_in: &str, check_out: &str) -> i64 {
    StayRange::parse(check_in, check_out)
        .map(|range| range.nights())
        .unwrap_or(0)
}

pub fn calculate_total_price(nightly_price: i64, nights: i64) -> i64 {
    nightly_price * nights
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PriceQuote {
    pub room_id: i64,
    pub nights: i64,
    pub nightly_price: i64,
    pub total_price: i64,
}

pub fn quote(room: &Room, check_in: &str, check_out: &str) -> PriceQuote {
    let nights = calculate_nights(check_in, check_out);
    PriceQuote {
        room_id: room.id,
        nights,
        nightly_price: room.price,
        total_price: calculate_total_price(room.price, nights),
    }
}

/// First non-cancelled reservation of `room_id` that overlaps `range`.
/// Stored reservations whose dates no longer parse never conflict.
pub fn find_conflict<'a>(
    reservations: &'a [Reservation],
    room_id: i64,
    range: &StayRange,
    exclude_id: Option<i64>,
) -> Option<&'a Reservation> {
    reservations.iter().find(|reservation| {
        if reservation.room_id != room_id
            || reservation.is_cancelled()
            || Some(reservation.id) == exclude_id
        {
            return false;
        }
        StayRange::parse(&reservation.check_in, &reservation.check_out)
            .is_some_and(|existing| range.overlaps(&existing))
    })
}

/// Fails closed: unparseable dates are never available.
pub fn is_room_available(
    reservations: &[Reservation],
    room_id: i64,
    check_in: &str,
    check_out: &str,
) -> bool {
    match StayRange::parse(check_in, check_out) {
        Some(range) => find_conflict(reservations, room_id, &range, None).is_none(),
        None => false,
    }
}

/// Same as [`is_room_available`] but ignores the reservation being edited.
pub fn is_room_available_excluding(
    reservations: &[Reservation],
    room_id: i64,
    check_in: &str,
    check_out: &str,
    exclude_id: i64,
) -> bool {
    match StayRange::parse(check_in, check_out) {
        Some(range) => find_conflict(reservations, room_id, &range, Some(exclude_id)).is_none(),
        None => false,
    }
}

pub fn available_rooms(
    rooms: &[Room],
    reservations: &[Reservation],
    check_in: &str,
    check_out: &str,
    guests: u32,
) -> Vec<Room> {
    if guests < 1 {
        return Vec::new();
    }
    rooms
        .iter()
        .filter(|room| {
            room.max_guests >= guests
                && room.available
                && is_room_available(reservations, room.id, check_in, check_out)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StayError {
    #[error("check-in or check-out is not a valid date")]
    InvalidDates,
    #[error("check-in lies in the past")]
    CheckInInPast,
    #[error("check-out must be after check-in")]
    EmptyRange,
    #[error("guest count outside room capacity")]
    InvalidGuests,
}

impl StayError {
    pub fn code(&self) -> &'static str {
        match self {
            StayError::InvalidDates => "invalid_dates",
            StayError::CheckInInPast => "check_in_in_past",
            StayError::EmptyRange => "invalid_date_range",
            StayError::InvalidGuests => "invalid_guests",
        }
    }
}

impl From<StayError> for AppError {
    fn from(err: StayError) -> Self {
        AppError::bad_request(err.code())
    }
}

/// Validate a requested stay against the calendar. `today` is the first date
/// a new check-in may fall on.
pub fn validate_stay(
    check_in: &str,
    check_out: &str,
    today: NaiveDate,
) -> Result<StayRange, StayError> {
    let range = StayRange::parse(check_in, check_out).ok_or(StayError::InvalidDates)?;
    if range.check_in.date() < today {
        return Err(StayError::CheckInInPast);
    }
    if range.check_out <= range.check_in {
        return Err(StayError::EmptyRange);
    }
    Ok(range)
}

pub fn validate_guests(room: &Room, guests: u32) -> Result<(), StayError> {
    if guests < 1 || guests > room.max_guests {
        return Err(StayError::InvalidGuests);
    }
    Ok(())
}
