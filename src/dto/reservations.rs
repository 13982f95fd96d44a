use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Reservation;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub room_id: i64,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModifyReservationRequest {
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckInRequest {
    /// Arrival time on the check-in date, `HH:MM`.
    pub time: String,
    /// Identity document that was verified at the desk.
    pub verified_document: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationList {
    pub items: Vec<Reservation>,
}
