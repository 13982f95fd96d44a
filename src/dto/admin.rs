use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{PublicUser, Reservation};

#[derive(Debug, Serialize, ToSchema)]
pub struct Overview {
    pub total_reservations: usize,
    pub total_rooms: usize,
    /// Accounts with the `user` role.
    pub total_users: usize,
    /// Sum of confirmed reservation totals.
    pub total_revenue: i64,
    pub recent_reservations: Vec<Reservation>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<PublicUser>,
}
