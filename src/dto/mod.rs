pub mod admin;
pub mod auth;
pub mod contact;
pub mod reservations;
pub mod reviews;
pub mod rooms;
