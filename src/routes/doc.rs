use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    booking::PriceQuote,
    dto::{
        admin::{Overview, UserList},
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        contact::{ContactRequest, MessageList},
        reservations::{CheckInRequest, CreateReservationRequest, ModifyReservationRequest, ReservationList},
        reviews::{CreateReviewRequest, ReviewList},
        rooms::RoomList,
    },
    error::ErrorData,
    models::{ContactMessage, PublicUser, Reservation, ReservationStatus, Review, Role, Room},
    response::{ApiResponse, Meta},
    routes::{admin, auth, contact, health, params, reservations, reviews, rooms},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        auth::logout,
        rooms::list_rooms,
        rooms::search_available,
        rooms::get_room,
        rooms::quote_room,
        reservations::list_reservations,
        reservations::create_reservation,
        reservations::get_reservation,
        reservations::modify_reservation,
        reservations::cancel_reservation,
        reviews::list_reviews,
        reviews::create_review,
        contact::send_message,
        admin::overview,
        admin::list_all_reservations,
        admin::modify_reservation,
        admin::delete_reservation,
        admin::cancel_reservation,
        admin::reactivate_reservation,
        admin::check_in_reservation,
        admin::list_rooms,
        admin::toggle_room_availability,
        admin::list_users,
        admin::delete_user,
        admin::list_reviews,
        admin::list_messages
    ),
    components(
        schemas(
            Room,
            PublicUser,
            Role,
            Reservation,
            ReservationStatus,
            Review,
            ContactMessage,
            PriceQuote,
            RoomList,
            ReservationList,
            ReviewList,
            MessageList,
            UserList,
            Overview,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            CreateReservationRequest,
            ModifyReservationRequest,
            CheckInRequest,
            CreateReviewRequest,
            ContactRequest,
            ErrorData,
            params::Pagination,
            params::SortOrder,
            params::ReservationListQuery,
            Meta,
            ApiResponse<Room>,
            ApiResponse<RoomList>,
            ApiResponse<Reservation>,
            ApiResponse<ReservationList>,
            ApiResponse<Overview>,
            ApiResponse<ErrorData>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and login"),
        (name = "Rooms", description = "Room catalogue, availability search and quotes"),
        (name = "Reservations", description = "Guest reservations"),
        (name = "Reviews", description = "Guest reviews"),
        (name = "Contact", description = "Contact form"),
        (name = "Admin", description = "Admin dashboard endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
