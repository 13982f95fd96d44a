use chrono::Utc;

use crate::{
    error::AppResult,
    models::{Role, Room, User},
    services::auth_service::hash_password,
    state::AppState,
    storage::keys,
};

pub const DEFAULT_ADMIN_ID: i64 = 1;
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@hotel.com";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub rooms_created: usize,
    pub admin_created: bool,
}

/// Seed rooms when the room document is empty and an admin when no account
/// holds the admin role. Safe to call on every start.
pub async fn ensure_defaults(state: &AppState, admin_password: &str) -> AppResult<SeedReport> {
    let _write = state.begin_write().await;
    let mut report = SeedReport::default();

    let rooms: Vec<Room> = state.storage.load(keys::ROOMS).await?;
    if rooms.is_empty() {
        let rooms = default_rooms();
        report.rooms_created = rooms.len();
        state.storage.save(keys::ROOMS, &rooms).await?;
    }

    let mut users: Vec<User> = state.storage.load(keys::USERS).await?;
    if !users.iter().any(|u| u.role == Role::Admin) {
        let id = if users.iter().any(|u| u.id == DEFAULT_ADMIN_ID) {
            crate::services::next_id(users.iter().map(|u| u.id))
        } else {
            DEFAULT_ADMIN_ID
        };
        let admin = User {
            id,
            id_number: "12345678".into(),
            name: "Hotel Administrator".into(),
            nationality: "Colombian".into(),
            email: DEFAULT_ADMIN_EMAIL.into(),
            phone: "+57 316 6365 224".into(),
            password_hash: hash_password(admin_password)?,
            role: Role::Admin,
            created_at: Utc::now(),
        };
        users.insert(0, admin);
        state.storage.save(keys::USERS, &users).await?;
        report.admin_created = true;
    }

    if report != SeedReport::default() {
        tracing::info!(
            rooms_created = report.rooms_created,
            admin_created = report.admin_created,
            "seeded default data"
        );
    }
    Ok(report)
}

pub fn default_rooms() -> Vec<Room> {
    fn room(
        id: i64,
        name: &str,
        description: &str,
        price: i64,
        max_guests: u32,
        beds: u32,
        features: &[&str],
    ) -> Room {
        Room {
            id,
            name: name.into(),
            description: description.into(),
            price,
            max_guests,
            beds,
            available: true,
            image: format!("images/suit{id}.jpg"),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    vec![
        room(
            1,
            "Deluxe Room",
            "Spacious room overlooking the garden",
            250_000,
            2,
            1,
            &["Free WiFi", "Minibar", "55\" TV", "Air conditioning", "Private bathroom"],
        ),
        room(
            2,
            "Executive Suite",
            "Luxury suite with a separate living room",
            450_000,
            4,
            2,
            &["Free WiFi", "Minibar", "65\" TV", "Jacuzzi", "Living room", "Panoramic view"],
        ),
        room(
            3,
            "Family Room",
            "Made for families with children",
            350_000,
            6,
            3,
            &["Free WiFi", "Minibar", "50\" TV", "Air conditioning", "Crib available", "Play area"],
        ),
        room(
            4,
            "Standard Room",
            "Comfortable room with every amenity",
            180_000,
            2,
            1,
            &["Free WiFi", "43\" TV", "Air conditioning", "Private bathroom", "Garden view"],
        ),
        room(
            5,
            "Presidential Suite",
            "The height of luxury and comfort",
            750_000,
            4,
            1,
            &[
                "Free WiFi",
                "Premium minibar",
                "75\" TV",
                "Private jacuzzi",
                "Private terrace",
                "Butler service",
                "Panoramic view",
            ],
        ),
        room(
            6,
            "Superior Room",
            "Elegant room with luxury finishes",
            320_000,
            3,
            2,
            &["Free WiFi", "Minibar", "50\" TV", "Air conditioning", "Private bathroom", "Private balcony"],
        ),
    ]
}
