use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{PublicUser, Role};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub id_number: String,
    pub name: String,
    pub nationality: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}
