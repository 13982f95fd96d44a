use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;

use crate::{
    audit::log_audit,
    dto::auth::{AuthResponse, Claims, LoginRequest, RegisterRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{PublicUser, Role, User},
    response::{ApiResponse, Meta},
    services::next_id,
    state::{AppState, AuthSettings},
    storage::keys,
};

const MIN_PASSWORD_LEN: usize = 6;

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let RegisterRequest {
        id_number,
        name,
        nationality,
        email,
        phone,
        password,
    } = payload;
    let (id_number, name, nationality, email, phone) = (
        id_number.trim().to_string(),
        name.trim().to_string(),
        nationality.trim().to_string(),
        email.trim().to_lowercase(),
        phone.trim().to_string(),
    );

    if [&id_number, &name, &nationality, &email, &phone, &password]
        .iter()
        .any(|value| value.is_empty())
    {
        return Err(AppError::bad_request("empty_fields"));
    }
    if !is_valid_email(&email) {
        return Err(AppError::bad_request("invalid_email"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request("password_too_short"));
    }
    if name.split_whitespace().count() < 2 {
        return Err(AppError::bad_request("incomplete_name"));
    }
    if !is_valid_phone(&phone) {
        return Err(AppError::bad_request("invalid_phone"));
    }

    let password_hash = hash_password(&password)?;

    let _write = state.begin_write().await;
    let mut users: Vec<User> = state.storage.load(keys::USERS).await?;
    if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
        return Err(AppError::conflict("email_taken"));
    }

    let user = User {
        id: next_id(users.iter().map(|u| u.id)),
        id_number,
        name,
        nationality,
        email,
        phone,
        password_hash,
        role: Role::User,
        created_at: Utc::now(),
    };
    users.push(user.clone());
    state.storage.save(keys::USERS, &users).await?;

    log_audit(
        Some(user.id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    );

    let token = issue_token(&state.auth, &user)?;
    Ok(ApiResponse::success(
        "User created",
        AuthResponse {
            token,
            user: PublicUser::from(&user),
        },
        Some(Meta::empty()),
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let LoginRequest { email, password } = payload;
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::bad_request("empty_fields"));
    }

    let users: Vec<User> = state.storage.load(keys::USERS).await?;
    let user = users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
        .ok_or_else(|| AppError::unauthorized("email_not_found"))?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::unauthorized("wrong_password"));
    }

    let token = issue_token(&state.auth, user)?;

    log_audit(
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id, "role": user.role.as_str() })),
    );

    Ok(ApiResponse::success(
        "Logged in",
        AuthResponse {
            token,
            user: PublicUser::from(user),
        },
        Some(Meta::empty()),
    ))
}

pub async fn current_user(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<PublicUser>> {
    let users: Vec<User> = state.storage.load(keys::USERS).await?;
    let found = users
        .iter()
        .find(|u| u.id == user.user_id)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Current user", PublicUser::from(found), None))
}

/// Tokens are stateless; logging out only records the event. Clients drop
/// the token and it lapses at its expiry.
pub fn logout_user(user: &AuthUser) -> ApiResponse<serde_json::Value> {
    log_audit(Some(user.user_id), "user_logout", Some("users"), None);
    ApiResponse::success(
        "Logged out",
        serde_json::json!({ "user_id": user.user_id }),
        Some(Meta::empty()),
    )
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(settings: &AuthSettings, user: &User) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(settings.token_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok(format!("Bearer {token}"))
}

/// Accepts the raw token with or without its `Bearer ` prefix.
pub fn decode_token(settings: &AuthSettings, token: &str) -> AppResult<AuthUser> {
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::unauthorized("invalid_token"))?;

    let user_id = decoded
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::unauthorized("invalid_token"))?;

    Ok(AuthUser {
        user_id,
        role: decoded.claims.role,
    })
}

/// `local@domain.tld`: no whitespace, a single `@`, and a dot inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn is_valid_phone(phone: &str) -> bool {
    !phone.is_empty()
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}
