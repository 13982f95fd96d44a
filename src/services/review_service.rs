use chrono::Utc;

use crate::{
    audit::log_audit,
    dto::reviews::{CreateReviewRequest, ReviewList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Review, User},
    response::ApiResponse,
    routes::params::Pagination,
    services::next_id,
    state::AppState,
    storage::keys,
};

/// Oldest reviews fall off once the document holds this many.
pub const MAX_REVIEWS: usize = 200;

pub async fn list_reviews(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ReviewList>> {
    let reviews: Vec<Review> = state.storage.load(keys::REVIEWS).await?;
    let (items, meta) = pagination.apply(reviews);
    Ok(ApiResponse::success("Reviews", ReviewList { items }, Some(meta)))
}

pub async fn create_review(
    state: &AppState,
    user: &AuthUser,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::bad_request("invalid_rating"));
    }
    let title = payload.title.trim();
    let text = payload.text.trim();
    if title.is_empty() || text.is_empty() {
        return Err(AppError::bad_request("empty_fields"));
    }

    let _write = state.begin_write().await;
    let users: Vec<User> = state.storage.load(keys::USERS).await?;
    let author = users
        .iter()
        .find(|u| u.id == user.user_id)
        .ok_or_else(|| AppError::unauthorized("unknown_user"))?;

    let mut reviews: Vec<Review> = state.storage.load(keys::REVIEWS).await?;
    let review = Review {
        id: next_id(reviews.iter().map(|r| r.id)),
        user_id: author.id,
        user_name: author.name.clone(),
        rating: payload.rating,
        title: title.to_string(),
        text: text.to_string(),
        created_at: Utc::now(),
    };
    reviews.insert(0, review.clone());
    reviews.truncate(MAX_REVIEWS);
    state.storage.save(keys::REVIEWS, &reviews).await?;

    log_audit(
        Some(user.user_id),
        "review_create",
        Some("reviews"),
        Some(serde_json::json!({ "review_id": review.id, "rating": review.rating })),
    );

    Ok(ApiResponse::item("Review published", review))
}
