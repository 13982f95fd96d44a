use axum::{
    body::Body,
    extract::{FromRequest, FromRequestParts},
    http::{Request, StatusCode, header},
    response::IntoResponse,
};
use hotel_booking_api::{
    dto::auth::LoginRequest,
    models::ReservationStatus,
    routes::{
        extract::{ApiJson, ApiQuery},
        params::ReservationListQuery,
    },
};

fn json_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn malformed_body_renders_the_error_envelope() -> anyhow::Result<()> {
    let err = ApiJson::<LoginRequest>::from_request(json_request("{\"email\": "), &())
        .await
        .err()
        .expect("rejected");
    assert_eq!(err.code(), "invalid_body");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["data"]["code"], "invalid_body");
    Ok(())
}

#[tokio::test]
async fn missing_content_type_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .body(Body::from(r#"{"email":"a@b.co","password":"secret"}"#))
        .expect("request");
    let err = ApiJson::<LoginRequest>::from_request(request, &())
        .await
        .err()
        .expect("rejected");
    assert_eq!(err.code(), "invalid_body");
}

#[tokio::test]
async fn well_formed_body_passes_through() {
    let ApiJson(login) = ApiJson::<LoginRequest>::from_request(
        json_request(r#"{"email":"a@b.co","password":"secret"}"#),
        &(),
    )
    .await
    .ok()
    .expect("accepted");
    assert_eq!(login.email, "a@b.co");
}

#[tokio::test]
async fn unknown_status_filter_is_an_invalid_query() {
    let (mut parts, ()) = Request::builder()
        .uri("/api/admin/reservations?status=bogus")
        .body(())
        .expect("request")
        .into_parts();
    let err = ApiQuery::<ReservationListQuery>::from_request_parts(&mut parts, &())
        .await
        .err()
        .expect("rejected");
    assert_eq!(err.code(), "invalid_query");

    let (mut parts, ()) = Request::builder()
        .uri("/api/admin/reservations?status=cancelled&page=2")
        .body(())
        .expect("request")
        .into_parts();
    let ApiQuery(query) = ApiQuery::<ReservationListQuery>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .expect("accepted");
    assert_eq!(query.status, Some(ReservationStatus::Cancelled));
    assert_eq!(query.page, Some(2));
}
