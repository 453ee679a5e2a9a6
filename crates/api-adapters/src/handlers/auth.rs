use crate::error::{ApiError, Context};
use crate::extract::Payload;
use crate::metrics::Event;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domains::{LoginInput, SignupInput};
use serde_json::json;

pub async fn signup(
    State(state): State<AppState>,
    Payload(input): Payload<SignupInput>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .metrics
        .observe(Event::Signup, state.auth.signup(input).await)
        .context("Internal Server Error")?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "user": user })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Payload(input): Payload<LoginInput>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .metrics
        .observe(Event::Login, state.auth.login(input).await)
        .context("Internal Server Error")?;

    Ok(Json(json!({
        "message": "Login successful",
        "user": outcome.user,
        "token": outcome.token,
    })))
}
