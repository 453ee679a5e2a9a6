use crate::error::ApiError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap, StatusCode};
use axum::{Form, Json};
use serde::de::DeserializeOwned;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A request payload sent either as JSON or as an urlencoded form. Rejections
/// use the API's `{"error"}` body. Anything the client got wrong about the
/// payload is a 400; an oversized body keeps 413.
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            return match Form::<T>::from_request(req, state).await {
                Ok(Form(value)) => Ok(Self(value)),
                Err(rejection) => Err(rejected(rejection.status(), rejection.body_text())),
            };
        }
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected(rejection.status(), rejection.body_text())),
        }
    }
}

fn rejected(status: StatusCode, message: String) -> ApiError {
    let status = match status {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    ApiError::new(status, message)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

/// Decodes an optional body, JSON unless the content type says form: an
/// empty or malformed payload yields `T::default()`.
pub fn lenient_body<T: DeserializeOwned + Default>(headers: &HeaderMap, body: &Bytes) -> T {
    if body.is_empty() {
        return T::default();
    }
    if is_form(headers) {
        return serde_urlencoded::from_bytes(body).unwrap_or_default();
    }
    serde_json::from_slice(body).unwrap_or_default()
}
