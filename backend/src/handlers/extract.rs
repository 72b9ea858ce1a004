use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
    http::{HeaderMap, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::app::AppState;
use crate::error::HbnbError;
use crate::services::AuthUser;

/// JSON body extractor whose rejections use the API's `{"error": ...}` shape.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HbnbError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                let message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid input data: {}", err.body_text())
                    }
                    JsonRejection::JsonSyntaxError(_) => "Malformed JSON body".to_string(),
                    JsonRejection::MissingJsonContentType(_) => {
                        "Expected request with `Content-Type: application/json`".to_string()
                    }
                    other => other.body_text(),
                };
                Err(HbnbError::bad_request(message))
            }
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = HbnbError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| HbnbError::unauthorized("Missing authorization header"))?;

        let claims = state.jwt.verify_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            HbnbError::unauthorized("Invalid or expired token")
        })?;

        AuthUser::try_from(claims).map_err(|_| HbnbError::unauthorized("Invalid or expired token"))
    }
}

/// Extract Bearer token from Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
