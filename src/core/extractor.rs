use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON body extractor that runs `validator` rules before the handler sees it.
///
/// Parse failures become `400 Bad request`, rule violations `400 Validation error`.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_to_error)?;

        value
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(Self(value))
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
        JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
        JsonRejection::MissingJsonContentType(err) => {
            format!("Missing JSON content type: {}", err)
        }
        _ => "Failed to parse JSON body".to_string(),
    };
    AppError::BadRequest(message)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Router};
    use axum_test::TestServer;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TitleDto {
        #[validate(length(min = 1, message = "title is required"))]
        title: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/echo",
            post(|ValidatedJson(dto): ValidatedJson<TitleDto>| async move { dto.title }),
        )
    }

    #[tokio::test]
    async fn test_validated_json_accepts_valid_body() {
        let server = TestServer::new(app()).unwrap();
        let response = server
            .post("/echo")
            .json(&serde_json::json!({ "title": "Reklama" }))
            .await;
        response.assert_status_ok();
        response.assert_text("Reklama");
    }

    #[tokio::test]
    async fn test_validated_json_rejects_rule_violation() {
        let server = TestServer::new(app()).unwrap();
        let response = server
            .post("/echo")
            .json(&serde_json::json!({ "title": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validated_json_rejects_malformed_body() {
        let server = TestServer::new(app()).unwrap();
        let response = server.post("/echo").text("{not json").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
