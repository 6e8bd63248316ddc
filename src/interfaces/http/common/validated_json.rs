//! JSON extractor with `validator` rules
//!
//! Malformed JSON is a 400, rule failures are a 422. Both use the
//! `{ message: [...], error }` body shape of the other client errors.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::BadRequestBody;

pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(ValidationErrors),
}

/// Flatten nested errors into `path: message` strings, sorted by path.
fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    out.push(format!("{}: {}", path, msg));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let body = BadRequestBody {
                    message: vec![format!("Invalid JSON: {}", rejection.body_text())],
                    error: "Bad Request".to_string(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let mut message = Vec::new();
                collect_messages("", &errors, &mut message);
                message.sort();
                if message.is_empty() {
                    message.push("Validation failed".to_string());
                }

                let body = BadRequestBody {
                    message,
                    error: "Unprocessable Entity".to_string(),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::put;
    use axum::Router;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Favorite {
        #[validate(length(min = 1, max = 8))]
        wallet_address: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Profile {
        #[validate(email)]
        email: String,
        #[validate(nested)]
        favorites: Vec<Favorite>,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<Profile>) -> &'static str {
        "ok"
    }

    async fn send(body: Body) -> Response {
        use tower::Service;
        let mut svc = Router::new().route("/profile", put(handler)).into_service();
        let req = Request::builder()
            .method("PUT")
            .uri("/profile")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        svc.call(req).await.unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let body = serde_json::json!({
            "email": "ada@example.com",
            "favorites": [{ "walletAddress": "0xabc" }]
        });
        let resp = send(Body::from(body.to_string())).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let resp = send(Body::from("{ not json")).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Bad Request");
    }

    #[tokio::test]
    async fn rule_failures_are_unprocessable_and_name_nested_paths() {
        let body = serde_json::json!({
            "email": "not-an-email",
            "favorites": [{ "walletAddress": "" }]
        });
        let resp = send(Body::from(body.to_string())).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        let messages: Vec<String> = serde_json::from_value(body["message"].clone()).unwrap();
        assert!(messages.iter().any(|m| m.starts_with("email:")));
        assert!(messages
            .iter()
            .any(|m| m.starts_with("favorites[0].wallet_address:")));
    }
}
