use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::errors::ErrorResponse;
use validator::{Validate, ValidationErrors};

/// Json extractor that runs `validator` rules and rejects with the standard
/// error envelope instead of axum's plain-text rejection.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(json_value) =
            axum::Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    let body = ErrorResponse::new("MISSING_FIELD", rejection.body_text());
                    (StatusCode::BAD_REQUEST, axum::Json(body))
                })?;

        json_value.validate().map_err(|validation_errors| {
            let body = ErrorResponse::with_details(
                "MISSING_FIELD",
                format_validation_errors(&validation_errors),
                format_validation_errors_detailed(&validation_errors),
            );
            (StatusCode::BAD_REQUEST, axum::Json(body))
        })?;

        Ok(Self(json_value))
    }
}

/// Query-string counterpart of [`SimpleValidatedJson`]: malformed or
/// out-of-range parameters reject with the error envelope instead of axum's
/// plain-text rejection.
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let body = ErrorResponse::new("MISSING_FIELD", rejection.body_text());
                (StatusCode::BAD_REQUEST, axum::Json(body))
            })?;

        params.validate().map_err(|validation_errors| {
            let body = ErrorResponse::with_details(
                "MISSING_FIELD",
                format_validation_errors(&validation_errors),
                format_validation_errors_detailed(&validation_errors),
            );
            (StatusCode::BAD_REQUEST, axum::Json(body))
        })?;

        Ok(Self(params))
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut error_messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| match error.code.as_ref() {
                    "length" => "Invalid length".to_string(),
                    "range" => "Value out of range".to_string(),
                    _ => format!("Invalid {field}"),
                });
            error_messages.push(format!("{field}: {message}"));
        }
    }

    if error_messages.is_empty() {
        "Validation failed".to_string()
    } else {
        error_messages.join("; ")
    }
}

fn format_validation_errors_detailed(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match e.code.as_ref() {
                        "length" => "Invalid length".to_string(),
                        "range" => "Value out of range".to_string(),
                        _ => format!("Invalid {field}"),
                    })
            })
            .collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    json!(error_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, serde::Deserialize, Validate)]
    struct PageParams {
        #[validate(range(min = 1, max = 100))]
        quantity: i32,
    }

    async fn extract(uri: &str) -> Result<PageParams, (StatusCode, axum::Json<ErrorResponse>)> {
        let request = axum::http::Request::builder().uri(uri).body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        ValidatedQuery::<PageParams>::from_request_parts(&mut parts, &())
            .await
            .map(|ValidatedQuery(params)| params)
    }

    #[test]
    fn validation_errors_flatten_to_field_messages() {
        let params = PageParams { quantity: 0 };
        let errors = params.validate().unwrap_err();

        let message = format_validation_errors(&errors);
        assert!(message.contains("quantity"));

        let details = format_validation_errors_detailed(&errors);
        assert!(details.get("quantity").is_some());
    }

    #[tokio::test]
    async fn well_formed_query_passes_through() {
        let params = extract("/api/products?quantity=7").await.unwrap();
        assert_eq!(params.quantity, 7);
    }

    #[tokio::test]
    async fn non_numeric_query_param_rejects_with_envelope() {
        let (status, body) = extract("/api/products?quantity=abc").await.unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.0.success);
        assert_eq!(body.0.error.code, "MISSING_FIELD");
    }

    #[tokio::test]
    async fn out_of_range_query_param_rejects_with_envelope() {
        let (status, body) = extract("/api/products?quantity=500").await.unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.error.code, "MISSING_FIELD");
        assert!(body.0.error.details.get("quantity").is_some());
    }
}
