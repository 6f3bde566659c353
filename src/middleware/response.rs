use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// A rendered page: the context a template would receive, wrapped in the JSON envelope
/// `{ "success": bool, "data": context }`.
#[derive(Debug)]
pub struct Page<T: Serialize> {
    pub context: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> Page<T> {
    /// Page with default 200 status
    pub fn ok(context: T) -> Self {
        Self {
            context,
            status_code: None,
        }
    }

    pub fn with_status(context: T, status_code: StatusCode) -> Self {
        Self {
            context,
            status_code: Some(status_code),
        }
    }

    /// Form re-rendered with errors after a rejected submission
    pub fn invalid(context: T) -> Self {
        Self::with_status(context, StatusCode::BAD_REQUEST)
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data = match serde_json::to_value(&self.context) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize page context: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Failed to serialize page context"
                    })),
                )
                    .into_response();
            }
        };

        let envelope = json!({
            "success": status.is_success(),
            "data": data
        });

        (status, Json(envelope)).into_response()
    }
}

/// 302 Found to `location`
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_sets_location() {
        let response = found("/done/");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/done/");
    }

    #[test]
    fn invalid_page_is_bad_request() {
        let response = Page::invalid(json!({ "form": {} })).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
