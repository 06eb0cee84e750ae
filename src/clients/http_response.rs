//! HTTP response type returned by transports.

/// An HTTP response as seen by the resource layer.
///
/// Transports return every response they receive, successful or not. The
/// resource layer decides what a non-2xx status means.
///
/// # Example
///
/// ```rust
/// use resource_client::clients::HttpResponse;
/// use serde_json::json;
///
/// let response = HttpResponse::new(404, json!({"error": "Not found"}));
/// assert!(!response.is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The parsed response body. `Null` when the body was empty.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, body: serde_json::Value) -> Self {
        Self { code, body }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` when the body carries no content.
    ///
    /// `null` and `{}` both count as empty.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        match &self.body {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_for_2xx_status_codes() {
        assert!(HttpResponse::new(200, json!({})).is_ok());
        assert!(HttpResponse::new(201, json!({})).is_ok());
        assert!(HttpResponse::new(204, json!(null)).is_ok());
        assert!(HttpResponse::new(299, json!({})).is_ok());
    }

    #[test]
    fn test_is_ok_false_for_non_2xx() {
        assert!(!HttpResponse::new(199, json!({})).is_ok());
        assert!(!HttpResponse::new(301, json!({})).is_ok());
        assert!(!HttpResponse::new(404, json!({})).is_ok());
        assert!(!HttpResponse::new(500, json!({})).is_ok());
    }

    #[test]
    fn test_is_empty_body() {
        assert!(HttpResponse::new(200, json!(null)).is_empty_body());
        assert!(HttpResponse::new(200, json!({})).is_empty_body());
        assert!(!HttpResponse::new(200, json!({"id": 1})).is_empty_body());
        assert!(!HttpResponse::new(200, json!([])).is_empty_body());
    }
}
