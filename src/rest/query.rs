//! Query parameters for resource requests.

use serde::Serialize;
use serde_json::Value;

use crate::rest::ResourceError;

/// A flat, ordered set of query parameters.
///
/// Values are stored as JSON and are not checked on insertion. Only scalar
/// values can be sent; [`encode`](Self::encode) reports anything else.
///
/// # Example
///
/// ```rust
/// use resource_client::rest::QueryParams;
///
/// let query = QueryParams::new()
///     .param("postId", 1)
///     .param("email", "Eliseo@gardner.biz");
///
/// assert_eq!(
///     query.encode().unwrap(),
///     vec![
///         ("postId".to_string(), "1".to_string()),
///         ("email".to_string(), "Eliseo@gardner.biz".to_string()),
///     ]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams {
    params: Vec<(String, Value)>,
}

impl QueryParams {
    /// Creates an empty set of parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter. Repeated keys are sent repeatedly.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Builds parameters from a serializable struct or map.
    ///
    /// Fields are ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidQuery`] if the value does not
    /// serialize to a JSON object.
    pub fn from_serialize<T: Serialize>(params: &T) -> Result<Self, ResourceError> {
        let value = serde_json::to_value(params).map_err(|e| ResourceError::InvalidQuery {
            key: String::new(),
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(map) => Ok(Self {
                params: map.into_iter().collect(),
            }),
            Value::Null => Ok(Self::new()),
            other => Err(ResourceError::InvalidQuery {
                key: String::new(),
                reason: format!("expected a map of parameters, got {}", json_kind(&other)),
            }),
        }
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Converts the parameters into string pairs for the query string.
    ///
    /// Strings are sent verbatim, numbers and booleans in their JSON form,
    /// and `null` values are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidQuery`] for array or object values.
    pub fn encode(&self) -> Result<Vec<(String, String)>, ResourceError> {
        let mut pairs = Vec::with_capacity(self.params.len());

        for (key, value) in &self.params {
            let encoded = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ResourceError::InvalidQuery {
                        key: key.clone(),
                        reason: format!("{} values cannot be sent", json_kind(value)),
                    });
                }
            };
            pairs.push((key.clone(), encoded));
        }

        Ok(pairs)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
