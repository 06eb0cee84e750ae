//! URL composition for resource requests.
//!
//! `create` and `list` address the bare base URL. `get`, `update`, and
//! `delete` address `{base}/{key}`. The base URL itself is never modified.

use crate::config::BaseUrl;
use crate::rest::key::PrimaryKey;

/// Returns the collection URL, used by `list` and `create`.
#[must_use]
pub fn collection_url(base: &BaseUrl) -> String {
    base.as_ref().to_string()
}

/// Returns the member URL for `key`, used by `get`, `update`, and `delete`.
///
/// The key is percent-encoded as a single path segment, so reserved
/// characters cannot change the path. Pass keys unencoded: an already
/// encoded key is encoded again (`a%2Fb` becomes `a%252Fb`).
///
/// # Example
///
/// ```rust
/// use resource_client::BaseUrl;
/// use resource_client::rest::member_url;
///
/// let base = BaseUrl::new("https://api.example.com/comments").unwrap();
/// assert_eq!(member_url(&base, &42_u64), "https://api.example.com/comments/42");
/// assert_eq!(
///     member_url(&base, &"a/b".to_string()),
///     "https://api.example.com/comments/a%2Fb"
/// );
/// ```
#[must_use]
pub fn member_url<K: PrimaryKey>(base: &BaseUrl, key: &K) -> String {
    let segment = key.to_string();
    format!("{}/{}", base.as_ref(), urlencoding::encode(&segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseUrl {
        BaseUrl::new("https://api.example.com/comments").unwrap()
    }

    #[test]
    fn test_collection_url_is_base() {
        assert_eq!(collection_url(&base()), "https://api.example.com/comments");
    }

    #[test]
    fn test_member_url_appends_numeric_key() {
        assert_eq!(
            member_url(&base(), &42_u64),
            "https://api.example.com/comments/42"
        );
        assert_eq!(
            member_url(&base(), &0_i32),
            "https://api.example.com/comments/0"
        );
    }

    #[test]
    fn test_member_url_appends_text_key() {
        assert_eq!(
            member_url(&base(), &"5f1d7c".to_string()),
            "https://api.example.com/comments/5f1d7c"
        );
    }

    #[test]
    fn test_member_url_encodes_reserved_characters() {
        assert_eq!(
            member_url(&base(), &"a b?c".to_string()),
            "https://api.example.com/comments/a%20b%3Fc"
        );
    }

    #[test]
    fn test_member_url_encodes_pre_encoded_key_again() {
        assert_eq!(
            member_url(&base(), &"a%2Fb".to_string()),
            "https://api.example.com/comments/a%252Fb"
        );
    }

    #[test]
    fn test_base_is_not_mutated_between_calls() {
        let base = base();
        let _ = member_url(&base, &1_u64);
        let _ = member_url(&base, &2_u64);
        assert_eq!(base.as_ref(), "https://api.example.com/comments");
    }
}
