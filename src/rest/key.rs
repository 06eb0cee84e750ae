//! Primary-key descriptors.
//!
//! Every resource type declares exactly one primary-key field. The key's
//! value builds per-item URLs, matches cached elements, and decides whether
//! `save` creates or updates.

use std::fmt;

/// The value type of a primary-key field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// An integer key such as `id: 42`.
    Numeric,
    /// A string key such as `id: "42"` or `_id: "5f1d..."`.
    Text,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Name and type of a resource's primary-key field.
///
/// # Example
///
/// ```rust
/// use resource_client::rest::{KeyField, KeyKind};
///
/// let field = KeyField::new("_id", KeyKind::Text);
/// assert_eq!(field.to_string(), "_id (text)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyField {
    /// The JSON field name, e.g. `"id"` or `"_id"`.
    pub name: &'static str,
    /// The field's value type.
    pub kind: KeyKind,
}

impl KeyField {
    /// Creates a new key descriptor.
    #[must_use]
    pub const fn new(name: &'static str, kind: KeyKind) -> Self {
        Self { name, kind }
    }
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// A value usable as a resource's primary key.
///
/// [`is_assigned`](Self::is_assigned) is a truthiness check: it returns
/// `false` for the type's zero value (`0`, `""`). A zero or empty key is
/// therefore indistinguishable from an absent one when `save` decides
/// between create and update. Call `update` directly for such records.
pub trait PrimaryKey: Clone + PartialEq + fmt::Display + fmt::Debug + Send + Sync + 'static {
    /// The key's value type.
    const KIND: KeyKind;

    /// Returns `true` if the key holds a non-zero, non-empty value.
    fn is_assigned(&self) -> bool;
}

macro_rules! impl_numeric_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PrimaryKey for $ty {
                const KIND: KeyKind = KeyKind::Numeric;

                fn is_assigned(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_numeric_key!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl PrimaryKey for String {
    const KIND: KeyKind = KeyKind::Text;

    fn is_assigned(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_keys_are_truthy_unless_zero() {
        assert!(42_u64.is_assigned());
        assert!((-1_i64).is_assigned());
        assert!(!0_u64.is_assigned());
        assert!(!0_i32.is_assigned());
        assert_eq!(<u64 as PrimaryKey>::KIND, KeyKind::Numeric);
    }

    #[test]
    fn test_text_keys_are_truthy_unless_empty() {
        assert!("42".to_string().is_assigned());
        assert!("0".to_string().is_assigned());
        assert!(!String::new().is_assigned());
        assert_eq!(<String as PrimaryKey>::KIND, KeyKind::Text);
    }

    #[test]
    fn test_key_field_display() {
        assert_eq!(KeyField::new("id", KeyKind::Numeric).to_string(), "id (numeric)");
        assert_eq!(KeyField::new("_id", KeyKind::Text).to_string(), "_id (text)");
    }
}
