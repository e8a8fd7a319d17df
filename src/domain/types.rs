//! Strongly-typed value objects used by catalog records.
//!
//! Records carry these wrappers instead of raw strings so that identifiers and
//! the parent reference are checked once, at the boundary, and can be matched
//! on exhaustively afterwards.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate string identifiers that are trimmed and never empty.
///
/// Deserialization goes through the same constructor, so a record with a blank
/// id never makes it past the wire boundary.
macro_rules! string_id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty identifier.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

string_id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
string_id_newtype!(ProductId, "Unique identifier for a product.", "product_id");

/// Position of a category in the hierarchy.
///
/// On the wire this is `parentCategoryId`: `null` for a root, otherwise the
/// parent's id. The field is required, so an omitted value is rejected rather
/// than silently read as a root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParentRef {
    #[default]
    Root,
    Child(CategoryId),
}

impl ParentRef {
    pub fn child_of(parent: CategoryId) -> Self {
        Self::Child(parent)
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// The parent's id, if any.
    pub fn parent_id(&self) -> Option<&CategoryId> {
        match self {
            Self::Root => None,
            Self::Child(id) => Some(id),
        }
    }
}

impl Display for ParentRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Child(id) => write!(f, "{id}"),
        }
    }
}

impl From<Option<CategoryId>> for ParentRef {
    fn from(value: Option<CategoryId>) -> Self {
        value.map_or(Self::Root, Self::Child)
    }
}

impl From<ParentRef> for Option<CategoryId> {
    fn from(value: ParentRef) -> Self {
        match value {
            ParentRef::Root => None,
            ParentRef::Child(id) => Some(id),
        }
    }
}

impl Serialize for ParentRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Root => serializer.serialize_none(),
            Self::Child(id) => serializer.serialize_some(id.as_str()),
        }
    }
}

struct ParentRefVisitor;

impl<'de> Visitor<'de> for ParentRefVisitor {
    type Value = ParentRef;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a category id or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ParentRef::Root)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ParentRef::Root)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        CategoryId::new(value)
            .map(ParentRef::Child)
            .map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `deserialize_any` (not `deserialize_option`) so a missing field errors.
        deserializer.deserialize_any(ParentRefVisitor)
    }
}

/// Reference to a product image: a relative path or an absolute URL.
///
/// Stored verbatim; an empty reference is allowed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PictureRef(String);

impl PictureRef {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the reference is an absolute URL rather than an asset path.
    pub fn is_url(&self) -> bool {
        self.0.as_str().validate_url()
    }
}

impl Display for PictureRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PictureRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PictureRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<&str> for PictureRef {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
