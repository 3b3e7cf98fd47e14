//! Typed Identifiers

use std::{
    cmp::Ordering,
    convert::Infallible,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw identifier as handed out by the storefront API.
///
/// The API may use numeric or textual ids. Either form is kept verbatim so it
/// is sent back unchanged in order payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric id, e.g. `42`.
    Number(i64),

    /// Textual id, e.g. `"64f1c0..."`.
    Text(String),
}

impl Display for RawId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RawId::Number(value) => Display::fmt(value, f),
            RawId::Text(value) => Display::fmt(value, f),
        }
    }
}

impl RawId {
    /// Whether both ids name the same resource, treating `7` and `"7"` alike.
    pub fn matches(&self, other: &RawId) -> bool {
        match (self, other) {
            (RawId::Number(number), RawId::Text(text))
            | (RawId::Text(text), RawId::Number(number)) => *text == number.to_string(),
            _ => self == other,
        }
    }
}

impl FromStr for RawId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_err| RawId::Text(s.to_string()), RawId::Number))
    }
}

/// Identifier tagged with the resource it refers to.
pub struct TypedId<T>(RawId, PhantomData<T>);

impl<T> TypedId<T> {
    /// Wrap a raw identifier.
    pub const fn from_raw(raw: RawId) -> Self {
        Self(raw, PhantomData)
    }

    /// Unwrap into the raw identifier.
    #[must_use]
    pub fn into_raw(self) -> RawId {
        self.0
    }

    /// Borrow the raw identifier.
    pub fn as_raw(&self) -> &RawId {
        &self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        Self::from_raw(self.0.clone())
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<RawId> for TypedId<T> {
    fn from(value: RawId) -> Self {
        Self::from_raw(value)
    }
}

impl<T> From<i64> for TypedId<T> {
    fn from(value: i64) -> Self {
        Self::from_raw(RawId::Number(value))
    }
}

impl<T> From<&str> for TypedId<T> {
    fn from(value: &str) -> Self {
        Self::from_raw(RawId::Text(value.to_string()))
    }
}

impl<T> FromStr for TypedId<T> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<RawId>().map(Self::from_raw)
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(Self::from_raw)
    }
}
