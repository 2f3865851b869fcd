//! Tri-state update field for values that may be cleared.
//!
//! A JSON body distinguishes "key omitted" from "key set to null". Plain
//! `Option<T>` collapses the two, so nullable fields use [`Patch`] with
//! `#[serde(default)]`: an omitted key stays [`Patch::Unset`], an explicit
//! `null` becomes [`Patch::Clear`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Requested change to an optional field.
///
/// # Examples
/// ```
/// use pantry::domain::Patch;
///
/// let mut quantity = Some("2".to_owned());
/// Patch::Unset.apply_to(&mut quantity);
/// assert_eq!(quantity.as_deref(), Some("2"));
/// Patch::<String>::Clear.apply_to(&mut quantity);
/// assert_eq!(quantity, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the stored value untouched.
    Unset,
    /// Remove the stored value.
    Clear,
    /// Replace the stored value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Patch<T> {
    /// Whether the patch leaves the field untouched.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The replacement value, if one was supplied.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset | Self::Clear => None,
        }
    }

    /// Apply the patch to a stored optional value.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Self::Unset => {}
            Self::Clear => *target = None,
            Self::Set(value) => *target = Some(value),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Set(value) => serializer.serialize_some(value),
            Self::Unset | Self::Clear => serializer.serialize_none(),
        }
    }
}
