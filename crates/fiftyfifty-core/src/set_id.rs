use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// Number of characters in every set identifier.
pub const SET_ID_LENGTH: usize = 6;

/// The public identifier of a video set.
///
/// Set ids are exactly six ASCII alphanumeric characters. They are short
/// enough that [`SmolStr`] keeps them inline without a heap allocation.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SetId(SmolStr);

impl SetId {
    /// Creates a new `SetId` after validating the input.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, CoreError> {
        let id = id.as_ref();
        Self::validate(id)?;
        Ok(Self(SmolStr::new(id)))
    }

    /// Creates a `SetId` without validation.
    ///
    /// Use this only for ids produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id.as_ref()))
    }

    /// Returns the set id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), CoreError> {
        if id.len() != SET_ID_LENGTH {
            return Err(CoreError::InvalidSetId(format!(
                "length must be {}, got {}",
                SET_ID_LENGTH,
                id.len()
            )));
        }

        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidSetId(format!(
                "must contain only alphanumeric characters: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for SetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SetId").field(&self.0).finish()
    }
}

impl Display for SetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        SetId::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl std::str::FromStr for SetId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SetId::parse(s)
    }
}
