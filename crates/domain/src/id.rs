//! Identifier types.
//!
//! Catalog entities are never addressed by a numeric key in the listing
//! payloads, only by their canonical URL. [`EntityId`] is the stable key
//! derived from that URL and is what the favourites set stores.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Generates a new UUID v7 used to correlate log lines of one request.
#[must_use]
pub fn generate_request_id() -> Uuid {
    Uuid::now_v7()
}

/// Identifier of a catalog entity.
///
/// Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Creates an identifier from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] if the value is empty
    /// or only whitespace.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(value));
        }
        Ok(Self(value))
    }

    /// Derives the identifier from a canonical locator by taking its last
    /// non-empty path segment. Any query or fragment is ignored.
    ///
    /// `https://swapi.dev/api/people/1/` yields `1`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidLocator`] when the locator has no
    /// non-blank segment.
    pub fn from_locator(locator: &str) -> DomainResult<Self> {
        let path = locator.split(['?', '#']).next().unwrap_or_default();
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .next_back()
            .and_then(|segment| Self::new(segment).ok())
            .ok_or_else(|| DomainError::InvalidLocator(locator.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_locator_with_trailing_slash() {
        let id = EntityId::from_locator("https://swapi.dev/api/people/1/").unwrap();
        assert_eq!(id.as_str(), "1");
    }

    #[test]
    fn test_from_locator_without_trailing_slash() {
        let id = EntityId::from_locator("https://swapi.dev/api/people/42").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_from_locator_is_stable() {
        let url = "https://swapi.dev/api/people/13/";
        assert_eq!(
            EntityId::from_locator(url).unwrap(),
            EntityId::from_locator(url).unwrap()
        );
    }

    #[test]
    fn test_from_locator_rejects_empty() {
        assert!(matches!(
            EntityId::from_locator("///"),
            Err(DomainError::InvalidLocator(_))
        ));
        assert!(EntityId::from_locator("").is_err());
        assert!(matches!(
            EntityId::from_locator("a/ /"),
            Err(DomainError::InvalidLocator(_))
        ));
    }

    #[test]
    fn test_from_locator_ignores_query() {
        let id = EntityId::from_locator("https://swapi.dev/api/people/4/?format=json").unwrap();
        assert_eq!(id.as_str(), "4");
    }

    #[test]
    fn test_new_rejects_blank() {
        assert!(EntityId::new("").is_err());
        assert!(EntityId::new("  ").is_err());
        assert_eq!(EntityId::new("7").unwrap().to_string(), "7");
    }

    #[test]
    fn test_serde_rejects_empty() {
        let parsed: Result<EntityId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let parsed: EntityId = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(parsed.as_str(), "5");
    }

    #[test]
    fn test_generate_request_id_uniqueness() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
