//! Character record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::id::EntityId;

const UNKNOWN: &str = "unknown";

/// A character as returned by `GET people/` and `GET people/<id>/`.
///
/// Numeric measurements arrive as strings and may be `"unknown"`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: String,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    pub created: String,
    pub edited: String,
    /// Canonical locator, the source of [`Person::id`].
    pub url: String,
}

impl Person {
    /// Identifier derived from the canonical locator.
    ///
    /// # Errors
    ///
    /// Fails only for a malformed locator with no path segment.
    pub fn id(&self) -> DomainResult<EntityId> {
        EntityId::from_locator(&self.url)
    }

    /// Height in meters, e.g. `1.72 meters`.
    #[must_use]
    pub fn height_display(&self) -> String {
        if self.height == UNKNOWN {
            return "Unknown".to_string();
        }
        self.height.trim().parse::<u32>().map_or_else(
            |_| "Unknown".to_string(),
            |cm| format!("{}.{:02} meters", cm / 100, cm % 100),
        )
    }

    /// Mass with unit, e.g. `77 kg`.
    #[must_use]
    pub fn mass_display(&self) -> String {
        if self.mass == UNKNOWN {
            "Unknown".to_string()
        } else {
            format!("{} kg", self.mass)
        }
    }

    /// Creation date as `DD-MM-YYYY` in UTC, or the raw value if it does not parse.
    #[must_use]
    pub fn created_display(&self) -> String {
        DateTime::parse_from_rfc3339(&self.created)
            .map_or_else(
                |_| self.created.clone(),
                |d| d.with_timezone(&Utc).format("%d-%m-%Y").to_string(),
            )
    }

    /// Number of films the character appears in.
    #[must_use]
    pub const fn film_count(&self) -> usize {
        self.films.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    pub(crate) fn person(id: u32, name: &str) -> Person {
        serde_json::from_value(json!({
            "name": name,
            "height": "172",
            "mass": "77",
            "hair_color": "blond",
            "skin_color": "fair",
            "eye_color": "blue",
            "birth_year": "19BBY",
            "gender": "male",
            "homeworld": "https://swapi.dev/api/planets/1/",
            "films": ["https://swapi.dev/api/films/1/", "https://swapi.dev/api/films/2/"],
            "species": [],
            "vehicles": [],
            "starships": [],
            "created": "2014-12-09T13:50:51.644000Z",
            "edited": "2014-12-20T21:17:56.891000Z",
            "url": format!("https://swapi.dev/api/people/{id}/"),
        }))
        .unwrap()
    }

    #[test]
    fn test_id_from_url() {
        assert_eq!(person(1, "Luke Skywalker").id().unwrap().as_str(), "1");
    }

    #[test]
    fn test_height_display() {
        let mut luke = person(1, "Luke Skywalker");
        assert_eq!(luke.height_display(), "1.72 meters");

        luke.height = "96".to_string();
        assert_eq!(luke.height_display(), "0.96 meters");

        luke.height = "unknown".to_string();
        assert_eq!(luke.height_display(), "Unknown");
    }

    #[test]
    fn test_mass_display() {
        let mut luke = person(1, "Luke Skywalker");
        assert_eq!(luke.mass_display(), "77 kg");

        luke.mass = "unknown".to_string();
        assert_eq!(luke.mass_display(), "Unknown");
    }

    #[test]
    fn test_created_display() {
        let mut luke = person(1, "Luke Skywalker");
        assert_eq!(luke.created_display(), "09-12-2014");

        luke.created = "yesterday".to_string();
        assert_eq!(luke.created_display(), "yesterday");
    }

    #[test]
    fn test_film_count() {
        assert_eq!(person(1, "Luke Skywalker").film_count(), 2);
    }
}
