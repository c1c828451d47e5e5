//! URL construction for the auth and catalog endpoints.

use holocron_domain::{DomainError, DomainResult, EntityId};
use url::Url;

/// Parses `base` and makes sure it ends with a slash so relative joins
/// append instead of replacing the last segment.
fn base_url(base: &str) -> DomainResult<Url> {
    let mut url = Url::parse(base).map_err(|e| DomainError::InvalidUrl(format!("{e}: {base}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DomainError::InvalidUrl(format!(
            "URL must start with http:// or https://: {base}"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Appends path segments to `base`, percent-encoding each one.
fn with_segments(base: &Url, segments: &[&str]) -> DomainResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| DomainError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Locations of the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEndpoints {
    base: Url,
}

impl AuthEndpoints {
    /// Builds the endpoints under `base`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] for a malformed or non-HTTP base.
    pub fn new(base: &str) -> DomainResult<Self> {
        Ok(Self {
            base: base_url(base)?,
        })
    }

    /// `POST auth/login`
    ///
    /// # Errors
    ///
    /// Fails only if the base cannot carry a path.
    pub fn login(&self) -> DomainResult<Url> {
        with_segments(&self.base, &["auth", "login"])
    }

    /// `POST auth/refresh`
    ///
    /// # Errors
    ///
    /// Fails only if the base cannot carry a path.
    pub fn refresh(&self) -> DomainResult<Url> {
        with_segments(&self.base, &["auth", "refresh"])
    }

    /// `POST auth/logout`
    ///
    /// # Errors
    ///
    /// Fails only if the base cannot carry a path.
    pub fn logout(&self) -> DomainResult<Url> {
        with_segments(&self.base, &["auth", "logout"])
    }
}

/// Locations of the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    base: Url,
}

impl CatalogEndpoints {
    /// Builds the endpoints under `base`, e.g. `https://swapi.dev/api/`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] for a malformed or non-HTTP base.
    pub fn new(base: &str) -> DomainResult<Self> {
        Ok(Self {
            base: base_url(base)?,
        })
    }

    /// `GET people/?page=N`
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPage`] for page 0.
    pub fn people(&self, page: u32) -> DomainResult<Url> {
        if page == 0 {
            return Err(DomainError::InvalidPage(page));
        }
        let mut url = with_segments(&self.base, &["people", ""])?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        Ok(url)
    }

    /// `GET people/<id>/`
    ///
    /// # Errors
    ///
    /// Fails only if the base cannot carry a path.
    pub fn person(&self, id: &EntityId) -> DomainResult<Url> {
        with_segments(&self.base, &["people", id.as_str(), ""])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_auth_endpoints() {
        let endpoints = AuthEndpoints::new("http://localhost:5173").unwrap();
        assert_eq!(
            endpoints.login().unwrap().as_str(),
            "http://localhost:5173/auth/login"
        );
        assert_eq!(
            endpoints.refresh().unwrap().as_str(),
            "http://localhost:5173/auth/refresh"
        );
        assert_eq!(
            endpoints.logout().unwrap().as_str(),
            "http://localhost:5173/auth/logout"
        );
    }

    #[test]
    fn test_people_url() {
        let endpoints = CatalogEndpoints::new("https://swapi.dev/api/").unwrap();
        assert_eq!(
            endpoints.people(2).unwrap().as_str(),
            "https://swapi.dev/api/people/?page=2"
        );
    }

    #[test]
    fn test_people_url_without_trailing_slash_on_base() {
        let endpoints = CatalogEndpoints::new("https://swapi.dev/api").unwrap();
        assert_eq!(
            endpoints.people(1).unwrap().as_str(),
            "https://swapi.dev/api/people/?page=1"
        );
    }

    #[test]
    fn test_people_rejects_page_zero() {
        let endpoints = CatalogEndpoints::new("https://swapi.dev/api/").unwrap();
        assert_eq!(endpoints.people(0), Err(DomainError::InvalidPage(0)));
    }

    #[test]
    fn test_person_url() {
        let endpoints = CatalogEndpoints::new("https://swapi.dev/api/").unwrap();
        let id = EntityId::new("13").unwrap();
        assert_eq!(
            endpoints.person(&id).unwrap().as_str(),
            "https://swapi.dev/api/people/13/"
        );
    }

    #[test]
    fn test_person_url_encodes_segment() {
        let endpoints = CatalogEndpoints::new("https://swapi.dev/api/").unwrap();
        let id = EntityId::new("a/b").unwrap();
        assert_eq!(
            endpoints.person(&id).unwrap().as_str(),
            "https://swapi.dev/api/people/a%2Fb/"
        );
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(CatalogEndpoints::new("ftp://example.com/").is_err());
        assert!(AuthEndpoints::new("not a url").is_err());
    }
}
