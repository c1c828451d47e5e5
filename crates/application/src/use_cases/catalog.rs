//! Catalog browsing use cases

use std::sync::Arc;

use futures::future::join_all;
use holocron_domain::{ApiRequest, ApiResponse, EntityId, PeoplePage, Person, StatusCode};
use tracing::{debug, warn};

use crate::endpoints::CatalogEndpoints;
use crate::error::{ApplicationError, ApplicationResult};
use crate::gateway::AuthGateway;
use crate::session::FavouritesStore;

/// Shown when a failed catalog call carries no server message.
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch characters. The API server might be down. Please try again later.";

/// Turns a non-2xx catalog response into the matching error.
fn expect_success(response: ApiResponse, resource: &str) -> ApplicationResult<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }
    let message = response.error_message();
    Err(match response.status {
        StatusCode::UNAUTHORIZED => ApplicationError::Unauthorized {
            message: message.unwrap_or_else(|| "authentication required".to_string()),
        },
        StatusCode::NOT_FOUND => ApplicationError::NotFound(resource.to_string()),
        status => ApplicationError::Http {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string()),
        },
    })
}

/// Fetches one page of the people listing.
pub struct ListPeople {
    gateway: Arc<AuthGateway>,
    endpoints: CatalogEndpoints,
}

impl ListPeople {
    /// Creates a new `ListPeople` use case.
    pub const fn new(gateway: Arc<AuthGateway>, endpoints: CatalogEndpoints) -> Self {
        Self { gateway, endpoints }
    }

    /// Executes the use case for a 1-based page number.
    ///
    /// # Errors
    /// Returns `Domain` for page 0, otherwise any gateway or decoding error.
    pub async fn execute(&self, page: u32) -> ApplicationResult<PeoplePage> {
        let request = ApiRequest::get(self.endpoints.people(page)?);
        let response = self.gateway.send(&request).await?;
        let response = expect_success(response, &format!("people page {page}"))?;
        Ok(response.json()?)
    }
}

/// Fetches a single person by id.
pub struct GetPerson {
    gateway: Arc<AuthGateway>,
    endpoints: CatalogEndpoints,
}

impl GetPerson {
    /// Creates a new `GetPerson` use case.
    pub const fn new(gateway: Arc<AuthGateway>, endpoints: CatalogEndpoints) -> Self {
        Self { gateway, endpoints }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `NotFound` when the catalog answers 404.
    pub async fn execute(&self, id: &EntityId) -> ApplicationResult<Person> {
        let request = ApiRequest::get(self.endpoints.person(id)?);
        let response = self.gateway.send(&request).await?;
        let response = expect_success(response, &format!("person {id}"))?;
        Ok(response.json()?)
    }
}

/// Resolves the favourited ids into full records.
///
/// The catalog has no bulk lookup by id, so this walks the listing: page 1
/// first to learn the page count, then every other page concurrently.
pub struct ListFavouritePeople {
    list_people: ListPeople,
    favourites: FavouritesStore,
}

impl ListFavouritePeople {
    /// Creates a new `ListFavouritePeople` use case.
    pub const fn new(list_people: ListPeople, favourites: FavouritesStore) -> Self {
        Self {
            list_people,
            favourites,
        }
    }

    /// Executes the use case, returning favourites in listing order.
    ///
    /// Pages after the first that fail to load are skipped with a warning.
    ///
    /// # Errors
    /// Returns the error of the first page if it cannot be loaded.
    pub async fn execute(&self) -> ApplicationResult<Vec<Person>> {
        let wanted = self.favourites.snapshot().await;
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let first = self.list_people.execute(1).await?;
        let total = first.total_pages();
        debug!(total_pages = total, favourites = wanted.len(), "resolving favourites");

        let rest = join_all((2..=total).map(|page| self.list_people.execute(page))).await;

        let mut people = first.results;
        for (page, result) in (2..=total).zip(rest) {
            match result {
                Ok(listing) => people.extend(listing.results),
                Err(e) => warn!(page, error = %e, "skipping page while resolving favourites"),
            }
        }

        Ok(people
            .into_iter()
            .filter(|person| person.id().is_ok_and(|id| wanted.contains(&id)))
            .collect())
    }
}
