//! Holocron Application - Session state, gateway and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP transport, navigation)
//! - Session state containers (tokens, favourites)
//! - The authenticated request gateway
//! - Use case orchestration
//! - Application-level error handling

pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod session;
pub mod use_cases;

pub use endpoints::{AuthEndpoints, CatalogEndpoints};
pub use error::{ApplicationError, ApplicationResult};
pub use gateway::AuthGateway;
pub use ports::{HttpTransport, Navigator, TransportError, TransportFuture};
pub use session::{FavouritesStore, TokenStore};
pub use use_cases::{
    FETCH_FAILED_MESSAGE, FavouriteChange, GetPerson, LOGIN_FAILED_MESSAGE, ListFavouritePeople,
    ListPeople, Login, Logout, RequireSession, ToggleFavourite,
};
