//! Application use cases (business logic orchestration).

mod access;
mod auth;
mod catalog;

pub use access::{FavouriteChange, RequireSession, ToggleFavourite};
pub use auth::{LOGIN_FAILED_MESSAGE, Login, Logout};
pub use catalog::{FETCH_FAILED_MESSAGE, GetPerson, ListFavouritePeople, ListPeople};
