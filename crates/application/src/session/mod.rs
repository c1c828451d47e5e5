//! Session state containers.
//!
//! This module provides:
//! - The token store holding the signed-in user and credentials
//! - The favourites store holding favourited entity ids
//!
//! Both are cheap-to-clone handles over shared state, created empty at
//! session start and reset on logout.

mod favourites;
mod token_store;

pub use favourites::FavouritesStore;
pub use token_store::TokenStore;
