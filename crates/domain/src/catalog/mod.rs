//! Catalog records and listing pages

mod page;
mod person;

pub use page::{PAGE_SIZE, PeoplePage, portrait_seed, total_pages};
pub use person::Person;
