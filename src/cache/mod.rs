//! Local cache of the meme template catalog
//!
//! The catalog is fetched from imgflip once and persisted as a JSON array.
//! Cached data never expires; deleting the file is the only way to refresh it.

mod store;

pub use store::{CatalogError, CatalogStore};
