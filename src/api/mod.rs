mod catalog;

pub use catalog::{CatalogApi, CatalogSession, SessionState};
