mod client;
mod session;

pub use client::CatalogApi;
pub use session::{CatalogSession, SessionState};
