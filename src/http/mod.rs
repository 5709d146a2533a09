mod handlers;
pub mod messages;
pub mod models;
mod resources;
pub mod routes;

pub use resources::{last_entry_cookie, parse_last_entry, LAST_ENTRY_COOKIE};
