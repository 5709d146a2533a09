pub mod api;
pub mod documents;
pub mod http;
pub mod logging;
pub mod traits;
pub mod util;
pub mod voting;

mod status;
pub use status::Status;

mod tracing;
pub use crate::tracing::Tracing;
