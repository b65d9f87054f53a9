//! HTTP API: `POST /classify` runs the fallback controller, `GET /health` reports configuration.

mod error;
mod handlers;
mod router;
mod server;

pub use error::ApiError;
pub use handlers::{ClassifyResponse, HealthResponse};
pub use router::{AppState, router};
pub use server::serve;
