//! Classification layer: backend adapters, response extraction, degraded responses, and the
//! fallback controller that ties them together.

pub mod backend;
pub mod controller;
pub mod degraded;
mod error;
pub mod extract;
pub mod local;
pub mod registry;
pub mod remote;

pub use backend::ClassifierBackend;
pub use controller::FallbackController;
pub use degraded::heuristic_classification;
pub use error::{BackendError, ClassifyError, MalformedResponse};
pub use extract::extract_classification;
pub use local::LocalBackend;
pub use registry::BackendRegistry;
pub use remote::RemoteBackend;
