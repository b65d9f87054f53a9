//! Core types for transcript classification: requests, results, backend identity, configuration.

pub mod config;
pub mod error;
pub mod model;
pub mod request;

pub use config::{ClassifierConfig, ClassifierConfigBuilder, LocalEndpoint, RemoteEndpoint};
pub use error::ValidationError;
pub use model::{
    BackendInvocation, BackendKind, ClassificationResult, OrchestrationOutcome, Producer,
};
pub use request::{ClassificationRequest, Intent};
