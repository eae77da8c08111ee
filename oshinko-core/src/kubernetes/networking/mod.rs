//! Kubernetes networking clients

pub mod services;

pub use services::ServiceClient;
