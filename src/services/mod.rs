pub mod api_client;
pub mod error_classifier;

pub use api_client::ApiClient;
pub use error_classifier::{classify, ApiFailure, Flow};
