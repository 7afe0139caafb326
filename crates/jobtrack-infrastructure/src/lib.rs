pub mod config_service;
pub mod http_api_client;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::http_api_client::HttpApiClient;
pub use crate::paths::JobtrackPaths;
