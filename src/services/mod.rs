pub mod metrics_service;
pub mod registry;
pub mod runtime_version_service;
pub mod system_config;

pub use metrics_service::*;
pub use registry::*;
pub use runtime_version_service::*;
pub use system_config::*;
