pub mod metrics_handler;
pub mod runtime_handler;
pub mod system_handler;

pub use metrics_handler::*;
pub use runtime_handler::*;
pub use system_handler::*;
