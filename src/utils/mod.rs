//! Utility modules for environment access, logging and graceful degradation

pub mod env;
pub mod error;
pub mod logging;

// Re-export commonly used items
pub use env::{env_opt, split_search_path};
pub use error::{result_to_option, with_fallback};
pub use logging::{init_logging, init_logging_from_config};
#[cfg(feature = "json-logging")]
pub use logging::init_json_logging;
