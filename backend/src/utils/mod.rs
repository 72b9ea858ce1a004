pub mod config;
pub mod logging;

pub use config::{Config, StorageBackend};
pub use logging::init_logging;
