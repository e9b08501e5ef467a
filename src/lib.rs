pub mod config;
pub mod error;
pub mod link;
pub mod logging;
pub mod mcp;
pub mod thread;
pub mod twitter;

pub use config::Config;
pub use error::Error;
