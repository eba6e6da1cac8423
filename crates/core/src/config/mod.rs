//! Application configuration
//!
//! Built once at startup from an optional TOML file plus an environment
//! overlay, then passed by reference to whatever needs it.

mod loader;
mod schema;

pub use loader::{find_config_file, Config};
pub use schema::*;
