//! Response transformation: config loading, partial projection and the
//! generic schema-driven fallback reducer

pub mod config_loader;
pub mod projection;
pub mod schema_reducer;

pub use config_loader::{FileConfigLoader, TransformConfigLoader};
pub use projection::project;
pub use schema_reducer::{OutlineReducer, SchemaReducer};
