//! Resolution of the parameters used to connect to the statistics database.

pub mod connection;
pub mod environment;
pub mod error;
pub mod file;
pub mod resolve;
pub mod values;

pub use connection::ConnectionParams;
pub use error::ConfigurationError;
pub use file::{parse_configuration_file, ConfigurationFile};
pub use resolve::resolve_connection_params;
pub use values::Secret;
