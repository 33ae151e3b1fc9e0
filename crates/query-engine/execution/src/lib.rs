//! Query execution against a PostgreSQL database and shaping of the results.

pub mod database;
pub mod error;
pub mod metrics;
pub mod output;
pub mod result;

pub use database::Database;
pub use error::Error;
pub use output::Output;
pub use result::ResultSet;
