//! Functions shared by the tests that need a database.

pub mod database;
pub mod deployment;
pub mod fixtures;
