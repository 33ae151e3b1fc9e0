//! Translate validated report requests into the SQL statements that produce them.

pub mod translation;
