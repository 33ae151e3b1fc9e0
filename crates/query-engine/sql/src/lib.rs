//! SQL building blocks shared by the query translation crates.

pub mod sql;
