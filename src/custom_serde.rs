//! Serde helpers shared by the crate's data types.

pub mod rational;
