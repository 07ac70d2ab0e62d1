//! Deserialization shapes for request bodies.

pub mod categories;
pub mod products;
