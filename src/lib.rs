//! Core library exports for the catalog service.
//!
//! This crate exposes the domain, persistence, service and HTTP layers of a
//! categories-and-products catalog API.

pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;
