//! HTTP/JSON API server for the dealbook company record store.
//!
//! Provides the REST API the dashboard consumes: record CRUD, search,
//! statistics, batch mutations, export/import, the comparison selection,
//! and a health probe. This crate contains the server framework, API schema
//! types, error handling, and route definitions.

pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
