//! HTTP handler modules for the dealbook API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire
//! the store mutex, delegate to the storage layer's `CompanyStore`, and
//! return JSON responses. No business logic lives in handlers.

pub mod batch;
pub mod companies;
pub mod compare;
pub mod health;
pub mod search;
pub mod statistics;
pub mod transfer;
