//! HTTP layer for redirect creation and resolution.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to the API contract.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route tables for each redirect mode

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
