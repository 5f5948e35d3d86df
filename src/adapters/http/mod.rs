//! HTTP surface for the prioritization engine.
//!
//! JSON in, JSON out. Handlers run scoring inline; failures become
//! `{detail}` bodies with 400, 413, or 500 status codes.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{build_router, HttpServer};
