//! HTTP/JSON API.
//!
//! Thin axum handlers over the catalog, validator, calculator, suggestion
//! service and session store. Handlers never panic on bad input; every
//! failure is a [`crate::error::ServiceError`] rendered as JSON.

mod controller;
mod request;
mod response;

pub use controller::{ApiError, AppState, SESSION_HEADER, create_router};
pub use request::*;
pub use response::*;
