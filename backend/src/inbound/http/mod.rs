//! HTTP inbound adapter exposing the case management REST endpoints.

pub mod cases;
pub mod error;
pub mod health;
pub mod state;

pub use error::{ApiError, ApiResult};
