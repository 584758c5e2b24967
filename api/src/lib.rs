//! LinkProbe API Module
//!
//! HTTP endpoints that expose stored link-validation reports, the
//! cross-locale summary, locale comparison and per-locale insights.

pub mod error;
pub mod handlers;
pub mod models;
pub mod server;

pub use error::ApiError;
pub use handlers::ApiState;
pub use models::*;
pub use server::*;
