//! # Domain Layer
//!
//! Request and result models plus the prompt/reply pipeline.
//! This layer performs no I/O and knows nothing about providers or HTTP.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
