//! axum HTTP surface: `/api/v1/tasks/*` plus the OpenAPI document.

mod error;
mod handlers;
mod openapi;
mod routes;
mod types;

pub use error::ApiError;
pub use handlers::HEALTH_MESSAGE;
pub use openapi::openapi_document;
pub use routes::{app, serve, AppState, GENERATE_PATH, HEALTH_PATH, OPENAPI_PATH};
pub use types::{ErrorResponse, TaskGenerationRequest};
