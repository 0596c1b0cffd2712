use schemars::generate::SchemaSettings;
use serde_json::{json, Value};

use super::routes::{GENERATE_PATH, HEALTH_PATH};
use super::types::{ErrorResponse, TaskGenerationRequest};
use crate::domain::GenerationResult;

pub const API_TITLE: &str = "Smart Task Generator API";

/// OpenAPI 3.0 description of the task endpoints. Component schemas are
/// derived from the request/response types so they cannot drift.
pub fn openapi_document() -> Value {
    let mut generator = SchemaSettings::openapi3().into_generator();
    let request_schema = generator.subschema_for::<TaskGenerationRequest>().to_value();
    let result_schema = generator.subschema_for::<GenerationResult>().to_value();
    let error_schema = generator.subschema_for::<ErrorResponse>().to_value();
    let schemas = generator.definitions().clone();

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": API_TITLE,
            "version": env!("CARGO_PKG_VERSION"),
            "description": "API for intelligent task list generation using AI",
            "license": { "name": "MIT License", "url": "https://opensource.org/licenses/MIT" }
        },
        "tags": [
            { "name": "Task Generator", "description": "API for intelligent task generation" }
        ],
        "paths": {
            GENERATE_PATH: {
                "post": {
                    "tags": ["Task Generator"],
                    "summary": "Generate tasks",
                    "description": "Generates a structured task list from an objective",
                    "operationId": "generateTasks",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": request_schema } }
                    },
                    "responses": {
                        "200": {
                            "description": "Generated task list",
                            "content": { "application/json": { "schema": result_schema } }
                        },
                        "400": {
                            "description": "Invalid request",
                            "content": { "application/json": { "schema": error_schema.clone() } }
                        },
                        "502": {
                            "description": "The LLM provider call failed",
                            "content": { "application/json": { "schema": error_schema } }
                        }
                    }
                }
            },
            HEALTH_PATH: {
                "get": {
                    "tags": ["Task Generator"],
                    "summary": "Health check",
                    "description": "Checks if the service is running",
                    "operationId": "healthCheck",
                    "responses": {
                        "200": {
                            "description": "Service is up",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": { "schemas": schemas }
    })
}
