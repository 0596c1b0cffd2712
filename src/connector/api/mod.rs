pub mod container;
pub mod controller;
pub mod http;
pub mod router;

pub use container::{Container, ContainerConfig, ProviderKind, DEFAULT_TEMPERATURE};
pub use router::Router;
