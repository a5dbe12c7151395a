// ABOUTME: Service configuration module for the translation platform REST API
// ABOUTME: Exports the static resource tables and the typed service lookup

pub mod config;
pub mod error;
pub mod resources;

pub use config::{all_services, ServiceConfig, ServiceDescriptor};
pub use error::{Result, ServiceError};
pub use resources::{
    Endpoint, HttpMethod, MediaType, MountPoint, ResourceGroup, Service, MIDDLE_URL,
};
