pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod list;
pub mod overview;
pub mod routing;
pub mod session;
pub mod storage;

pub use entity_registry::{validate_schema, EntityKind, EntitySchema, FieldSpec, Record};
