//! TypeScript API client synthesis from OpenAPI operation descriptors.
//!
//! The pipeline runs leaves first:
//! - `type_node`: schema -> TypeScript type
//! - `reference`, `template`: identifier chains, object literals, URL templates
//! - `parameters`: path/query/header routing
//! - `method`: signature decisions and the fixed body statement order
//! - `declarations`, `client`: per-operation declarations and the client module

pub mod ast;
pub mod client;
pub mod config;
pub mod declarations;
pub mod descriptor;
pub mod error;
pub mod method;
pub mod parameters;
pub mod reference;
pub mod template;
pub mod type_node;

pub use client::{ClientOutput, OperationFailure, generate_client};
pub use config::GeneratorConfig;
pub use declarations::generate_interface;
pub use descriptor::{DescriptorDocument, OperationDescriptor};
pub use error::{ConfigError, InvariantViolation, LoadError, Result, SynthesisError};
pub use method::{MethodOptions, synthesize_method};
