//! Resolved API schema handle

mod entity;

pub use entity::{OperationSpec, ParameterLocation, ParameterSpec, ResolvedSchema};
