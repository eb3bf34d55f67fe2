//! Payload generation seam and default implementation

pub mod generator;

pub use generator::{PayloadGenerator, SchemaPayloadGenerator};
