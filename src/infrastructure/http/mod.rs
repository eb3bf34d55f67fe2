//! HTTP invoker seam and reqwest implementation

pub mod invoker;

pub use invoker::{ApiInvoker, ApiResponse, HttpApiInvoker};
