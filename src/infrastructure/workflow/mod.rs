//! Workflow executor implementation

pub mod executor_impl;

pub use executor_impl::WorkflowExecutorImpl;
