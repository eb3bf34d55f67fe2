//! Final response synthesis seam

pub mod synthesizer;

pub use synthesizer::{SummarySynthesizer, Synthesizer};
