//! Extraction service adapters.

pub mod gemini;

pub use gemini::GeminiExtractor;
