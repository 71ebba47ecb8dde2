//! Gemini `generateContent` client and wire types.

mod client;
pub mod payload;

pub use client::{GeminiClient, EMPTY_NAME};
