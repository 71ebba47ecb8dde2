//! Prompt templates and the structured-output schema.

use crate::gemini::payload::{Schema, SchemaType};

const FORMAT_INSTRUCTIONS: &str = "Return a JSON object with 'gender' (male/female/non-binary/unknown), 'confidence' (0-1), and a short 'reasoning'.";

/// Instruction sent alongside the image part.
pub const IMAGE_PROMPT: &str = "Analyze this person and guess their gender identity. Return a JSON object with 'gender' (male/female/non-binary/unknown), 'confidence' (0-1), and a short 'reasoning'.";

/// Prompt for name-based inference. The name is embedded as given.
pub fn text_prompt(name: &str) -> String {
    format!("Based on the name \"{name}\", guess the likely gender. {FORMAT_INSTRUCTIONS}")
}

/// Object schema with the three required result fields.
pub fn response_schema() -> Schema {
    Schema::object()
        .property("gender", Schema::of(SchemaType::String))
        .property("confidence", Schema::of(SchemaType::Number))
        .property("reasoning", Schema::of(SchemaType::String))
        .require(["gender", "confidence", "reasoning"])
}
