//! Wire types for the `generateContent` REST endpoint.
//!
//! Only the fields this service reads are modeled; everything else in the
//! upstream payload is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// Shown to clients when the upstream answer carries no usable text.
pub const NO_CANDIDATE_PLACEHOLDER: &str = "Maafi chahenge, content generate nahi ho paya.";

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one user part.
    pub fn from_instruction(instruction: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: instruction.to_string(),
                }],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, when present and
    /// non-empty. Truncated or blocked answers often arrive with the
    /// structure intact but the text missing.
    pub fn first_text(&self) -> Option<&str> {
        let part = self.candidates.first()?.content.as_ref()?.parts.first()?;
        Some(part.text.as_str()).filter(|text| !text.is_empty())
    }
}
