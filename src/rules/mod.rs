//! `.cursorrules` generation.
//!
//! A [`TextGenerator`] turns a two-part prompt (role-setting system text plus
//! the task) into plain text. [`RulesGenerator`] builds the prompts for the
//! clarifying-question exchange and the rules themselves, and [`storage`]
//! writes the result to disk.

pub mod openai_client;
pub mod prompts;
pub mod rules_generator;
pub mod static_rules;
pub mod storage;

pub use openai_client::{OpenAiClient, OpenAiConfig};
pub use prompts::{Clarification, Prompt};
pub use rules_generator::{pair_answers, RulesGenerator};
pub use static_rules::static_rag_livekit_rules;

use crate::error::RulesError;
use async_trait::async_trait;

/// Sampling parameters for one completion.
///
/// `default_model` is used unless the generator was configured with an
/// explicit model override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub default_model: &'static str,
}

/// A remote text completion service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the generated text for `prompt`.
    async fn complete(&self, prompt: &Prompt, params: CompletionParams) -> Result<String, RulesError>;
}
