use crate::error::RulesError;
use crate::rules::prompts::{
    clarifying_questions_prompt, cursorrules_prompt, rag_livekit_prompt, Clarification,
};
use crate::rules::{CompletionParams, TextGenerator};
use tracing::info;

/// Model for the clarifying questions and the general rules.
pub const GENERAL_MODEL: &str = "gpt-4.1";
/// Model for the LiveKit-specialised rules.
pub const RAG_MODEL: &str = "gpt-4o";

const QUESTIONS_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 500,
    temperature: 0.8,
    default_model: GENERAL_MODEL,
};
const RULES_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 2000,
    temperature: 0.7,
    default_model: GENERAL_MODEL,
};
const RAG_RULES_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 2500,
    temperature: 0.7,
    default_model: RAG_MODEL,
};

/// Generates `.cursorrules` text through a [`TextGenerator`].
pub struct RulesGenerator<G> {
    generator: G,
}

impl<G: TextGenerator> RulesGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Asks for 2-4 clarifying questions about `query`, one per returned entry.
    pub async fn clarifying_questions(&self, query: &str) -> Result<Vec<String>, RulesError> {
        let text = self
            .generator
            .complete(&clarifying_questions_prompt(query), QUESTIONS_PARAMS)
            .await?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub async fn generate_cursorrules(
        &self,
        query: &str,
        clarifications: &[Clarification],
    ) -> Result<String, RulesError> {
        let rules = self
            .generator
            .complete(&cursorrules_prompt(query, clarifications), RULES_PARAMS)
            .await?;
        info!(chars = rules.len(), "generated .cursorrules");
        Ok(rules)
    }

    pub async fn generate_rag_livekit_rules(
        &self,
        description: &str,
        additional_context: &str,
    ) -> Result<String, RulesError> {
        let rules = self
            .generator
            .complete(
                &rag_livekit_prompt(description, additional_context),
                RAG_RULES_PARAMS,
            )
            .await?;
        info!(chars = rules.len(), "generated RAG + LiveKit .cursorrules");
        Ok(rules)
    }
}

/// Pairs each question with the answer at the same position; missing answers are blank.
pub fn pair_answers(questions: &[String], answers: &[String]) -> Vec<Clarification> {
    questions
        .iter()
        .enumerate()
        .map(|(i, question)| Clarification {
            question: question.clone(),
            answer: answers.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}
