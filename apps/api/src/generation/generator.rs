//! Content generation — writes new text in a persona's voice.
//!
//! Flow: render persona groups → append title instruction → append topic →
//!       one model call → trimmed text.
//!
//! The prompt asks for a title but the reply is returned whole; splitting a
//! title from the body is left to the caller.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::generation::persona::{Persona, FIELD_GROUPS};
use crate::generation::prompts::{PERSONA_CLOSING, PERSONA_PREAMBLE, TOPIC_PREFIX};
use crate::llm_client::prompts::TITLE_INSTRUCTION;
use crate::llm_client::{ChatMessage, ChatModel, ChatRequest, LlmError};

pub const GENERATION_TEMPERATURE: f32 = 1.0;
pub const MAX_COMPLETION_TOKENS: u32 = 5000;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("transport failure: {0}")]
    Transport(#[from] LlmError),
}

#[derive(Clone)]
pub struct Generator {
    llm: Arc<dyn ChatModel>,
}

/// Renders the persona as the system-prompt block.
pub fn render_system_prompt(persona: &Persona) -> String {
    let mut sections = vec![PERSONA_PREAMBLE.to_string()];
    for group in FIELD_GROUPS {
        let lines: Vec<String> = group
            .fields
            .iter()
            .map(|name| persona.render_field(name))
            .collect();
        sections.push(format!("{}:\n{}", group.label, lines.join("\n")));
    }
    sections.push(format!("{PERSONA_CLOSING} {TITLE_INSTRUCTION}"));
    sections.join("\n\n")
}

/// System prompt plus the topic line, as sent to the model.
pub fn build_generation_prompt(persona: &Persona, topic: &str) -> String {
    format!(
        "{}\n\n{TOPIC_PREFIX}{}",
        render_system_prompt(persona),
        topic.trim()
    )
}

impl Generator {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self { llm }
    }

    /// Generates text about `topic` in the persona's voice.
    pub async fn generate(&self, persona: &Persona, topic: &str) -> Result<String, GenerateError> {
        let missing = persona.missing_fields();
        if !missing.is_empty() {
            warn!(
                "Persona is missing {} prompt fields, rendering placeholders: {}",
                missing.len(),
                missing.join(", ")
            );
        }

        let request = ChatRequest {
            messages: vec![ChatMessage::user(build_generation_prompt(persona, topic))],
            temperature: GENERATION_TEMPERATURE,
            max_completion_tokens: Some(MAX_COMPLETION_TOKENS),
        };

        let content = self
            .llm
            .complete(request)
            .await
            .and_then(|reply| {
                let trimmed = reply.trim();
                if trimmed.is_empty() {
                    Err(LlmError::EmptyContent)
                } else {
                    Ok(trimmed.to_string())
                }
            })
            .map_err(|e| {
                error!("Error generating content: {e}");
                GenerateError::Transport(e)
            })?;

        info!("Generated {} characters of content", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::llm_client::testing::FakeModel;

    use super::*;

    fn persona() -> Persona {
        serde_json::from_value(json!({
            "vocabulary_complexity": 7,
            "sentence_structure": "varied",
            "paragraph_organization": "structured",
            "tone": "conversational",
            "punctuation_style": "minimal",
            "pronoun_preference": "first-person",
            "formality_level": 3,
            "idiom_usage": 6,
            "metaphor_frequency": 4,
            "simile_frequency": 2,
            "technical_jargon_usage": 8,
            "humor_sarcasm_usage": 5,
            "openness_to_experience": 9,
            "conscientiousness": 7,
            "extraversion": 4,
            "agreeableness": 6,
            "emotional_stability": 8,
            "dominant_motivations": "knowledge",
            "core_values": "curiosity",
            "decision_making_style": "analytical"
        }))
        .unwrap()
    }

    #[test]
    fn test_system_prompt_layout() {
        let prompt = render_system_prompt(&persona());
        let expected_head = "You are a writer with the following characteristics:\n\n\
            Writing Style:\n\
            vocabulary_complexity: 7/10\n\
            sentence_structure: varied\n";
        assert!(prompt.starts_with(expected_head), "got:\n{prompt}");
        assert!(prompt.contains("\n\nLanguage Patterns:\nidiom_usage: 6/10\n"));
        assert!(prompt.contains("\n\nPersonality:\nopenness_to_experience: 9/10\n"));
        assert!(prompt.contains("decision_making_style: analytical\n\n"));
        assert!(prompt.ends_with(
            "Write in a way that naturally reflects these characteristics. \
             The response should include a title."
        ));
    }

    #[test]
    fn test_generation_prompt_ends_with_topic() {
        let prompt = build_generation_prompt(&persona(), "  rust for beginners \n");
        assert!(prompt.ends_with("include a title.\n\nWrite about: rust for beginners"));
    }

    #[test]
    fn test_missing_tone_renders_placeholder() {
        let mut persona = persona();
        persona.tone = None;
        let prompt = render_system_prompt(&persona);
        assert!(prompt.contains("\ntone: unspecified\n"));
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_text() {
        let model = Arc::new(FakeModel::replying("\n  # A Title\n\nBody text.  \n"));
        let generator = Generator::new(model.clone());

        let content = generator.generate(&persona(), "autumn").await.unwrap();
        assert_eq!(content, "# A Title\n\nBody text.");

        assert!(model.last_prompt().ends_with("Write about: autumn"));
        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, GENERATION_TEMPERATURE);
        assert_eq!(requests[0].max_completion_tokens, Some(MAX_COMPLETION_TOKENS));
    }

    #[tokio::test]
    async fn test_generate_without_tone_still_calls_model() {
        let model = Arc::new(FakeModel::replying("Title\n\nText"));
        let generator = Generator::new(model.clone());
        let mut persona = persona();
        persona.tone = None;

        let content = generator.generate(&persona, "the sea").await.unwrap();
        assert_eq!(content, "Title\n\nText");
        assert!(model.last_prompt().contains("tone: unspecified"));
    }

    #[tokio::test]
    async fn test_generate_with_empty_persona_still_calls_model() {
        let model = Arc::new(FakeModel::replying("Title\n\nText"));
        let generator = Generator::new(model.clone());

        let content = generator.generate(&Persona::default(), "x").await;
        assert!(content.is_ok());
    }

    #[tokio::test]
    async fn test_generate_transport_failure() {
        let generator = Generator::new(Arc::new(FakeModel::failing(429)));
        let err = generator.generate(&persona(), "autumn").await.unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Transport(LlmError::Api { status: 429, .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_blank_reply_is_empty_content() {
        let generator = Generator::new(Arc::new(FakeModel::replying("   \n ")));
        let err = generator.generate(&persona(), "autumn").await.unwrap_err();
        assert!(matches!(err, GenerateError::Transport(LlmError::EmptyContent)));
    }
}
