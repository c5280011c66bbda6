//! Profiler — rates a writing sample against the trait schema.
//!
//! One model call per sample, no chunking and no retry. The reply is free text;
//! the profile is the first JSON object found in it.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::llm_client::prompts::JSON_RESULT_INSTRUCTION;
use crate::llm_client::{ChatMessage, ChatModel, ChatRequest, LlmError};
use crate::profiling::extract::{extract_json_object, ExtractionError};
use crate::profiling::profile::TraitProfile;
use crate::profiling::prompts::ANALYSIS_PROMPT_TEMPLATE;
use crate::profiling::schema::render_template;

pub const ANALYSIS_TEMPERATURE: f32 = 1.0;

/// Why `analyze` produced no profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("transport failure: {0}")]
    Transport(#[from] LlmError),

    #[error("extraction failure: {0}")]
    Extraction(#[from] ExtractionError),
}

#[derive(Clone)]
pub struct Profiler {
    llm: Arc<dyn ChatModel>,
}

pub fn build_analysis_prompt(writing_sample: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{json_instruction}", JSON_RESULT_INSTRUCTION)
        .replace("{trait_template}", &render_template())
        .replace("{writing_sample}", writing_sample)
}

impl Profiler {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self { llm }
    }

    /// Sends the sample to the model and extracts a `TraitProfile` from the reply.
    ///
    /// Every failure is logged here before it is returned; callers only need to
    /// branch on the variant.
    pub async fn analyze(&self, writing_sample: &str) -> Result<TraitProfile, ProfileError> {
        let request = ChatRequest {
            messages: vec![ChatMessage::user(build_analysis_prompt(writing_sample))],
            temperature: ANALYSIS_TEMPERATURE,
            max_completion_tokens: None,
        };

        let reply = self.llm.complete(request).await.map_err(|e| {
            error!("Error with LLM API: {e}");
            ProfileError::Transport(e)
        })?;

        let reply = reply.trim();
        debug!("Assistant message: {reply}");

        let object = extract_json_object(reply).map_err(|e| {
            error!("Profile extraction failed: {e}");
            ProfileError::Extraction(e)
        })?;

        let profile = TraitProfile::from(object);
        let report = profile.validate();
        if !report.is_clean() {
            warn!(
                "Profile differs from schema: {} missing, {} mismatched, {} unknown",
                report.missing.len(),
                report.mismatched.len(),
                report.unknown.len()
            );
        }
        info!(
            "Extracted profile for '{}' with {} traits",
            profile.text("name").unwrap_or("unnamed"),
            profile.as_map().len()
        );

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use crate::llm_client::testing::FakeModel;
    use crate::profiling::schema::TRAIT_SCHEMA;

    use super::*;

    fn profiler(model: FakeModel) -> (Profiler, Arc<FakeModel>) {
        let model = Arc::new(model);
        (Profiler::new(model.clone()), model)
    }

    #[test]
    fn test_prompt_embeds_template_and_sample_verbatim() {
        let sample = "It was a dark and stormy night; the rain fell in torrents.";
        let prompt = build_analysis_prompt(sample);
        assert!(prompt.starts_with("Please analyze the writing style"));
        assert!(prompt.contains(JSON_RESULT_INSTRUCTION));
        for spec in TRAIT_SCHEMA {
            assert!(
                prompt.contains(&format!("\"{}\":", spec.name)),
                "missing trait {}",
                spec.name
            );
        }
        assert!(prompt.ends_with(&format!("Writing Sample:\n{sample}")));
    }

    #[test]
    fn test_prompt_does_not_expand_placeholders_inside_sample() {
        let prompt = build_analysis_prompt("my draft says {trait_template} literally");
        assert!(prompt.ends_with("my draft says {trait_template} literally"));
    }

    #[tokio::test]
    async fn test_analyze_returns_embedded_object() {
        let (profiler, model) = profiler(FakeModel::replying(
            r#"Sure, here you go: {"name": "Test", "vocabulary_complexity": 5} Enjoy."#,
        ));

        let profile = profiler.analyze("sample text").await.unwrap();
        assert_eq!(profile.text("name"), Some("Test"));
        assert_eq!(profile.scale("vocabulary_complexity"), Some(5));

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, ANALYSIS_TEMPERATURE);
        assert_eq!(requests[0].max_completion_tokens, None);
        assert_eq!(requests[0].messages[0].role, "user");
    }

    #[tokio::test]
    async fn test_analyze_reads_object_from_fenced_reply() {
        let (profiler, _) = profiler(FakeModel::replying(
            "Here is the analysis:\n```json\n{\"tone\": \"wry\", \"extraversion\": 3}\n```\nLet me know.",
        ));
        let profile = profiler.analyze("sample").await.unwrap();
        assert_eq!(profile.text("tone"), Some("wry"));
        assert_eq!(profile.scale("extraversion"), Some(3));
    }

    #[tokio::test]
    async fn test_analyze_without_braces_is_extraction_failure() {
        let (profiler, _) = profiler(FakeModel::replying("I cannot rate this text."));
        let err = profiler.analyze("sample").await.unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Extraction(ExtractionError::NoJsonObject)
        ));
    }

    #[tokio::test]
    async fn test_analyze_invalid_json_is_extraction_failure() {
        let (profiler, _) = profiler(FakeModel::replying("{not valid json}"));
        let err = profiler.analyze("sample").await.unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Extraction(ExtractionError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_transport_failure_is_reported() {
        let (profiler, _) = profiler(FakeModel::failing(500));
        let err = profiler.analyze("sample").await.unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Transport(LlmError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_analyze_returns_profile_even_when_schema_differs() {
        let (profiler, _) = profiler(FakeModel::replying(r#"{"formality_level": 99}"#));
        let profile = profiler.analyze("sample").await.unwrap();
        assert_eq!(profile.scale("formality_level"), Some(99));
        assert!(!profile.validate().is_clean());
    }
}
