//! Reply generation orchestrator.
//!
//! One call runs the whole pipeline in order: validate input, assemble the
//! ticket conversation, render the prompt, call the backend once, then
//! sanitize. Errors propagate unchanged until [`ReplyGenerator::handle`],
//! which converts them into the operator-facing failure shape.

use std::sync::Arc;

use reply_core::{
    AddonConfig, ContextAssembler, GenerationRequest, GenerationResult, LanguageCode, ReplyError,
    Result, TicketStore, Tone,
};
use reply_llm::ReplyBackend;
use serde::Serialize;

use crate::prompt::PromptBuilder;
use crate::sanitize::extract_and_clean;

const FAILURE_PREFIX: &str = "Failed to generate AI reply: ";

/// Per-call generation parameters drawn from addon settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub language: LanguageCode,
    pub max_output_tokens: u32,
    pub model: String,
    pub max_instructions_chars: usize,
    pub max_context_chars: usize,
}

impl GenerationSettings {
    pub fn from_config(config: &AddonConfig) -> Self {
        Self {
            language: config.response_language.clone(),
            max_output_tokens: config.max_output_tokens,
            model: config.model().to_string(),
            max_instructions_chars: config.max_instructions_chars,
            max_context_chars: config.max_context_chars,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from_config(&AddonConfig::default())
    }
}

/// Boundary result, serialized as `{success, reply, tone}` or
/// `{success, message}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyOutcome {
    Success {
        success: bool,
        reply: String,
        tone: Tone,
    },
    Failure {
        success: bool,
        message: String,
        #[serde(skip)]
        error: ReplyError,
    },
}

impl ReplyOutcome {
    pub fn from_result(result: Result<GenerationResult>) -> Self {
        match result {
            Ok(generated) => ReplyOutcome::Success {
                success: true,
                reply: generated.reply_text,
                tone: generated.tone,
            },
            Err(error) => ReplyOutcome::Failure {
                success: false,
                message: format!("{}{}", FAILURE_PREFIX, error.operator_message()),
                error,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReplyOutcome::Success { .. })
    }

    pub fn error(&self) -> Option<&ReplyError> {
        match self {
            ReplyOutcome::Success { .. } => None,
            ReplyOutcome::Failure { error, .. } => Some(error),
        }
    }
}

pub struct ReplyGenerator {
    store: Arc<dyn TicketStore>,
    backend: Arc<dyn ReplyBackend>,
    settings: GenerationSettings,
}

impl ReplyGenerator {
    pub fn new(
        store: Arc<dyn TicketStore>,
        backend: Arc<dyn ReplyBackend>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            store,
            backend,
            settings,
        }
    }

    /// Runs the pipeline and returns the cleaned reply or the first error.
    pub async fn generate(
        &self,
        ticket_id: u64,
        admin_instructions: &str,
        extra_context: &str,
        tone: Tone,
    ) -> Result<GenerationResult> {
        self.validate(ticket_id, admin_instructions, extra_context)?;

        log::info!(
            "[ticket #{}] Generating reply (backend: {}, model: {}, tone: {})",
            ticket_id,
            self.backend.name(),
            self.settings.model,
            tone
        );

        let context = ContextAssembler::new(self.store.as_ref())
            .assemble(ticket_id)
            .await?;
        log::debug!(
            "[ticket #{}] Assembled conversation with {} messages",
            ticket_id,
            context.messages.len()
        );

        let request = GenerationRequest::new(admin_instructions, extra_context, tone)
            .with_language(self.settings.language.clone())
            .with_max_output_tokens(self.settings.max_output_tokens)
            .with_model(self.settings.model.clone());

        let prompt = PromptBuilder::build(&context, &request);
        log::info!(
            "[ticket #{}] Sending prompt ({} chars, language: {})",
            ticket_id,
            prompt.chars().count(),
            request.language.as_str()
        );

        let response = self.backend.generate(&prompt, &request).await?;
        log::info!(
            "[ticket #{}] Response received (finish reason: {})",
            ticket_id,
            response.finish_reason().unwrap_or("unknown")
        );

        let reply = extract_and_clean(&response)?;
        if reply.truncated {
            log::warn!("[ticket #{}] Reply hit the output token limit", ticket_id);
        }
        log::info!(
            "[ticket #{}] Reply ready ({} chars cleaned from {})",
            ticket_id,
            reply.text.chars().count(),
            reply.raw_length
        );

        Ok(GenerationResult {
            reply_text: reply.text,
            tone: request.tone,
            truncated: reply.truncated,
        })
    }

    /// Boundary entry point: never fails, logs the error it converts.
    pub async fn handle(
        &self,
        ticket_id: u64,
        admin_instructions: &str,
        extra_context: &str,
        tone: Tone,
    ) -> ReplyOutcome {
        let result = self
            .generate(ticket_id, admin_instructions, extra_context, tone)
            .await;
        if let Err(e) = &result {
            log::error!("[ticket #{}] {}: {}", ticket_id, e.kind(), e);
        }
        ReplyOutcome::from_result(result)
    }

    fn validate(&self, ticket_id: u64, admin_instructions: &str, extra_context: &str) -> Result<()> {
        if ticket_id == 0 {
            return Err(ReplyError::InvalidRequest("Invalid ticket ID".to_string()));
        }
        check_length(
            "Admin instructions",
            admin_instructions,
            self.settings.max_instructions_chars,
        )?;
        check_length("Additional context", extra_context, self.settings.max_context_chars)
    }
}

fn check_length(field: &str, value: &str, limit: usize) -> Result<()> {
    let length = value.trim().chars().count();
    if length > limit {
        return Err(ReplyError::InvalidRequest(format!(
            "{} must be at most {} characters (got {})",
            field, limit, length
        )));
    }
    Ok(())
}
