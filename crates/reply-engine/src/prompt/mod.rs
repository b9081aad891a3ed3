//! Prompt rendering for reply generation.
//!
//! A prompt is a pure function of the conversation context and the
//! generation request. Sections appear in a fixed order: role statement,
//! admin instructions, additional context, guidelines (with the tone and
//! optional language directive), the ticket transcript and the closing
//! instruction. Empty instruction and context blocks are omitted.

mod language;
mod markup;
mod tone;

pub use language::{language_directive, language_display_name, SUPPORTED_LANGUAGES};
pub use markup::strip_markup;
pub use tone::tone_guidance;

use reply_core::{ConversationMessage, GenerationRequest, SenderRole, TicketConversationContext};

const ROLE_STATEMENT: &str = "You are a professional customer support representative for a hosting company. Generate a helpful reply to the following support ticket.";

const FIXED_GUIDELINES: &[&str] = &[
    "Follow the admin instructions above as your primary directive",
    "Address the customer's issue directly",
    "Provide clear, actionable steps when applicable",
    "Use proper markdown formatting for better readability",
    "If technical information is needed that you don't have, acknowledge this and offer to investigate",
    "Do NOT include a signature, name, closing salutation, or sign-off at the end",
    "Do NOT include phrases like 'Sincerely', 'Best regards', '[Your Name]', 'Customer Support', etc.",
    "End the message naturally after addressing the customer's issue",
    "Focus on solving the customer's problem",
    "Use blank lines to separate paragraphs for better readability",
    "Keep paragraphs concise and well-structured",
    "Generate a COMPLETE response, do not truncate or cut off mid-sentence",
];

const CLOSING_INSTRUCTION: &str = "Generate the complete reply message following the admin instructions. IMPORTANT: Do NOT include a subject line, 'Re:', or any email headers. Start directly with the message body. Do not include labels, explanations, or meta-commentary. Use proper paragraph breaks (blank lines) between sections. Ensure the response is complete and not cut off.";

const TRANSCRIPT_RULE_WIDTH: usize = 50;

/// Builds the single text prompt sent to the model.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(context: &TicketConversationContext, request: &GenerationRequest) -> String {
        let mut prompt = String::new();

        prompt.push_str(ROLE_STATEMENT);
        prompt.push_str("\n\n");

        if !request.admin_instructions.is_empty() {
            prompt.push_str("ADMIN INSTRUCTIONS (PRIORITY):\n");
            prompt.push_str(&request.admin_instructions);
            prompt.push_str("\n\n");
        }

        if !request.extra_context.is_empty() {
            prompt.push_str("ADDITIONAL CONTEXT:\n");
            prompt.push_str(&request.extra_context);
            prompt.push_str("\n\n");
        }

        prompt.push_str(&render_guidelines(request));
        prompt.push_str("\n\n");
        prompt.push_str(&render_transcript(context));
        prompt.push_str("\n\n");
        prompt.push_str(CLOSING_INSTRUCTION);

        prompt
    }
}

fn render_guidelines(request: &GenerationRequest) -> String {
    let mut section = String::from("GUIDELINES:");
    section.push_str("\n- ");
    section.push_str(tone_guidance(request.tone));
    for guideline in FIXED_GUIDELINES {
        section.push_str("\n- ");
        section.push_str(guideline);
    }
    if let Some(directive) = language_directive(&request.language) {
        section.push_str("\n- ");
        section.push_str(&directive);
    }
    section
}

/// Ticket header followed by every message in chronological order.
pub fn render_transcript(context: &TicketConversationContext) -> String {
    let mut transcript = format!(
        "Ticket #{}\nSubject: {}\nDepartment: {}\nPriority: {}\n\nConversation:\n{}\n\n",
        context.ticket_id,
        context.subject,
        context.department,
        context.priority,
        "-".repeat(TRANSCRIPT_RULE_WIDTH),
    );
    for message in &context.messages {
        transcript.push_str(&render_message(message));
    }
    transcript
}

fn render_message(message: &ConversationMessage) -> String {
    let speaker = match message.role {
        SenderRole::Client => "Customer",
        SenderRole::Staff => "Support Staff",
    };
    let label = match message.author.as_deref() {
        Some(author) => format!("{speaker} ({author})"),
        None => speaker.to_string(),
    };
    format!(
        "[{}] - {}\n{}\n\n",
        label,
        message.timestamp,
        strip_markup(&message.body)
    )
}
