//! AI chat widget: session state and the generative-language backend

pub mod gemini;
pub mod session;

pub use gemini::GeminiClient;
pub use session::{ChatRole, ChatSession, ChatTurn, PendingRequest};

use async_trait::async_trait;

use crate::error::Result;
use crate::i18n::Language;

/// Fixed instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are the virtual assistant of a construction company \
working on building, civil engineering, roads and utilities, renovation and project management. \
Answer questions about the company's services, safety (HSE) commitments and how to request a quote. \
Keep answers short and courteous. For prices or schedules, invite the visitor to use the contact form.";

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn generate(&self, prompt: &str, language: Language) -> Result<String>;
}

pub fn fallback_reply(language: Language) -> &'static str {
    match language {
        Language::Fr => "Désolé, je ne peux pas répondre pour le moment. Veuillez réessayer plus tard ou nous contacter directement.",
        Language::En => "Sorry, I can't answer right now. Please try again later or contact us directly.",
        Language::Ar => "عذرًا، لا يمكنني الرد حاليًا. يرجى المحاولة لاحقًا أو التواصل معنا مباشرة.",
    }
}

pub fn greeting(language: Language) -> &'static str {
    match language {
        Language::Fr => "Bonjour ! Comment puis-je vous aider avec votre projet ?",
        Language::En => "Hello! How can I help you with your project?",
        Language::Ar => "مرحبًا! كيف يمكنني مساعدتك في مشروعك؟",
    }
}
