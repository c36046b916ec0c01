use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::{fallback_reply, greeting, ChatBackend};
use crate::error::Result;
use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// A request accepted by [`ChatSession::begin`], to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub prompt: String,
    pub language: Language,
}

/// Conversation shown by the chat widget. One request in flight at most.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    language: Language,
    turns: Vec<ChatTurn>,
    is_waiting: bool,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>, language: Language) -> Self {
        Self {
            backend,
            language,
            turns: vec![ChatTurn {
                role: ChatRole::Assistant,
                text: greeting(language).to_string(),
            }],
            is_waiting: false,
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_waiting(&self) -> bool {
        self.is_waiting
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Records the user turn and marks the session busy. `None` when the input
    /// is blank or a request is already in flight.
    pub fn begin(&mut self, input: &str) -> Option<PendingRequest> {
        let prompt = input.trim();
        if prompt.is_empty() || self.is_waiting {
            return None;
        }

        self.turns.push(ChatTurn {
            role: ChatRole::User,
            text: prompt.to_string(),
        });
        self.is_waiting = true;

        Some(PendingRequest {
            prompt: prompt.to_string(),
            language: self.language,
        })
    }

    /// Appends the reply, or the fallback text when the request failed.
    pub fn complete(&mut self, outcome: Result<String>) {
        let text = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat request failed, showing fallback: {}", e);
                fallback_reply(self.language).to_string()
            }
        };

        self.turns.push(ChatTurn {
            role: ChatRole::Assistant,
            text,
        });
        self.is_waiting = false;
    }

    /// `begin`, the backend call and `complete` in one step. Returns the
    /// assistant text, or `None` when the input was not accepted.
    pub async fn ask(&mut self, input: &str) -> Option<String> {
        let request = self.begin(input)?;
        info!("Forwarding chat question ({} chars)", request.prompt.len());

        let backend = Arc::clone(&self.backend);
        let outcome = backend.generate(&request.prompt, request.language).await;
        self.complete(outcome);

        self.turns.last().map(|turn| turn.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<(String, Language)>>,
    }

    #[async_trait]
    impl ChatBackend for RecordingBackend {
        async fn generate(&self, prompt: &str, language: Language) -> Result<String> {
            self.calls.lock().push((prompt.to_string(), language));
            Ok(format!("echo: {}", prompt))
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        async fn generate(&self, _prompt: &str, _language: Language) -> Result<String> {
            Err(AppError::Chat("503 Service Unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_ask_appends_both_turns() {
        let backend = Arc::new(RecordingBackend::default());
        let mut session = ChatSession::new(backend.clone(), Language::En);
        assert_eq!(session.turns().len(), 1);

        let reply = session.ask("  Do you build villas?  ").await;
        assert_eq!(reply.as_deref(), Some("echo: Do you build villas?"));
        assert_eq!(session.turns().len(), 3);
        assert_eq!(session.turns()[1].role, ChatRole::User);
        assert_eq!(session.turns()[2].role, ChatRole::Assistant);
        assert!(!session.is_waiting());

        let calls = backend.calls.lock();
        assert_eq!(calls.as_slice(), &[("Do you build villas?".to_string(), Language::En)]);
    }

    #[tokio::test]
    async fn test_failure_becomes_fallback_text() {
        let mut session = ChatSession::new(Arc::new(FailingBackend), Language::Fr);
        let reply = session.ask("Bonjour").await.unwrap();

        assert_eq!(reply, fallback_reply(Language::Fr));
        assert!(!session.is_waiting());
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let backend = Arc::new(RecordingBackend::default());
        let mut session = ChatSession::new(backend.clone(), Language::Ar);

        assert_eq!(session.ask("   ").await, None);
        assert_eq!(session.turns().len(), 1);
        assert!(backend.calls.lock().is_empty());
    }

    #[test]
    fn test_second_request_refused_while_waiting() {
        let mut session = ChatSession::new(Arc::new(FailingBackend), Language::En);

        let pending = session.begin("first").expect("accepted");
        assert!(session.is_waiting());
        assert_eq!(session.begin("second"), None);
        assert_eq!(session.turns().len(), 2);

        session.complete(Ok(format!("answer to {}", pending.prompt)));
        assert!(!session.is_waiting());
        assert!(session.begin("second").is_some());
    }

    #[test]
    fn test_language_hint_follows_session_language() {
        let mut session = ChatSession::new(Arc::new(FailingBackend), Language::En);
        session.set_language(Language::Ar);
        let pending = session.begin("سؤال").unwrap();
        assert_eq!(pending.language, Language::Ar);
    }
}
