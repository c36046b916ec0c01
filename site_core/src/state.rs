//! Single state container for the site: navigation, locale, theme, messages
//! and the admin session. Every change goes through [`SiteStore::dispatch`]
//! and the resulting snapshot is published to subscribers.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::auth::{AdminGate, LoginOutcome, SessionAuth};
use crate::config::AppConfig;
use crate::error::Result;
use crate::i18n::{DocumentAttributes, Language, Theme};
use crate::messages::{Message, MessageService, MessageStore};
use crate::navigation::{Effect, NavEvent, NavigationState};
use crate::storage::KeyValueStorage;
use crate::validation::ContactSubmission;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteState {
    pub navigation: NavigationState,
    pub language: Language,
    pub theme: Theme,
    pub document: DocumentAttributes,
    pub scroll_locked: bool,
    pub messages: Vec<Message>,
    pub unread_count: usize,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(NavEvent),
    SetLanguage(Language),
    ToggleTheme,
    SubmitContact(ContactSubmission),
    DeleteMessage(String),
    MarkRead(String),
    AdminLogin(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Effects(Vec<Effect>),
    Created(Message),
    /// Whether a delete or mark-read changed the collection.
    Changed(bool),
    Login(LoginOutcome),
}

pub struct SiteStore {
    navigation: NavigationState,
    language: Language,
    theme: Theme,
    messages: MessageService,
    gate: AdminGate,
    publisher: watch::Sender<SiteState>,
}

impl SiteStore {
    /// `local` outlives the tab (messages); `session` lives as long as the tab (admin flag).
    pub fn new(
        config: &AppConfig,
        local: Arc<dyn KeyValueStorage>,
        session: Arc<dyn KeyValueStorage>,
    ) -> Self {
        let store = MessageStore::new(local, config.storage.messages_key.clone());
        let messages = MessageService::new(store);
        let session = SessionAuth::new(session, config.storage.session_flag_key.clone());
        Self::from_parts(messages, AdminGate::new(session, config.admin.password.clone()))
    }

    pub fn from_parts(messages: MessageService, gate: AdminGate) -> Self {
        let navigation = NavigationState::default();
        let language = Language::default();
        let initial = snapshot(&navigation, language, Theme::default(), &messages, &gate);
        let (publisher, _) = watch::channel(initial);

        Self {
            navigation,
            language,
            theme: Theme::default(),
            messages,
            gate,
            publisher,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SiteState> {
        self.publisher.subscribe()
    }

    pub fn state(&self) -> SiteState {
        self.publisher.borrow().clone()
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.messages()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Effects the host applies on first render.
    pub fn initial_effects(&self) -> Vec<Effect> {
        vec![
            Effect::SetDocumentAttributes(DocumentAttributes::from(self.language)),
            Effect::SetScrollLock(self.navigation.scroll_locked()),
        ]
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        debug!(?action, "dispatch");

        let outcome = self.reduce(action);

        // A failed save leaves the in-memory change in place, so publish either way.
        self.publish();
        outcome
    }

    fn reduce(&mut self, action: Action) -> Result<Outcome> {
        let outcome = match action {
            Action::Navigate(event) => {
                let transition = self.navigation.apply(event);
                self.navigation = transition.state;
                Outcome::Effects(transition.effects)
            }
            Action::SetLanguage(language) => {
                let mut effects = Vec::new();
                if language != self.language {
                    self.language = language;
                    effects.push(Effect::SetDocumentAttributes(DocumentAttributes::from(language)));
                    info!("Language switched to {}", language);
                }
                Outcome::Effects(effects)
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                Outcome::Effects(Vec::new())
            }
            Action::SubmitContact(submission) => Outcome::Created(self.messages.add(submission)?),
            Action::DeleteMessage(id) => Outcome::Changed(self.messages.delete(&id)?),
            Action::MarkRead(id) => Outcome::Changed(self.messages.mark_read(&id)?),
            Action::AdminLogin(password) => Outcome::Login(self.gate.login(&password)?),
        };
        Ok(outcome)
    }

    fn publish(&self) {
        let next = snapshot(&self.navigation, self.language, self.theme, &self.messages, &self.gate);
        self.publisher.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

fn snapshot(
    navigation: &NavigationState,
    language: Language,
    theme: Theme,
    messages: &MessageService,
    gate: &AdminGate,
) -> SiteState {
    SiteState {
        navigation: *navigation,
        language,
        theme,
        document: DocumentAttributes::from(language),
        scroll_locked: navigation.scroll_locked(),
        messages: messages.messages().to_vec(),
        unread_count: messages.unread_count(),
        is_admin: gate.is_authenticated(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{ServiceId, TextDirection};
    use crate::error::AppError;
    use crate::navigation::Page;
    use crate::storage::MemoryStorage;

    struct FullStorage;

    impl KeyValueStorage for FullStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(AppError::Storage("quota exceeded".to_string()))
        }
    }

    fn store() -> (SiteStore, MemoryStorage, MemoryStorage) {
        let local = MemoryStorage::new();
        let session = MemoryStorage::new();
        let mut config = AppConfig::default();
        config.admin.password = "chantier".to_string();
        let store = SiteStore::new(&config, Arc::new(local.clone()), Arc::new(session.clone()));
        (store, local, session)
    }

    #[test]
    fn test_initial_state() {
        let (store, _, _) = store();
        let state = store.state();
        assert_eq!(state.language, Language::Fr);
        assert_eq!(state.document.dir, TextDirection::Ltr);
        assert!(!state.scroll_locked);
        assert!(!state.is_admin);
        assert_eq!(state.unread_count, 0);
        assert!(store
            .initial_effects()
            .contains(&Effect::SetScrollLock(false)));
    }

    #[test]
    fn test_subscribers_see_new_snapshots() {
        let (mut store, _, _) = store();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store
            .dispatch(Action::Navigate(NavEvent::SelectService(ServiceId::Renovation)))
            .unwrap();
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.navigation.selected_service_id, Some(ServiceId::Renovation));
        assert!(seen.scroll_locked);

        // Closing an already closed overlay changes nothing.
        store.dispatch(Action::Navigate(NavEvent::CloseDiscovery)).unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_language_switch_emits_document_attributes_once() {
        let (mut store, _, _) = store();

        let outcome = store.dispatch(Action::SetLanguage(Language::Ar)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Effects(vec![Effect::SetDocumentAttributes(DocumentAttributes {
                lang: Language::Ar,
                dir: TextDirection::Rtl,
            })])
        );
        assert_eq!(store.state().document.dir, TextDirection::Rtl);

        let again = store.dispatch(Action::SetLanguage(Language::Ar)).unwrap();
        assert_eq!(again, Outcome::Effects(Vec::new()));
    }

    #[test]
    fn test_contact_submission_flows_to_snapshot() {
        let (mut store, local, _) = store();

        let outcome = store
            .dispatch(Action::SubmitContact(ContactSubmission::new(
                "Ali",
                "0612345678",
                "a@b.com",
                "X",
                "hello",
            )))
            .unwrap();
        let created = match outcome {
            Outcome::Created(message) => message,
            other => panic!("unexpected outcome {:?}", other),
        };

        let state = store.state();
        assert_eq!(state.messages[0], created);
        assert_eq!(state.unread_count, 1);
        assert!(local.get("contact_messages").unwrap().unwrap().contains("\"Ali\""));

        store.dispatch(Action::MarkRead(created.id.clone())).unwrap();
        assert_eq!(store.state().unread_count, 0);

        let deleted = store.dispatch(Action::DeleteMessage(created.id)).unwrap();
        assert_eq!(deleted, Outcome::Changed(true));
        assert!(store.state().messages.is_empty());
    }

    #[test]
    fn test_admin_login_updates_flag() {
        let (mut store, _, session) = store();
        store.dispatch(Action::Navigate(NavEvent::NavigateTo(Page::Admin))).unwrap();

        let denied = store.dispatch(Action::AdminLogin("nope".to_string())).unwrap();
        assert_eq!(denied, Outcome::Login(LoginOutcome::Denied { attempts: 1 }));
        assert!(!store.state().is_admin);

        store.dispatch(Action::AdminLogin("chantier".to_string())).unwrap();
        assert!(store.state().is_admin);
        assert_eq!(session.get("admin_authenticated").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_theme_toggle() {
        let (mut store, _, _) = store();
        store.dispatch(Action::ToggleTheme).unwrap();
        assert_eq!(store.state().theme, Theme::Dark);
    }

    #[test]
    fn test_failed_save_still_publishes_in_memory_change() {
        let config = AppConfig::default();
        let mut store = SiteStore::new(&config, Arc::new(FullStorage), Arc::new(MemoryStorage::new()));
        let mut rx = store.subscribe();

        let err = store
            .dispatch(Action::SubmitContact(ContactSubmission::new(
                "Ali",
                "0612345678",
                "a@b.com",
                "X",
                "hello",
            )))
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));

        assert_eq!(store.messages().len(), 1);
        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.messages, store.messages());
        assert_eq!(state.unread_count, 1);

        let id = state.messages[0].id.clone();
        assert!(store.dispatch(Action::MarkRead(id)).is_err());
        assert_eq!(store.state().unread_count, 0);
    }
}
