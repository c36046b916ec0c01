//! Overlay state machine.
//!
//! Opening any overlay (a page, the discovery intro, a service detail) closes
//! every other one, so at most one indicator is set at a time. Navigating home
//! clears them all and scrolls the base page to the top. Body scrolling is
//! locked exactly while an indicator is set.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::page::Page;
use crate::i18n::{DocumentAttributes, ServiceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavEvent {
    NavigateTo(Page),
    OpenDiscovery,
    CloseDiscovery,
    SelectService(ServiceId),
    CloseServiceDetail,
}

/// Side effect on the host document, emitted by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    ScrollToTop { smooth: bool },
    SetScrollLock(bool),
    SetDocumentAttributes(DocumentAttributes),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    pub active_page: Option<Page>,
    pub is_discovery_open: bool,
    pub selected_service_id: Option<ServiceId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: NavigationState,
    pub effects: Vec<Effect>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_locked(&self) -> bool {
        self.active_page.is_some() || self.is_discovery_open || self.selected_service_id.is_some()
    }

    pub fn is_home(&self) -> bool {
        !self.scroll_locked()
    }

    /// Pure transition: the next state plus the effects it implies.
    pub fn apply(&self, event: NavEvent) -> Transition {
        let mut next = *self;
        let mut effects = Vec::new();

        match event {
            NavEvent::NavigateTo(Page::Home) => {
                next = NavigationState::default();
                effects.push(Effect::ScrollToTop { smooth: true });
            }
            NavEvent::NavigateTo(page) => {
                next = NavigationState {
                    active_page: Some(page),
                    ..NavigationState::default()
                };
            }
            NavEvent::OpenDiscovery => {
                next = NavigationState {
                    is_discovery_open: true,
                    ..NavigationState::default()
                };
            }
            NavEvent::CloseDiscovery => {
                next.is_discovery_open = false;
            }
            NavEvent::SelectService(id) => {
                next = NavigationState {
                    selected_service_id: Some(id),
                    ..NavigationState::default()
                };
            }
            NavEvent::CloseServiceDetail => {
                next.selected_service_id = None;
            }
        }

        if next.scroll_locked() != self.scroll_locked() {
            effects.push(Effect::SetScrollLock(next.scroll_locked()));
        }

        debug!(?event, ?next, "navigation transition");

        Transition {
            state: next,
            effects,
        }
    }

    fn step(&mut self, event: NavEvent) -> Vec<Effect> {
        let transition = self.apply(event);
        *self = transition.state;
        transition.effects
    }

    pub fn navigate_to(&mut self, page: Page) -> Vec<Effect> {
        self.step(NavEvent::NavigateTo(page))
    }

    pub fn open_discovery(&mut self) -> Vec<Effect> {
        self.step(NavEvent::OpenDiscovery)
    }

    pub fn close_discovery(&mut self) -> Vec<Effect> {
        self.step(NavEvent::CloseDiscovery)
    }

    pub fn select_service(&mut self, id: ServiceId) -> Vec<Effect> {
        self.step(NavEvent::SelectService(id))
    }

    pub fn close_service_detail(&mut self) -> Vec<Effect> {
        self.step(NavEvent::CloseServiceDetail)
    }
}
