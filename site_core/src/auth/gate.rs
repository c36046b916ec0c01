use tracing::{info, warn};

use super::session::SessionAuth;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted,
    /// Wrong password; `attempts` counts failures since the gate was created.
    Denied { attempts: u32 },
}

impl LoginOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, LoginOutcome::Granted)
    }
}

/// Fixed-password gate in front of the admin dashboard.
///
/// This is a UI gate, not access control: the credential is plain text and
/// there is no lockout after repeated failures.
#[derive(Clone)]
pub struct AdminGate {
    session: SessionAuth,
    password: String,
    failed_attempts: u32,
}

impl AdminGate {
    pub fn new(session: SessionAuth, password: impl Into<String>) -> Self {
        Self {
            session,
            password: password.into(),
            failed_attempts: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn login(&mut self, password: &str) -> Result<LoginOutcome> {
        if self.session.is_authenticated() {
            return Ok(LoginOutcome::Granted);
        }

        if password == self.password {
            self.session.mark_authenticated()?;
            self.failed_attempts = 0;
            info!("Admin session authenticated");
            return Ok(LoginOutcome::Granted);
        }

        self.failed_attempts += 1;
        warn!("Admin login rejected (attempt {})", self.failed_attempts);
        Ok(LoginOutcome::Denied {
            attempts: self.failed_attempts,
        })
    }
}
