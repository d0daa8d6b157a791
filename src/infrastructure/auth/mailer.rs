//! Mailer implementations

use async_trait::async_trait;

use crate::domain::auth::Mailer;
use crate::domain::DomainError;

/// Mailer that logs outgoing mail instead of delivering it
///
/// Real delivery belongs to the hosting environment; this keeps the login
/// flow observable in development and tests.
#[derive(Debug, Default)]
pub struct TracingMailer;

impl TracingMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        tracing::info!(to = %to, subject = %subject, body_len = body.len(), "Sending mail");
        Ok(())
    }
}

/// Test mailer that records every send
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: std::sync::Mutex<Vec<(String, String, String)>>,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All (to, subject, body) triples sent so far
    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}
