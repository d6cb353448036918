//! Notification delivery.
//!
//! # Available notifiers
//!
//! - `ConsoleNotifier` - Logs the notification
//! - `WebhookNotifier` - POSTs `{subject, message}` JSON to a URL
//! - `RecordingNotifier` - Captures notifications for tests

mod webhook;

pub use webhook::WebhookNotifier;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::NotifyError;

/// Publishes a subject and plain-text body somewhere a person will see it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError>;
}

/// Logs notifications instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!(subject = %subject, "{}", message);
        Ok(())
    }
}

/// A published notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub message: String,
}

/// Captures notifications for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn subjects(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.subject.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(Notification {
            subject: subject.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
