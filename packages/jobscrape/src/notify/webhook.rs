use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use super::Notifier;
use crate::error::NotifyError;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    subject: &'a str,
    message: &'a str,
}

/// Delivers notifications as JSON POSTs.
///
/// Any relay that accepts `{"subject": ..., "message": ...}` works: a chat
/// incoming webhook behind a small adapter, a mail gateway, a topic bridge.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { subject, message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(subject = %subject, url = %self.url, "Notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{local_client, response, serve};

    #[tokio::test]
    async fn test_publish_posts_json() {
        let (base, mut requests) = serve(vec![response("200 OK", &[], "")]).await;
        let notifier = WebhookNotifier::new(format!("{}/hook", base))
            .unwrap()
            .with_client(local_client());

        notifier.publish("New jobs", "Acme").await.unwrap();

        let request = requests.recv().await.unwrap();
        assert!(request.starts_with("POST /hook "));
        assert!(request.ends_with(r#"{"subject":"New jobs","message":"Acme"}"#));
    }

    #[tokio::test]
    async fn test_error_status_is_rejected() {
        let (base, _requests) =
            serve(vec![response("500 Internal Server Error", &[], "relay down")]).await;
        let notifier = WebhookNotifier::new(format!("{}/hook", base))
            .unwrap()
            .with_client(local_client());

        let err = notifier.publish("New jobs", "Acme").await.unwrap_err();

        match err {
            NotifyError::Rejected { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "relay down");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_shape() {
        let payload = WebhookPayload {
            subject: "New jobs",
            message: "\nAcme (https://acme.test):\n",
        };
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["subject"], "New jobs");
        assert_eq!(json["message"], "\nAcme (https://acme.test):\n");
    }

    #[test]
    fn test_new_keeps_url() {
        let notifier = WebhookNotifier::new("https://hooks.test/jobs").unwrap();
        assert_eq!(notifier.url(), "https://hooks.test/jobs");
    }
}
