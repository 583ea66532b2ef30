//! # Feature: Directory Publishing
//!
//! Republishes the bot's registered commands to the Top.gg directory so its
//! listing stays in sync with what users can actually invoke.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true (disabled without `TOPGG_TOKEN`)
//!
//! ## Changelog
//! - 1.1.0: Configurable endpoint and request timeout
//! - 1.0.0: Initial release

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::StatusCode;

use super::converter::convert_all;
use crate::core::PublishError;
use crate::features::sync::{CommandApi, SyncScope};

pub const TOPGG_COMMANDS_URL: &str = "https://top.gg/api/v1/projects/@me/commands";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The directory acknowledged this many commands
    Published(usize),
    /// No directory token configured
    Disabled,
    /// Nothing survived conversion; publishing would wipe the listing
    NothingToPublish,
}

/// Something that can push the bot's commands to the directory
#[async_trait]
pub trait Publish: Send + Sync {
    /// Returns true when the directory acknowledged the update
    async fn publish(&self) -> bool;
}

pub struct DirectoryPublisher {
    api: Arc<dyn CommandApi>,
    http_client: reqwest::Client,
    token: String,
    application_id: u64,
    endpoint: String,
    scope: SyncScope,
    timeout: Option<Duration>,
}

impl DirectoryPublisher {
    pub fn new(api: Arc<dyn CommandApi>, token: String, application_id: u64) -> Self {
        Self::new_with_client(api, token, application_id, reqwest::Client::new())
    }

    pub fn new_with_client(
        api: Arc<dyn CommandApi>,
        token: String,
        application_id: u64,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            api,
            http_client,
            token,
            application_id,
            endpoint: TOPGG_COMMANDS_URL.to_string(),
            scope: SyncScope::Global,
            timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Scope whose commands are published (global unless running against a dev guild)
    pub fn with_scope(mut self, scope: SyncScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn try_publish(&self) -> Result<PublishOutcome, PublishError> {
        if self.token.is_empty() {
            return Ok(PublishOutcome::Disabled);
        }

        let commands = self.api.fetch_commands(self.scope).await?;
        debug!("Fetched {} {} commands for directory publish", commands.len(), self.scope);

        let report = convert_all(&commands, self.application_id);
        if !report.failures.is_empty() {
            warn!(
                "{} command(s) could not be converted and were left out of the directory update",
                report.failures.len()
            );
        }

        if report.converted.is_empty() {
            return Ok(PublishOutcome::NothingToPublish);
        }

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&report.converted);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let res = request.send().await?;
        let status = res.status();

        if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
            Ok(PublishOutcome::Published(report.converted.len()))
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(PublishError::Status { status, body })
        }
    }
}

#[async_trait]
impl Publish for DirectoryPublisher {
    async fn publish(&self) -> bool {
        match self.try_publish().await {
            Ok(PublishOutcome::Published(count)) => {
                info!("✅ Published {count} commands to Top.gg");
                true
            }
            Ok(PublishOutcome::Disabled) => {
                debug!("Top.gg token not set, skipping directory publish");
                false
            }
            Ok(PublishOutcome::NothingToPublish) => {
                warn!("No commands to publish to Top.gg, skipping");
                false
            }
            Err(e) => {
                error!("❌ Failed to publish commands to Top.gg: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlatformError;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct FakeApi {
        commands: Option<Vec<Value>>,
    }

    #[async_trait]
    impl CommandApi for FakeApi {
        async fn fetch_commands(&self, _scope: SyncScope) -> Result<Vec<Value>, PlatformError> {
            self.commands
                .clone()
                .ok_or_else(|| PlatformError::Rejected("503 Service Unavailable".to_string()))
        }

        async fn overwrite_commands(
            &self,
            _scope: SyncScope,
            commands: &[Value],
        ) -> Result<Vec<Value>, PlatformError> {
            Ok(commands.to_vec())
        }

        async fn create_command(
            &self,
            _scope: SyncScope,
            command: &Value,
        ) -> Result<Value, PlatformError> {
            Ok(command.clone())
        }
    }

    /// Minimal HTTP endpoint answering every request with a fixed status
    struct StubDirectory {
        url: String,
        hits: Arc<AtomicUsize>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    async fn stub_directory(status: u16, reason: &'static str, body: &'static str) -> StubDirectory {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/v1/projects/@me/commands", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let (task_hits, task_requests) = (hits.clone(), requests.clone());
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let request = read_request(&mut socket).await;
                task_hits.fetch_add(1, Ordering::SeqCst);
                task_requests.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        StubDirectory {
            url,
            hits,
            requests,
        }
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&data);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    fn registered() -> Vec<Value> {
        vec![
            json!({"id": "1", "application_id": "42", "name": "ping", "type": 1, "description": "Check if the bot is alive"}),
            json!({"id": "2", "application_id": "42", "name": "info", "type": 1}),
        ]
    }

    fn publisher(commands: Option<Vec<Value>>, token: &str, url: &str) -> DirectoryPublisher {
        // Ignore any proxy configured in the environment; the stub lives on loopback
        let http_client = reqwest::Client::builder().no_proxy().build().unwrap();
        DirectoryPublisher::new_with_client(
            Arc::new(FakeApi { commands }),
            token.to_string(),
            42,
            http_client,
        )
        .with_endpoint(url)
        .with_timeout(Some(Duration::from_secs(10)))
    }

    #[tokio::test]
    async fn test_publish_success_on_200() {
        let stub = stub_directory(200, "OK", "{}").await;
        let publisher = publisher(Some(registered()), "secret", &stub.url);

        assert!(publisher.publish().await);
        assert_eq!(stub.hits.load(Ordering::SeqCst), 1);

        let request = stub.requests.lock().unwrap()[0].clone();
        assert!(request.starts_with("POST /api/v1/projects/@me/commands"));
        assert!(request
            .to_lowercase()
            .contains("authorization: bearer secret"));

        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent: Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent.as_array().unwrap().len(), 2);
        assert_eq!(sent[1]["description"], "No description");
        assert_eq!(sent[0]["version"], "1");
    }

    #[tokio::test]
    async fn test_publish_success_on_204() {
        let stub = stub_directory(204, "No Content", "").await;
        let publisher = publisher(Some(registered()), "secret", &stub.url);

        assert_eq!(
            publisher.try_publish().await.unwrap(),
            PublishOutcome::Published(2)
        );
    }

    #[tokio::test]
    async fn test_publish_fails_on_other_status() {
        for (status, reason) in [(201, "Created"), (401, "Unauthorized"), (500, "Internal Server Error")] {
            let stub = stub_directory(status, reason, r#"{"message":"nope"}"#).await;
            let publisher = publisher(Some(registered()), "secret", &stub.url);

            match publisher.try_publish().await {
                Err(PublishError::Status { status: got, body }) => {
                    assert_eq!(got.as_u16(), status);
                    assert!(body.contains("nope"));
                }
                other => panic!("unexpected outcome: {other:?}"),
            }
            assert!(!publisher.publish().await);
            assert_eq!(stub.hits.load(Ordering::SeqCst), 2);
        }
    }

    #[tokio::test]
    async fn test_publish_without_token_makes_no_request() {
        let stub = stub_directory(200, "OK", "{}").await;
        let publisher = publisher(Some(registered()), "", &stub.url);

        assert_eq!(publisher.try_publish().await.unwrap(), PublishOutcome::Disabled);
        assert!(!publisher.publish().await);
        assert_eq!(stub.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_publish_empty_batch_makes_no_request() {
        let stub = stub_directory(200, "OK", "{}").await;

        let empty = publisher(Some(Vec::new()), "secret", &stub.url);
        assert_eq!(
            empty.try_publish().await.unwrap(),
            PublishOutcome::NothingToPublish
        );

        let all_invalid = publisher(Some(vec![json!({"name": "no-id"})]), "secret", &stub.url);
        assert!(!all_invalid.publish().await);

        assert_eq!(stub.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_publish_skips_unconvertible_commands() {
        let stub = stub_directory(200, "OK", "{}").await;
        let mut commands = registered();
        commands.push(json!({"name": "broken"}));
        let publisher = publisher(Some(commands), "secret", &stub.url);

        assert_eq!(
            publisher.try_publish().await.unwrap(),
            PublishOutcome::Published(2)
        );
    }

    #[tokio::test]
    async fn test_publish_fetch_failure_is_false() {
        let stub = stub_directory(200, "OK", "{}").await;
        let publisher = publisher(None, "secret", &stub.url);

        assert!(matches!(
            publisher.try_publish().await,
            Err(PublishError::Platform(_))
        ));
        assert!(!publisher.publish().await);
        assert_eq!(stub.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_publish_network_error_is_false() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/commands", listener.local_addr().unwrap());
        drop(listener);

        let publisher = publisher(Some(registered()), "secret", &url);
        assert!(matches!(
            publisher.try_publish().await,
            Err(PublishError::Reqwest(_))
        ));
        assert!(!publisher.publish().await);
    }

    #[test]
    fn test_default_endpoint() {
        let publisher = DirectoryPublisher::new(
            Arc::new(FakeApi { commands: None }),
            "token".to_string(),
            1,
        );
        assert_eq!(publisher.endpoint(), TOPGG_COMMANDS_URL);
    }
}
