//! Ollama generation gateway
//!
//! Sends one non-streaming `POST {base_url}/api/generate` per turn and
//! returns the `response` field of the reply.

use super::presets::PresetCatalog;
use async_trait::async_trait;
use council_application::{GatewayError, GenerationGateway, GenerationOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// [`GenerationGateway`] backed by a local Ollama server
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
    presets: PresetCatalog,
}

impl OllamaGateway {
    /// Create a gateway whose requests give up after `timeout`
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        presets: PresetCatalog,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Unavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            presets,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl GenerationGateway for OllamaGateway {
    async fn generate(
        &self,
        prompt: &str,
        session_id: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: self.presets.resolve(&options.preset).await,
        };
        let url = format!("{}/api/generate", self.base_url);

        debug!(
            "Ollama request for session {}: model {}, preset {}, {} prompt chars",
            session_id,
            model,
            options.preset,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = format!("Ollama API error ({}): {}", status, text);
            return Err(if status.is_server_error() {
                GatewayError::Unavailable(message)
            } else {
                GatewayError::Invalid(message)
            });
        }

        let body = response.text().await.map_err(request_error)?;
        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            GatewayError::Invalid(format!("Failed to parse Ollama response: {}", e))
        })?;

        Ok(parsed.response)
    }
}

fn request_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::Unavailable(format!(
            "Failed to reach Ollama: {}. Make sure Ollama is running.",
            e
        ))
    } else {
        GatewayError::Unavailable(format!("Ollama request failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Serve a single canned HTTP response and hand back the request body
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request_body = read_request_body(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request_body
        });

        (base_url, handle)
    }

    async fn read_request_body(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return String::new();
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = header_end + 4;
            if buf.len() >= body_start + length {
                return String::from_utf8_lossy(&buf[body_start..body_start + length]).to_string();
            }
        }
    }

    fn gateway(base_url: &str, presets: &TempDir) -> OllamaGateway {
        OllamaGateway::new(
            base_url,
            Duration::from_secs(5),
            PresetCatalog::new(presets.path()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_response_field() {
        let presets = TempDir::new().unwrap();
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"model":"deepseek-r1:14b","response":"Once upon a time","done":true}"#,
        )
        .await;

        let text = gateway(&base_url, &presets)
            .generate(
                "Write an opening",
                "s1",
                "deepseek-r1:14b",
                &GenerationOptions::with_preset("creative"),
            )
            .await
            .unwrap();
        assert_eq!(text, "Once upon a time");

        let request: Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(request["model"], "deepseek-r1:14b");
        assert_eq!(request["prompt"], "Write an opening");
        assert_eq!(request["stream"], false);
        assert_eq!(request["options"], PresetCatalog::default_options());
    }

    #[tokio::test]
    async fn test_preset_options_are_sent() {
        let presets = TempDir::new().unwrap();
        std::fs::write(
            presets.path().join("critical.json"),
            r#"{"temperature": 0.2}"#,
        )
        .unwrap();
        let (base_url, server) = serve_once("200 OK", r#"{"response":"ok"}"#).await;

        gateway(&base_url, &presets)
            .generate("p", "s1", "m", &GenerationOptions::with_preset("critical"))
            .await
            .unwrap();

        let request: Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(request["options"]["temperature"], 0.2);
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let presets = TempDir::new().unwrap();
        let (base_url, _server) =
            serve_once("500 Internal Server Error", r#"{"error":"model crashed"}"#).await;

        let error = gateway(&base_url, &presets)
            .generate("p", "s1", "m", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(error, GatewayError::Unavailable(ref m) if m.contains("model crashed")));
    }

    #[tokio::test]
    async fn test_client_error_is_invalid() {
        let presets = TempDir::new().unwrap();
        let (base_url, _server) =
            serve_once("404 Not Found", r#"{"error":"model 'm' not found"}"#).await;

        let error = gateway(&base_url, &presets)
            .generate("p", "s1", "m", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(error, GatewayError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid() {
        let presets = TempDir::new().unwrap();
        let (base_url, _server) = serve_once("200 OK", "not json at all").await;

        let error = gateway(&base_url, &presets)
            .generate("p", "s1", "m", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(error, GatewayError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_refused_connection_is_unavailable() {
        let presets = TempDir::new().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let error = gateway(&base_url, &presets)
            .generate("p", "s1", "m", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(error, GatewayError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let presets = TempDir::new().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let gateway = OllamaGateway::new(
            base_url,
            Duration::from_millis(100),
            PresetCatalog::new(presets.path()),
        )
        .unwrap();
        let error = gateway
            .generate("p", "s1", "m", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(error.is_timeout());
        server.abort();
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let presets = TempDir::new().unwrap();
        let gateway = gateway("http://localhost:11434/", &presets);
        assert_eq!(gateway.base_url(), DEFAULT_BASE_URL);
    }
}
