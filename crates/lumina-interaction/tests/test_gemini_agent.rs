//! GeminiApiAgent against a local one-shot HTTP stub.

use std::sync::Arc;

use lumina_core::catalog::Catalog;
use lumina_core::config::StorefrontConfig;
use lumina_core::session::{
    ConversationSession, GenerationRequest, PromptBuilder, SERVICE_FAILURE_FALLBACK,
    TextGenerator,
};
use lumina_core::storefront::Storefront;
use lumina_core::wishlist::Wishlist;
use lumina_interaction::GeminiApiAgent;
use lumina_infrastructure::{InMemoryKeyValueStore, LuminaPaths};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What the stub saw: request line, headers, and body.
struct Captured {
    head: String,
    body: String,
}

/// Serves exactly one response and returns the captured request.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1beta/models", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body_text = String::from_utf8_lossy(&buf[header_end..]).to_string();

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        Captured {
            head,
            body: body_text,
        }
    });

    (base_url, handle)
}

/// Talks to the stub directly, whatever proxy the environment sets.
fn agent(api_key: &str, base_url: String) -> GeminiApiAgent {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    GeminiApiAgent::new(api_key)
        .with_client(client)
        .with_base_url(base_url)
}

fn request() -> GenerationRequest {
    GenerationRequest {
        model: "gemini-2.5-flash".to_string(),
        user_text: "Something for brunch?".to_string(),
        system_instruction: "You are a stylist.".to_string(),
    }
}

#[tokio::test]
async fn test_generate_posts_request_and_reads_reply() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"The Midnight Silk Wrap Dress."}]}}]}"#,
    )
    .await;

    let agent = agent("test-key", base_url);
    let reply = agent.generate(request()).await.unwrap();
    assert_eq!(reply, "The Midnight Silk Wrap Dress.");

    let captured = server.await.unwrap();
    assert!(captured
        .head
        .starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent HTTP/1.1"));
    assert!(captured.head.to_lowercase().contains("x-goog-api-key: test-key"));

    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Something for brunch?");
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are a stylist.");
}

#[tokio::test]
async fn test_blank_model_uses_default() {
    let (base_url, server) = serve_once("200 OK", r#"{"candidates":[]}"#).await;

    let agent = agent("k", base_url).with_default_model("gemini-2.0-flash");
    let mut req = request();
    req.model = String::new();

    assert_eq!(agent.generate(req).await.unwrap(), "");
    let captured = server.await.unwrap();
    assert!(captured.head.contains("/gemini-2.0-flash:generateContent"));
}

#[tokio::test]
async fn test_http_error_is_generation_error() {
    let (base_url, server) = serve_once(
        "403 Forbidden",
        r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#,
    )
    .await;

    let agent = agent("bad", base_url);
    let err = agent.generate(request()).await.unwrap_err();
    assert!(err.to_string().contains("403: PERMISSION_DENIED: API key not valid"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_session_falls_back_when_service_fails() {
    let (base_url, server) = serve_once("500 Internal Server Error", "boom").await;

    let agent = Arc::new(agent("k", base_url));
    let session = ConversationSession::new(
        Arc::new(Catalog::builtin()),
        agent,
        PromptBuilder::default(),
        "gemini-2.5-flash",
    );

    let reply = session.send("hello", &Wishlist::new()).await.unwrap();
    assert_eq!(reply, SERVICE_FAILURE_FALLBACK);
    server.await.unwrap();
}

const OK_REPLY: &str =
    r#"{"candidates":[{"content":{"parts":[{"text":"The Zen Flow Yoga Set."}]}}]}"#;

fn storefront_with(config: &StorefrontConfig, agent: GeminiApiAgent) -> Storefront {
    Storefront::from_config(
        config,
        Arc::new(Catalog::builtin()),
        Arc::new(InMemoryKeyValueStore::new()),
        Arc::new(agent),
    )
}

#[tokio::test]
async fn test_storefront_uses_agent_model_unless_config_pins_one() {
    let (base_url, server) = serve_once("200 OK", OK_REPLY).await;
    let storefront = storefront_with(
        &StorefrontConfig::default(),
        agent("k", base_url).with_default_model("model-from-secret-json"),
    );

    let segments = storefront.send_message("hi").await.unwrap();
    let linked: Vec<_> = segments.iter().filter_map(|s| s.product_id()).collect();
    assert_eq!(linked, vec!["3"]);
    let captured = server.await.unwrap();
    assert!(captured
        .head
        .starts_with("POST /v1beta/models/model-from-secret-json:generateContent "));

    let (base_url, server) = serve_once("200 OK", OK_REPLY).await;
    let mut config = StorefrontConfig::default();
    config.assistant.model = Some("gemini-2.0-flash".to_string());
    let storefront = storefront_with(
        &config,
        agent("k", base_url).with_default_model("model-from-secret-json"),
    );

    storefront.send_message("hi").await.unwrap();
    let captured = server.await.unwrap();
    assert!(captured
        .head
        .starts_with("POST /v1beta/models/gemini-2.0-flash:generateContent "));
}

#[tokio::test]
async fn test_try_from_paths_reads_secret_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("secret.json"),
        r#"{"gemini":{"api_key":"from-file","model":"gemini-2.0-flash"}}"#,
    )
    .unwrap();

    let paths = LuminaPaths::new(Some(temp_dir.path())).unwrap();
    match GeminiApiAgent::try_from_paths(&paths).await {
        Ok(agent) => assert_eq!(agent.default_model(), "gemini-2.0-flash"),
        Err(e) => panic!("expected agent, got {e}"),
    }
}
