use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use synopsis_engine::{ClientSettings, FailureKind, ReqwestSummaryClient, SummaryClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestSummaryClient {
    ReqwestSummaryClient::new(ClientSettings {
        endpoint: format!("{}/api/summarize", server.uri()),
        ..ClientSettings::default()
    })
}

fn success_body() -> serde_json::Value {
    json!({
        "id": 1,
        "blog_url": "https://example.com/post",
        "title": "T",
        "summary_english": "S",
        "summary_urdu": "اردو",
        "created_at": "2024-01-01T00:00:00Z",
        "word_count": 42
    })
}

#[tokio::test]
async fn posts_address_and_parses_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "url": "https://example.com/post" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .summarize("https://example.com/post")
        .await
        .expect("summary ok");

    assert_eq!(payload.id, 1);
    assert_eq!(payload.blog_url, "https://example.com/post");
    assert_eq!(payload.title, "T");
    assert_eq!(payload.summary_english, "S");
    assert_eq!(payload.summary_urdu, "اردو");
    assert_eq!(payload.created_at, "2024-01-01T00:00:00Z");
    assert_eq!(payload.word_count, 42);
    assert_eq!(payload.author, None);
}

#[tokio::test]
async fn optional_author_is_read() {
    let server = MockServer::start().await;
    let mut body = success_body();
    body["author"] = json!("Jane Doe");
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .summarize("https://example.com/post")
        .await
        .unwrap();
    assert_eq!(payload.author.as_deref(), Some("Jane Doe"));
}

#[tokio::test]
async fn failure_status_uses_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "rate limited" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .summarize("https://example.com/post")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "rate limited");
    assert_eq!(err.to_string(), "rate limited");
}

#[tokio::test]
async fn failure_status_without_error_field_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .summarize("https://example.com/post")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(err.message, "HTTP error! status: 502");
}

#[tokio::test]
async fn unexpected_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "only" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .summarize("https://example.com/post")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert!(
        err.message.starts_with("malformed response from summary service"),
        "unexpected message: {}",
        err.message
    );
}

#[tokio::test]
async fn refused_connection_is_a_network_failure() {
    // Grab a free port, then release it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ReqwestSummaryClient::new(ClientSettings {
        endpoint: format!("http://127.0.0.1:{port}/api/summarize"),
        ..ClientSettings::default()
    });

    let err = client
        .summarize("https://example.com/post")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert!(err.kind.is_transport());
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn invalid_endpoint_is_reported_without_request() {
    let client = ReqwestSummaryClient::new(ClientSettings {
        endpoint: "not an endpoint".to_string(),
        ..ClientSettings::default()
    });

    let err = client.summarize("https://example.com/post").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[tokio::test]
async fn configured_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(success_body()),
        )
        .mount(&server)
        .await;

    let client = ReqwestSummaryClient::new(ClientSettings {
        endpoint: format!("{}/api/summarize", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::default()
    });

    let err = client.summarize("https://example.com/post").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

/// Reads one HTTP request (headers plus `content-length` body) off `socket`.
async fn read_request(socket: &mut tokio::net::TcpStream) {
    use tokio::io::AsyncReadExt;

    let mut received = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        received.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&received).to_string();
        if let Some(end) = text.find("\r\n\r\n") {
            let body_len = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if received.len() >= end + 4 + body_len {
                return;
            }
        }
    }
}

#[tokio::test]
async fn truncated_error_body_falls_back_to_status_message() {
    use tokio::io::AsyncWriteExt;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  content-type: application/json\r\n\
                  content-length: 64\r\n\r\n\
                  {\"error\":\"rate li",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
    });

    let client = ReqwestSummaryClient::new(ClientSettings {
        endpoint: format!("http://{addr}/api/summarize"),
        ..ClientSettings::default()
    });

    let err = client.summarize("https://example.com/post").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "HTTP error! status: 500");
}
