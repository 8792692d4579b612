use std::time::Duration;

use pretty_assertions::assert_eq;
use stories_core::{request_key, ErrorInfo, ErrorKind, Item};
use stories_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TWO_HITS: &str = r#"{
  "hits": [
    {"objectID": "0", "title": "React", "url": "https://reactjs.org/", "author": "Jordan Walke", "num_comments": 3, "points": 4},
    {"objectID": "1", "title": "Redux", "url": "https://redux.js.org/", "author": "Dan Abramov, Andrew Clark", "num_comments": 2, "points": 5}
  ],
  "nbHits": 2,
  "page": 0
}"#;

fn fetcher(settings: FetchSettings) -> ReqwestFetcher {
    ReqwestFetcher::new(settings).expect("client")
}

#[tokio::test]
async fn fetcher_decodes_search_hits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("query", "React"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TWO_HITS, "application/json"))
        .mount(&server)
        .await;

    let url = request_key(&format!("{}/api/v1/search?query=", server.uri()), "React");
    let items = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .expect("fetch ok");

    assert_eq!(items.len(), 2);
    assert_eq!(
        items[1],
        Item {
            id: "1".to_string(),
            title: "Redux".to_string(),
            url: "https://redux.js.org/".to_string(),
            author: "Dan Abramov, Andrew Clark".to_string(),
            comment_count: 2,
            points: 5,
        }
    );
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let err = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(ErrorInfo::from(err).kind, ErrorKind::Response);
}

#[tokio::test]
async fn fetcher_fails_on_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let url = format!("{}/garbage", server.uri());
    let err = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(TWO_HITS, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let url = format!("{}/slow", server.uri());
    let err = fetcher(settings).fetch(&url).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(ErrorInfo::from(err).kind, ErrorKind::Transport);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TWO_HITS, "application/json"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let url = format!("{}/large", server.uri());
    let err = fetcher(settings).fetch(&url).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(TWO_HITS.len() as u64)
        }
    );
}

/// Serves one chunked response without a Content-Length header.
async fn serve_chunked_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n";
        let _ = socket.write_all(head.as_bytes()).await;
        for chunk in body.as_bytes().chunks(16) {
            let framed = format!("{:x}\r\n", chunk.len());
            let _ = socket.write_all(framed.as_bytes()).await;
            let _ = socket.write_all(chunk).await;
            let _ = socket.write_all(b"\r\n").await;
        }
        let _ = socket.write_all(b"0\r\n\r\n").await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/api/v1/search?query=React")
}

#[tokio::test]
async fn fetcher_limits_size_while_streaming_without_content_length() {
    let url = serve_chunked_once(TWO_HITS).await;
    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };

    let err = fetcher(settings).fetch(&url).await.unwrap_err();

    match err.kind {
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        } => {
            assert_eq!(max_bytes, 10);
            assert!(actual > 10);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[tokio::test]
async fn fetcher_accepts_chunked_body_within_limit() {
    let url = serve_chunked_once(TWO_HITS).await;

    let items = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .expect("fetch ok");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "0");
}

#[tokio::test]
async fn fetcher_rejects_invalid_url() {
    let err = fetcher(FetchSettings::default())
        .fetch("not a url")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
