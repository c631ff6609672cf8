mod common;

use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::any;
use axum::Router;
use common::{closed_addr, spawn_proxy, spawn_router, StubInflux};
use std::sync::{Arc, Mutex};
use influx_entry::form::{FormSession, SubmitStatus};
use influx_entry::services::write::{HttpLineWriter, LineWriter, WriteError};
use influx_entry::{encode, Record};

#[tokio::test]
async fn test_line_travels_through_proxy() {
    let influx = StubInflux::new();
    let influx_addr = influx.spawn().await;
    let proxy = spawn_proxy(format!("http://{}", influx_addr)).await;
    let writer = HttpLineWriter::new(format!("http://{}/write-line-protocol", proxy));

    let line = encode(&Record::new("temp").tag("loc", "sf").field("value", "42")).unwrap();
    writer.write_line(&line).await.unwrap();

    let writes = influx.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].body, "temp,loc=sf value=42");
}

#[tokio::test]
async fn test_rejection_carries_raw_body() {
    let influx = StubInflux::new();
    influx.reply_with(422, "field type conflict");
    let influx_addr = influx.spawn().await;
    let proxy = spawn_proxy(format!("http://{}", influx_addr)).await;
    let writer = HttpLineWriter::new(format!("http://{}/write-line-protocol", proxy));

    let line = encode(&Record::new("temp").field("value", "x")).unwrap();
    let err = writer.write_line(&line).await.unwrap_err();
    assert_eq!(
        err,
        WriteError::Rejected { status: 422, body: r#"{"detail":"field type conflict"}"#.to_string() }
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let dead = closed_addr().await;
    let writer = HttpLineWriter::new(format!("http://{}/write-line-protocol", dead));

    let line = encode(&Record::new("temp").field("value", "1")).unwrap();
    let err = writer.write_line(&line).await.unwrap_err();
    assert!(matches!(err, WriteError::Network(_)));
}

#[tokio::test]
async fn test_form_submission_end_to_end() {
    let influx = StubInflux::new();
    let influx_addr = influx.spawn().await;
    let proxy = spawn_proxy(format!("http://{}", influx_addr)).await;
    let writer = HttpLineWriter::new(format!("http://{}/write-line-protocol", proxy));

    let mut session = FormSession::new();
    session.set_measurement("humidity");
    session.tags_mut().set_key(0, "room").unwrap();
    session.tags_mut().set_value(0, "bath").unwrap();
    session.fields_mut().set_key(0, "value").unwrap();
    session.fields_mut().set_value(0, "61").unwrap();
    session.fields_mut().append("count", "2i");

    assert_eq!(session.submit(&writer).await, &SubmitStatus::Success);
    assert_eq!(influx.writes()[0].body, "humidity,room=bath value=61,count=2i");

    influx.reply_with(401, "unauthorized access");
    let status = session.submit(&writer).await;
    assert_eq!(status.to_string(), r#"Error: {"detail":"unauthorized access"}"#);
}

#[tokio::test]
async fn test_form_submission_network_error() {
    let dead = closed_addr().await;
    let writer = HttpLineWriter::new(format!("http://{}/write-line-protocol", dead));

    let mut session = FormSession::new();
    session.set_measurement("temp");
    session.fields_mut().set_key(0, "value").unwrap();
    session.fields_mut().set_value(0, "1").unwrap();

    assert_eq!(session.submit(&writer).await.to_string(), "Network error");
}

#[derive(Debug, Clone, Default)]
struct SeenRequest {
    method: String,
    content_type: Option<String>,
    body: String,
}

#[tokio::test]
async fn test_posts_plain_text() {
    let seen: Arc<Mutex<Vec<SeenRequest>>> = Arc::default();
    let sink = seen.clone();
    let router = Router::new().route(
        "/write",
        any(move |method: Method, headers: HeaderMap, body: String| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(SeenRequest {
                    method: method.to_string(),
                    content_type: headers
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body,
                });
                StatusCode::NO_CONTENT
            }
        }),
    );
    let addr = spawn_router(router).await;
    let writer = HttpLineWriter::new(format!("http://{}/write", addr));

    let line = encode(&Record::new("temp").field("value", "1")).unwrap();
    writer.write_line(&line).await.unwrap();

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].content_type.as_deref(), Some("text/plain"));
    assert_eq!(seen[0].body, "temp value=1");
}

#[tokio::test]
async fn test_plain_text_rejection_body_is_untouched() {
    let router = Router::new().route(
        "/write",
        any(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream busy, try later\n") }),
    );
    let addr = spawn_router(router).await;
    let writer = HttpLineWriter::new(format!("http://{}/write", addr));

    let line = encode(&Record::new("temp").field("value", "1")).unwrap();
    let err = writer.write_line(&line).await.unwrap_err();
    assert_eq!(
        err,
        WriteError::Rejected { status: 503, body: "upstream busy, try later\n".to_string() }
    );
}
