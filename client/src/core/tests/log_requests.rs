//! Tests for log requests with and without attachments

use reqwest::{Method, StatusCode};

use rp_shared::{ItemType, LogLevel};

use super::*;
use crate::core::attachment::{FILE_PART_NAME, JSON_PART_NAME};
use crate::core::{Attachment, TestItem};
use crate::error::ReportError;
use crate::types::ItemKey;

/// Launch with one started test item whose id is `t-1`
async fn launch_with_started_test(
    mut responses: Vec<crate::error::ReportResult<ApiResponse>>,
) -> (Launch, ItemKey, Recorded) {
    responses.insert(0, created("t-1"));
    let (transport, recorded) = scripted_transport(responses);
    let mut launch = attached_launch(transport);
    let test = launch.add_item(TestItem::new("Test 1", ItemType::Test)).unwrap();
    launch.start_item(test).await.unwrap();
    (launch, test, recorded)
}

#[tokio::test]
async fn test_plain_log_body_has_four_fields() {
    let (launch, test, recorded) = launch_with_started_test(vec![created("log-1")]).await;

    launch.log(test, "boom", LogLevel::Error, None).await.unwrap();

    let requests = recorded.lock().unwrap();
    let (request, _) = &requests[1];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, format!("{PROJECT_URL}/log"));

    let body = json_of(request).as_object().unwrap();
    assert_eq!(body.len(), 4);
    assert_eq!(body["item_id"], "t-1");
    assert_eq!(body["message"], "boom");
    assert_eq!(body["level"], "error");
    assert!(body["time"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_log_with_attachment_is_two_part_multipart() {
    let (launch, test, recorded) = launch_with_started_test(vec![created("log-1")]).await;
    let attachment = Attachment::from_bytes("screen.png", vec![0x89, b'P', b'N', b'G'], "image/png");

    launch
        .log(test, "screenshot on failure", LogLevel::Info, Some(attachment))
        .await
        .unwrap();

    let requests = recorded.lock().unwrap();
    let (request, _) = &requests[1];
    assert_eq!(request.url, format!("{PROJECT_URL}/log"));

    let parts = match &request.body {
        RequestBody::Multipart(parts) => parts,
        other => panic!("expected multipart body, got {other:?}"),
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].name, JSON_PART_NAME);
    assert_eq!(parts[1].name, FILE_PART_NAME);
    assert_eq!(parts[1].file_name.as_deref(), Some("screen.png"));
    assert_eq!(parts[1].content_type, "image/png");
    assert_eq!(parts[1].data, vec![0x89, b'P', b'N', b'G']);

    let entries: serde_json::Value = serde_json::from_slice(&parts[0].data).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["file"]["name"], "screen.png");
    assert_eq!(entries[0]["item_id"], "t-1");
    assert_eq!(entries[0]["level"], "info");
    assert_eq!(entries[0]["message"], "screenshot on failure");
}

#[tokio::test]
async fn test_log_requires_created_status() {
    let (launch, test, _recorded) = launch_with_started_test(vec![status(StatusCode::OK)]).await;

    let err = launch.log(test, "m", LogLevel::Warn, None).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::OK));
    assert!(err.to_string().contains("/log"));
}

#[tokio::test]
async fn test_attachment_read_failure_sends_nothing() {
    let (launch, test, recorded) = launch_with_started_test(Vec::new()).await;

    struct Broken;
    impl tokio::io::AsyncRead for Broken {
        fn poll_read(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Err(std::io::Error::other("disk gone")))
        }
    }

    let err = launch
        .log(test, "m", LogLevel::Error, Some(Attachment::new("dump.bin", Broken, "application/octet-stream")))
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::Attachment { .. }));
    assert_eq!(recorded.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_log_before_start_fails_locally() {
    let mut launch = attached_launch(silent_transport());
    let test = launch.add_item(TestItem::new("Test 1", ItemType::Test)).unwrap();

    let err = launch.log(test, "m", LogLevel::Info, None).await.unwrap_err();
    assert!(matches!(err, ReportError::NotStarted { .. }));
}
