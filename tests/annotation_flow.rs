mod common;

use common::{client, configured_client};
use texie_cli::{AnnotationResult, RequestBody, ServiceError, TransportError};

const ANNOTATIONS_URL: &str = "http://gw-q201.fit.vutbr.cz:8081/api/v1/annotations/";

fn jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]
}

#[tokio::test]
async fn stored_annotation_returns_text_and_image() {
    let (cloud, transport) = configured_client("T");
    transport.respond(201, r#"{"text":"hello","image":"/img/1.jpg"}"#);

    let result = cloud.annotate(jpeg(), true).await.unwrap();

    assert_eq!(
        result,
        AnnotationResult {
            recognized_text: "hello".into(),
            stored_image_url: Some("/img/1.jpg".into()),
        }
    );
}

#[tokio::test]
async fn annotation_without_image_key() {
    let (cloud, transport) = configured_client("T");
    transport.respond(201, r#"{"text":"hello"}"#);

    let result = cloud.annotate(jpeg(), false).await.unwrap();

    assert_eq!(result.recognized_text, "hello");
    assert_eq!(result.stored_image_url, None);
}

#[tokio::test]
async fn upload_request_shape() {
    let (cloud, transport) = configured_client("T");
    transport.respond(201, r#"{"text":""}"#);

    cloud.annotate(jpeg(), true).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, ANNOTATIONS_URL);
    assert_eq!(requests[0].header("Authorization"), Some("Bearer T"));
    match &requests[0].body {
        RequestBody::Multipart(file) => {
            assert_eq!(file.field, "image");
            assert_eq!(file.file_name, "file.jpg");
            assert_eq!(file.mime, "image/jpeg");
            assert_eq!(file.bytes, jpeg());
        }
        other => panic!("expected multipart body, got {:?}", other),
    }
}

#[tokio::test]
async fn store_false_appends_query() {
    let (cloud, transport) = configured_client("T");
    transport.respond(201, r#"{"text":"x"}"#);

    cloud.annotate(jpeg(), false).await.unwrap();

    assert_eq!(
        transport.requests()[0].url,
        format!("{}?store=false", ANNOTATIONS_URL)
    );
}

#[tokio::test]
async fn empty_token_is_still_sent_as_bearer() {
    let (cloud, transport) = configured_client("");
    transport.respond(401, "");

    let err = cloud.annotate(jpeg(), true).await.unwrap_err();

    assert!(matches!(err, ServiceError::HttpStatus(401)));
    assert_eq!(transport.requests()[0].header("Authorization"), Some("Bearer "));
}

#[tokio::test]
async fn non_created_status_is_reported_without_parsing() {
    let (cloud, transport) = configured_client("T");
    // A body that would parse fine must still be ignored.
    transport.respond(500, r#"{"text":"hello"}"#);
    transport.respond(200, r#"{"text":"hello"}"#);

    assert!(matches!(
        cloud.annotate(jpeg(), true).await.unwrap_err(),
        ServiceError::HttpStatus(500)
    ));
    assert!(matches!(
        cloud.annotate(jpeg(), true).await.unwrap_err(),
        ServiceError::HttpStatus(200)
    ));
}

#[tokio::test]
async fn created_without_text_is_malformed() {
    let (cloud, transport) = configured_client("T");
    transport.respond(201, r#"{"image":"/img/1.jpg"}"#);
    transport.respond(201, "not json");
    transport.respond(201, r#"{"text":42}"#);

    for _ in 0..3 {
        assert!(matches!(
            cloud.annotate(jpeg(), true).await.unwrap_err(),
            ServiceError::MalformedResponse
        ));
    }
}

#[tokio::test]
async fn transport_errors_map_to_service_errors() {
    let (cloud, transport) = configured_client("T");
    transport.fail(TransportError::Encoding("invalid mime type".into()));
    transport.fail(TransportError::Network("connection reset".into()));

    assert!(matches!(
        cloud.annotate(jpeg(), true).await.unwrap_err(),
        ServiceError::EncodingFailure(_)
    ));
    assert!(matches!(
        cloud.annotate(jpeg(), true).await.unwrap_err(),
        ServiceError::NetworkFailure(_)
    ));
}

#[tokio::test]
async fn missing_credentials_short_circuit() {
    let (cloud, transport, _) = client();

    let err = cloud.annotate(jpeg(), true).await.unwrap_err();

    assert!(matches!(err, ServiceError::AuthMissing));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn empty_image_is_rejected_before_upload() {
    let (cloud, transport) = configured_client("T");

    let err = cloud.annotate(Vec::new(), true).await.unwrap_err();

    assert!(matches!(err, ServiceError::EncodingFailure(_)));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn image_url_joins_host_and_path() {
    let (cloud, _, _) = client();

    let url = cloud.image_url("/media/a.jpg").unwrap();

    assert_eq!(url.as_str(), "http://gw-q201.fit.vutbr.cz:8081/media/a.jpg");
}

#[test]
fn image_url_rejects_unparseable_result() {
    let (cloud, _, _) = client();

    let err = cloud.image_url(":not-a-port/a.jpg").unwrap_err();

    assert!(matches!(err, ServiceError::InvalidUrl(_)));
}
