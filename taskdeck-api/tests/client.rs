//! End-to-end client tests against a canned single-response server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use taskdeck_api::{ApiClient, Error};

/// Serve exactly one canned HTTP response on a random local port and
/// return the base URL to point the client at.
async fn serve_once(status_line: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\n\
         content-type: application/json\r\n\
         content-length: {}\r\n\
         connection: close\r\n\r\n{body}",
        body.len()
    );
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn test_get_unwraps_the_response_envelope() {
    let base = serve_once(
        "200 OK",
        r#"{"success":true,"code":200,"data":{"id":3,"name":"Work"}}"#,
    )
    .await;
    let client = ApiClient::new(&base).unwrap();

    let category = client.category(3).await.unwrap();
    assert_eq!(category.id, 3);
    assert_eq!(category.name, "Work");
}

#[tokio::test]
async fn test_unauthorized_maps_to_session_expired() {
    let base = serve_once("401 Unauthorized", "").await;
    let client = ApiClient::new(&base).unwrap();

    let err = client.categories().await.unwrap_err();
    assert!(err.is_session_expired());
}

#[tokio::test]
async fn test_failure_envelope_surfaces_backend_message() {
    let base = serve_once(
        "200 OK",
        r#"{"success":false,"errorMessage":"Category not found","code":404,"data":null}"#,
    )
    .await;
    let client = ApiClient::new(&base).unwrap();

    match client.category(9).await {
        Err(Error::Api { code, message }) => {
            assert_eq!(code, 404);
            assert_eq!(message, "Category not found");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_envelope_body_is_a_parse_error() {
    let base = serve_once("500 Internal Server Error", "<html>boom</html>").await;
    let client = ApiClient::new(&base).unwrap();

    match client.categories().await {
        Err(Error::Parse { body, .. }) => {
            assert_eq!(body.as_deref(), Some("<html>boom</html>"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}
