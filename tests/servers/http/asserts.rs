use reqwest::Response;

/// The body of an announce answered with no other peers.
pub const EMPTY_ANNOUNCE_RESPONSE: &[u8] = b"d8:intervali1800e5:peerslee";

pub async fn assert_announce_response(response: Response, expected_body: &[u8]) {
    assert_eq!(response.status(), 200);

    let body = response.bytes().await.unwrap();

    assert_eq!(
        body.as_ref(),
        expected_body,
        "announce response body mismatch, got \"{}\"",
        String::from_utf8_lossy(&body)
    );
}

pub async fn assert_empty_announce_response(response: Response) {
    assert_announce_response(response, EMPTY_ANNOUNCE_RESPONSE).await;
}

// Error responses

pub async fn assert_failure_reason(response: Response, reason: &str) {
    assert_eq!(response.status(), 200);

    let expected = format!("d14:failure reason{}:{reason}e", reason.len());

    assert_eq!(response.text().await.unwrap(), expected);
}

pub async fn assert_failure_code(response: Response, code: i64) {
    assert_eq!(response.status(), 200);

    assert_eq!(response.text().await.unwrap(), format!("d12:failure codei{code}ee"));
}

pub async fn assert_missing_remote_address_failure(response: Response) {
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();

    assert!(
        body.starts_with("d14:failure reason") && body.contains("X-Forwarded-For"),
        "expected a failure about the X-Forwarded-For header, got \"{body}\""
    );
}

pub async fn assert_not_found(response: Response) {
    assert_eq!(response.status(), 404);

    assert_eq!(response.text().await.unwrap(), "not found");
}
