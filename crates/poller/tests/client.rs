use relay_common::error::RelayError;
use relay_common::types::Cursor;
use relay_poller::{ReviewApi, ReviewClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "y0_practicum_token";

fn client_for(server: &MockServer) -> ReviewClient {
    ReviewClient::new(format!("{}/api/user_api/homework_statuses/", server.uri()), TOKEN)
}

#[tokio::test]
async fn fetch_sends_oauth_header_and_from_date() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "homeworks": [{"homework_name": "diplom", "status": "reviewing"}],
        "current_date": 1_700_000_600
    });
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .and(header("Authorization", format!("OAuth {TOKEN}").as_str()))
        .and(query_param("from_date", "1700000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .fetch(Cursor(1_700_000_000))
        .await
        .expect("fetch ok");
    assert_eq!(result.body(), &body);
}

#[tokio::test]
async fn fetch_with_zero_cursor_sends_current_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"homeworks": []})),
        )
        .mount(&server)
        .await;

    let before = chrono::Utc::now().timestamp();
    client_for(&server).fetch(Cursor(0)).await.expect("fetch ok");
    let after = chrono::Utc::now().timestamp();

    let requests = server.received_requests().await.expect("recording on");
    let from_date: i64 = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "from_date")
        .map(|(_, v)| v.parse().unwrap())
        .expect("from_date present");
    assert!(before <= from_date && from_date <= after);
}

#[tokio::test]
async fn fetch_maps_non_200_to_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).fetch(Cursor(1)).await.unwrap_err();
    assert_eq!(err, RelayError::UpstreamStatus(503));
}

#[tokio::test]
async fn fetch_treats_other_success_codes_as_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch(Cursor(1)).await.unwrap_err();
    assert_eq!(err, RelayError::UpstreamStatus(204));
}

#[tokio::test]
async fn fetch_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>maintenance</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch(Cursor(1)).await.unwrap_err();
    assert!(matches!(err, RelayError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn fetch_reports_unreachable_endpoint() {
    let client = ReviewClient::new("http://127.0.0.1:9/homework_statuses/", TOKEN);
    let err = client.fetch(Cursor(1)).await.unwrap_err();
    assert!(matches!(err, RelayError::Endpoint(_)), "{err:?}");
}
