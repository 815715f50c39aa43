//! Integration tests for action submission and ambient credentials.

mod common;

use std::time::Duration;

use arena_client::arena_core::action::ActionForm;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn post_action_sends_json_body_to_do_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::api_path("/do/reset")))
        .and(body_json(json!({ "team": "red" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "reset action sent" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let resp = client.post_action("reset", &json!({ "team": "red" })).await.unwrap();
    assert_eq!(resp.status(), 200);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].headers.get("content-type").is_none(),
        "no content type is set explicitly"
    );
}

#[tokio::test]
async fn action_name_is_url_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = common::client(&server);
    client.set_game_mode("simulation").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), common::api_path("/do/ui%3Agame%3Amode"));

    let body: ActionForm = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, ActionForm::new("simulation"));
}

#[tokio::test]
async fn action_response_is_not_inspected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::api_path("/do/ui%3Agame%3Aend")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "no game" })))
        .mount(&server)
        .await;

    let dashboard = common::dashboard(&server, Duration::from_secs(3600));
    let resp = dashboard.client().end_game().await.unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "no game");
}

#[tokio::test]
async fn cookies_from_the_backend_are_sent_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(common::api_path("/games/all")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/")
                .set_body_json(json!({ "games": ["current"] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(common::api_path("/do/reset")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dashboard = common::dashboard(&server, Duration::from_secs(3600));
    dashboard.fetch_games().await.unwrap();
    dashboard.send_action("reset", &json!({})).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|req| req.method.as_str() == "POST")
        .expect("action request recorded");
    let cookie = post
        .headers
        .get("cookie")
        .expect("cookie header sent")
        .to_str()
        .unwrap();
    assert!(cookie.contains("session=abc123"));
}
