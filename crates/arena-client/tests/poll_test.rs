//! Integration tests for the poll timers.
//!
//! Intervals are shortened to tens of milliseconds; assertions only rely on
//! whether requests happened, not on exact tick counts.

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERVAL: Duration = Duration::from_millis(50);

async fn mount_any_game(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stats": { "status": "game:running", "scoreboard": { "red": 1 } },
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn restarting_game_poll_replaces_the_previous_timer() {
    let server = MockServer::start().await;
    mount_any_game(&server).await;

    let mut dashboard = common::dashboard(&server, INTERVAL);
    dashboard.start_game_polling("first");
    dashboard.start_game_polling("second");
    assert!(dashboard.is_game_polling());

    tokio::time::sleep(INTERVAL * 6).await;

    assert_eq!(common::hits(&server, &common::api_path("/games/first")).await, 0);
    assert!(common::hits(&server, &common::api_path("/games/second")).await >= 1);
}

#[tokio::test]
async fn restarting_game_list_poll_replaces_the_previous_timer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "games": ["current"] })))
        .mount(&server)
        .await;

    let interval = Duration::from_millis(100);
    let mut dashboard = common::dashboard(&server, interval);
    dashboard.start_games_polling();
    dashboard.start_games_polling();
    assert!(dashboard.is_games_polling());

    // ticks at 100, 200 and 300 ms: three requests from one timer, six from two
    tokio::time::sleep(Duration::from_millis(350)).await;
    dashboard.stop_games_polling();
    tokio::time::sleep(interval).await;

    let hits = common::hits(&server, &common::api_path("/games/all")).await;
    assert!((1..=4).contains(&hits), "expected one timer's worth of requests, got {hits}");
}

#[tokio::test]
async fn first_tick_waits_one_interval() {
    let server = MockServer::start().await;
    mount_any_game(&server).await;

    let mut dashboard = common::dashboard(&server, Duration::from_secs(3600));
    dashboard.start_game_polling("abc");
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(common::hits(&server, &common::api_path("/games/abc")).await, 0);
}

#[tokio::test]
async fn game_list_poll_updates_the_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "games": ["current", "g7"] })))
        .mount(&server)
        .await;

    let mut dashboard = common::dashboard(&server, INTERVAL);
    let mut rx = dashboard.store().games.watch();
    dashboard.start_games_polling();
    assert!(dashboard.is_games_polling());
    assert!(!dashboard.is_game_polling());

    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("game list updated within timeout")
        .unwrap();
    assert_eq!(dashboard.store().games.get(), vec![json!("current"), json!("g7")]);
}

#[tokio::test]
async fn stop_halts_further_requests() {
    let server = MockServer::start().await;
    mount_any_game(&server).await;

    let mut dashboard = common::dashboard(&server, INTERVAL);
    dashboard.start_game_polling("abc");
    dashboard.start_games_polling();
    tokio::time::sleep(INTERVAL * 4).await;

    dashboard.stop();
    assert!(!dashboard.is_game_polling());
    assert!(!dashboard.is_games_polling());

    // let any request spawned right before the stop land
    tokio::time::sleep(INTERVAL * 6).await;
    let before = server.received_requests().await.unwrap().len();
    assert!(before >= 2);

    tokio::time::sleep(INTERVAL * 6).await;
    assert_eq!(server.received_requests().await.unwrap().len(), before);
}

#[tokio::test]
async fn failing_ticks_keep_polling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut dashboard = common::dashboard(&server, INTERVAL);
    dashboard.start_game_polling("abc");
    tokio::time::sleep(INTERVAL * 6).await;

    assert!(common::hits(&server, &common::api_path("/games/abc")).await >= 2);
    assert_eq!(dashboard.store().total_revision(), 0);
}

#[tokio::test]
async fn select_game_switches_the_polled_game() {
    let server = MockServer::start().await;
    mount_any_game(&server).await;

    let mut dashboard = common::dashboard(&server, INTERVAL);
    dashboard.select_game("g1");
    dashboard.select_game("g2");
    assert_eq!(dashboard.store().selected_game.get(), "g2");

    let mut rx = dashboard.store().scoreboard.watch();
    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("scoreboard updated within timeout")
        .unwrap();

    assert_eq!(common::hits(&server, &common::api_path("/games/g1")).await, 0);
    assert_eq!(dashboard.store().scoreboard.get()["red"], 1);
}
