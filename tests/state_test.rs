//! Tests for the application data cache against a mock backend

mod common;

use common::{mount_studio, session, Studio};
use dancecenter::notifications::NotificationLevel;
use dancecenter::state::Collection;
use serde_json::json;
use std::time::Duration;
use serial_test::serial;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_load_all_fills_snapshot() {
    let server = MockServer::start().await;
    mount_studio(&server, &Studio::default(), 1).await;

    let mut session = session(&server);
    let report = session.refresh().await;

    assert!(report.is_ok());
    let snapshot = session.snapshot();
    assert_eq!(snapshot.halls.len(), 1);
    assert_eq!(snapshot.trainers.len(), 2);
    assert_eq!(snapshot.students.len(), 3);
    assert_eq!(snapshot.groups.len(), 1);
    assert_eq!(snapshot.schedule_items.len(), 1);
    assert!(!session.state.is_loading());
    assert!(session.state.error().is_none());
    assert!(session.notes.is_empty());
}

#[tokio::test]
#[serial]
async fn test_partial_load_keeps_successful_collections() {
    dancecenter::i18n::set_locale("en");
    let server = MockServer::start().await;
    let studio = Studio::default();

    for (resource, body) in [
        ("hall", &studio.halls),
        ("student", &studio.students),
        ("group", &studio.groups),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/api/{resource}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/trainer"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/schedule_item"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let mut session = session(&server);
    let report = session.refresh().await;

    assert!(report.failed(Collection::Trainers));
    assert!(report.failed(Collection::ScheduleItems));
    assert!(!report.failed(Collection::Halls));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.halls.len(), 1);
    assert_eq!(snapshot.groups.len(), 1);
    assert!(snapshot.trainers.is_empty());
    assert!(snapshot.schedule_items.is_empty());

    // only a total failure is an application-level error
    assert!(session.state.error().is_none());

    assert_eq!(
        session.notes.messages(NotificationLevel::Warning),
        vec!["Failed to load trainers."]
    );
    assert_eq!(
        session.notes.messages(NotificationLevel::Error),
        vec!["Failed to load the schedule."]
    );
}

#[tokio::test]
async fn test_total_failure_sets_app_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "database down" })))
        .mount(&server)
        .await;

    let mut session = session(&server);
    let report = session.refresh().await;

    assert_eq!(report.failures.len(), 5);
    assert_eq!(session.state.error(), Some("database down"));
    assert_eq!(session.notes.len(), 5);
}

#[tokio::test]
async fn test_failed_reload_empties_previous_data() {
    let server = MockServer::start().await;
    let studio = Studio::default();

    Mock::given(method("GET"))
        .and(path("/api/hall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(studio.halls.clone()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hall"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = session(&server);
    session.reload(Collection::Halls).await;
    assert_eq!(session.snapshot().halls.len(), 1);

    session.reload(Collection::Halls).await;
    assert!(session.snapshot().halls.is_empty());
    assert_eq!(session.state.reload_count(Collection::Halls), 2);
    assert_eq!(session.state.reload_count(Collection::Groups), 0);
}

#[tokio::test]
async fn test_loading_visible_while_fetches_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(5)
        .mount(&server)
        .await;

    let mut session = session(&server);
    let flag = session.state.loading_flag();

    let (report, seen_loading) = tokio::join!(session.refresh(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        flag.is_active()
    });

    assert!(report.is_ok());
    assert!(seen_loading);
    assert!(!session.state.is_loading());
}
