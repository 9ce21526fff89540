//! Common test utilities

#![allow(dead_code)]

use dancecenter::api::ApiClient;
use dancecenter::config::NotificationConfig;
use dancecenter::notifications::NotificationCenter;
use dancecenter::pages::Session;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session talking to the mock backend under `/api`
pub fn session(server: &MockServer) -> Session {
    let api = ApiClient::with_base_url(&format!("{}/api", server.uri())).unwrap();
    Session::new(api, NotificationCenter::new(NotificationConfig::default()))
}

pub fn hall_json(id: i64, name: &str, area: i32) -> Value {
    json!({ "id": id, "name": name, "area": area, "scheduleItemsId": [] })
}

pub fn trainer_json(id: i64, name: &str, style: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "phoneNumber": format!("+7 900 00{id}"),
        "danceStyle": style,
        "groupsId": []
    })
}

pub fn student_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "phoneNumber": format!("+7 911 00{id}"),
        "groupsId": []
    })
}

pub fn group_json(id: i64, difficulty: &str, trainer: Value, students: Vec<Value>) -> Value {
    json!({
        "id": id,
        "difficulty": difficulty,
        "trainer": trainer,
        "students": students,
        "scheduleItemsId": []
    })
}

pub fn schedule_json(id: i64, hall: Value, group_id: i64, day: &str, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "hall": hall,
        "groupId": group_id,
        "dayOfWeek": day,
        "startTime": start,
        "endTime": end
    })
}

/// Default studio: one hall, two trainers, three students, one group, one class
pub struct Studio {
    pub halls: Value,
    pub trainers: Value,
    pub students: Value,
    pub groups: Value,
    pub schedule: Value,
}

impl Default for Studio {
    fn default() -> Self {
        let anna = trainer_json(1, "Anna", "Salsa");
        Self {
            halls: json!([hall_json(1, "Mirror Hall", 120)]),
            trainers: json!([anna.clone(), trainer_json(2, "Boris", "Tango")]),
            students: json!([
                student_json(10, "Vera"),
                student_json(11, "Gleb"),
                student_json(12, "Dina")
            ]),
            groups: json!([group_json(5, "Beg", anna, vec![student_json(10, "Vera")])]),
            schedule: json!([schedule_json(
                100,
                hall_json(1, "Mirror Hall", 120),
                5,
                "Tuesday",
                "09:00:00",
                "10:00:00"
            )]),
        }
    }
}

/// Mount all five list endpoints, each expected to be hit `times` times
pub async fn mount_studio(server: &MockServer, studio: &Studio, times: u64) {
    for (resource, body) in [
        ("hall", &studio.halls),
        ("trainer", &studio.trainers),
        ("student", &studio.students),
        ("group", &studio.groups),
        ("schedule_item", &studio.schedule),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/api/{resource}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(times)
            .mount(server)
            .await;
    }
}
