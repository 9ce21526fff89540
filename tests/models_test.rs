//! Tests for models module: wire formats and client-side validation

use dancecenter::models::{
    DayOfWeek, Difficulty, Group, GroupPayload, ScheduleItem, TrainerPayload, Validate,
};
use dancecenter::utils::error::ValidationError;
use serde_json::json;

#[test]
fn test_group_without_trainer_deserializes() {
    let group: Group = serde_json::from_value(json!({
        "id": 3,
        "difficulty": "Pro",
        "trainer": null,
        "students": []
    }))
    .unwrap();

    assert!(group.trainer.is_none());
    assert_eq!(group.summary(), "Pro");
    assert_eq!(
        GroupPayload::from_group(&group).validate(),
        Err(ValidationError::MissingTrainer)
    );
}

#[test]
fn test_group_payload_wire_names() {
    let payload = GroupPayload {
        difficulty: Difficulty::Beginner,
        trainer_id: Some(1),
        students_id: vec![4, 5],
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({ "difficulty": "Beg", "trainerId": 1, "studentsId": [4, 5] })
    );
}

#[test]
fn test_schedule_item_embedded_refs() {
    let item: ScheduleItem = serde_json::from_value(json!({
        "id": 8,
        "hall": { "id": 2, "name": "Blue", "area": 60 },
        "group": { "id": 5, "difficulty": "Beginner" },
        "dayOfWeek": "Sunday",
        "startTime": "20:00:00",
        "endTime": "21:30:00"
    }))
    .unwrap();

    assert_eq!(item.hall_ref(), Some(2));
    assert_eq!(item.group_ref(), Some(5));
    assert_eq!(item.day_of_week, DayOfWeek::Sunday);
    assert_eq!(item.time_range(), "20:00 - 21:30");
}

#[test]
fn test_trainer_payload_requires_style() {
    let payload = TrainerPayload {
        name: "Anna".into(),
        phone_number: "+7 900".into(),
        dance_style: "  ".into(),
    };
    assert_eq!(
        payload.validate(),
        Err(ValidationError::EmptyField("dance style"))
    );
}
