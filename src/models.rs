// Core data structures for the dance center client

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::error::ValidationError;

/// Backend-assigned identifier, opaque to the client
pub type EntityId = i64;

/// Group difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Beg", alias = "Beginner")]
    Beginner,
    Mid,
    Pro,
}

impl Difficulty {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beg",
            Self::Mid => "Mid",
            Self::Pro => "Pro",
        }
    }

    /// Parse from user input (wire value or full English name)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beg" | "beginner" => Some(Self::Beginner),
            "mid" | "middle" | "intermediate" => Some(Self::Mid),
            "pro" | "professional" => Some(Self::Pro),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week as the backend names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Monday through Sunday, the column order of the weekly grid
    pub const ALL: [DayOfWeek; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Self::Monday => "mon",
            Self::Tuesday => "tue",
            Self::Wednesday => "wed",
            Self::Thursday => "thu",
            Self::Friday => "fri",
            Self::Saturday => "sat",
            Self::Sunday => "sun",
        }
    }

    /// Localized short label for grid headers
    pub fn short_label(&self) -> String {
        use crate::i18n::t;
        match self {
            Self::Monday => t!("days.mon"),
            Self::Tuesday => t!("days.tue"),
            Self::Wednesday => t!("days.wed"),
            Self::Thursday => t!("days.thu"),
            Self::Friday => t!("days.fri"),
            Self::Saturday => t!("days.sat"),
            Self::Sunday => t!("days.sun"),
        }
        .to_string()
    }

    /// Parse full or three-letter English names, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().to_lowercase() == lower || day.key() == lower)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a wall-clock time as `HH:MM`
pub fn format_hm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Drop seconds and below; the backend schedules at minute granularity
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// `HH:MM:00` wire format for payload times
mod minute_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M:00"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw)
            .map(super::truncate_to_minute)
            .ok_or_else(|| de::Error::custom(format!("invalid time '{raw}'")))
    }
}

/// Dance hall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub area: Option<i32>,
    #[serde(default)]
    pub schedule_items_id: Vec<EntityId>,
}

/// Trainer leading one or more groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub dance_style: String,
    #[serde(default)]
    pub groups_id: Vec<EntityId>,
}

/// Student enrolled in zero or more groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub groups_id: Vec<EntityId>,
}

/// Training group: one trainer, any number of students
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub trainer: Option<Trainer>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub schedule_items_id: Vec<EntityId>,
}

impl Group {
    pub fn trainer_name(&self) -> Option<&str> {
        self.trainer.as_ref().map(|t| t.name.as_str())
    }

    pub fn dance_style(&self) -> Option<&str> {
        self.trainer.as_ref().map(|t| t.dance_style.as_str())
    }

    pub fn student_ids(&self) -> Vec<EntityId> {
        self.students.iter().map(|s| s.id).collect()
    }

    pub fn has_student(&self, student_id: EntityId) -> bool {
        self.students.iter().any(|s| s.id == student_id)
    }

    /// One-line summary: style, difficulty and trainer
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            parts.push(name.to_string());
        }
        if let Some(style) = self.dance_style().filter(|s| !s.is_empty()) {
            parts.push(style.to_string());
        }
        parts.push(self.difficulty.to_string());
        if let Some(trainer) = self.trainer_name().filter(|n| !n.is_empty()) {
            parts.push(trainer.to_string());
        }
        parts.join(" · ")
    }
}

/// One weekly class of a group in a hall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<Hall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<EntityId>,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleItem {
    /// Hall reference, embedded or flat
    pub fn hall_ref(&self) -> Option<EntityId> {
        self.hall.as_ref().map(|h| h.id).or(self.hall_id)
    }

    /// Group reference, embedded or flat
    pub fn group_ref(&self) -> Option<EntityId> {
        self.group.as_ref().map(|g| g.id).or(self.group_id)
    }

    /// Half-open overlap of `[start_time, end_time)` with `[start, end)`
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && self.end_time > start
    }

    /// `HH:MM - HH:MM`
    pub fn time_range(&self) -> String {
        format!("{} - {}", format_hm(self.start_time), format_hm(self.end_time))
    }
}

/// Create/update body for `/group`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPayload {
    pub difficulty: Difficulty,
    pub trainer_id: Option<EntityId>,
    pub students_id: Vec<EntityId>,
}

impl GroupPayload {
    /// Full replacement payload mirroring the group's current membership
    pub fn from_group(group: &Group) -> Self {
        Self {
            difficulty: group.difficulty,
            trainer_id: group.trainer.as_ref().map(|t| t.id),
            students_id: group.student_ids(),
        }
    }
}

/// Create/update body for `/hall`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallPayload {
    pub name: String,
    pub area: i32,
}

/// Create/update body for `/student`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub name: String,
    pub phone_number: String,
}

/// Create/update body for `/trainer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerPayload {
    pub name: String,
    pub phone_number: String,
    pub dance_style: String,
}

/// Create/update body for `/schedule_item`; times serialize as `HH:MM:00`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItemPayload {
    pub hall_id: EntityId,
    pub group_id: EntityId,
    pub day_of_week: DayOfWeek,
    #[serde(with = "minute_time")]
    pub start_time: NaiveTime,
    #[serde(with = "minute_time")]
    pub end_time: NaiveTime,
}

/// Client-side checks run before a payload is sent
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

impl Validate for HallPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        if self.area <= 0 {
            return Err(ValidationError::NonPositiveArea);
        }
        Ok(())
    }
}

impl Validate for StudentPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require(&self.phone_number, "phone")
    }
}

impl Validate for TrainerPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require(&self.phone_number, "phone")?;
        require(&self.dance_style, "dance style")
    }
}

impl Validate for GroupPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.trainer_id.is_none() {
            return Err(ValidationError::MissingTrainer);
        }
        Ok(())
    }
}

impl Validate for ScheduleItemPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.start_time >= self.end_time {
            return Err(ValidationError::StartNotBeforeEnd);
        }
        Ok(())
    }
}
