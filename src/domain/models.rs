use crate::domain::interval::{MinuteInterval, MINUTES_PER_DAY};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Task,
    Project,
    Routine,
}

/// A user-placed, concrete occupation of time on one calendar date.
///
/// Owned exclusively by the block repository. A move is a delete followed by
/// a recreate under a fresh id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub id: String,
    pub date: NaiveDate,
    pub start_minute: u16,
    pub end_minute: u16,
    pub kind: ActivityKind,
    pub activity_ref: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TimeBlock {
    pub fn validate(&self) -> Result<(), String> {
        validate_non_empty(&self.id, "block.id")?;
        validate_non_empty(&self.activity_ref, "block.activity_ref")?;
        validate_non_empty(&self.title, "block.title")?;
        if self.end_minute > MINUTES_PER_DAY {
            return Err("block.end_minute must be <= 1440".to_string());
        }
        if self.end_minute <= self.start_minute {
            return Err("block.end_minute must be after block.start_minute".to_string());
        }
        Ok(())
    }

    pub fn interval(&self) -> MinuteInterval {
        MinuteInterval::new(self.start_minute, self.end_minute)
    }
}

/// A derived, never-persisted fragment of an activity awaiting placement.
///
/// Identity for one date is (kind, activity_ref, fragment_index); cards are
/// recomputed fresh on every query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCard {
    pub kind: ActivityKind,
    pub activity_ref: String,
    pub title: String,
    pub duration_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment_index: Option<u32>,
}

impl ActivityCard {
    pub fn duration_minutes(&self) -> u16 {
        (self.duration_hours * 60.0).round() as u16
    }
}

/// Read-only obstacle sourced from the external calendar, already localized
/// to the day in question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub start_minute: u16,
    pub end_minute: u16,
    pub title: String,
}

impl CalendarEvent {
    pub fn interval(&self) -> MinuteInterval {
        MinuteInterval::new(self.start_minute, self.end_minute)
    }
}

/// Externally-owned project snapshot; only the scheduling-relevant fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weekday_allocation: HashMap<u8, f64>,
    pub completed: bool,
}

impl Project {
    pub fn validate(&self) -> Result<(), String> {
        validate_non_empty(&self.id, "project.id")?;
        validate_non_empty(&self.title, "project.title")?;
        if self.end_date < self.start_date {
            return Err("project.end_date must not precede project.start_date".to_string());
        }
        for (weekday, hours) in &self.weekday_allocation {
            validate_weekday(*weekday, "project.weekday_allocation")?;
            if !hours.is_finite() || *hours <= 0.0 {
                return Err("project.weekday_allocation hours must be > 0".to_string());
            }
        }
        Ok(())
    }

    /// Planned hours for the date's weekday, if any.
    pub fn planned_hours_on(&self, date: NaiveDate) -> Option<f64> {
        self.weekday_allocation.get(&weekday_index(date)).copied()
    }
}

/// Externally-owned routine snapshot. Fixed sport routines and user-defined
/// custom routines are modeled identically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    pub title: String,
    pub weekdays: Vec<u8>,
}

impl Routine {
    pub fn validate(&self) -> Result<(), String> {
        validate_non_empty(&self.id, "routine.id")?;
        validate_non_empty(&self.title, "routine.title")?;
        for weekday in &self.weekdays {
            validate_weekday(*weekday, "routine.weekdays")?;
        }
        Ok(())
    }

    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(&weekday_index(date))
    }
}

/// Externally-owned daily task snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub completed: bool,
}

impl Task {
    pub fn validate(&self) -> Result<(), String> {
        validate_non_empty(&self.id, "task.id")?;
        validate_non_empty(&self.title, "task.title")?;
        Ok(())
    }
}

/// Transfer record for a drop gesture. Untrusted input: the placement engine
/// validates it instead of trusting the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    pub kind: ActivityKind,
    pub activity_ref: String,
    pub title: String,
    pub duration_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_block_id: Option<String>,
}

impl DropPayload {
    pub fn validate(&self) -> Result<(), String> {
        validate_non_empty(&self.activity_ref, "payload.activity_ref")?;
        validate_non_empty(&self.title, "payload.title")?;
        if !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            return Err("payload.duration_hours must be a positive finite number".to_string());
        }
        Ok(())
    }

    pub fn duration_minutes(&self) -> u32 {
        (self.duration_hours * 60.0).round() as u32
    }
}

/// Weekday of a date as 0-6 with 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field_name} must not be empty"));
    }
    Ok(())
}

fn validate_weekday(value: u8, field_name: &str) -> Result<(), String> {
    if value > 6 {
        return Err(format!("{field_name} weekday must be in 0-6"));
    }
    Ok(())
}
