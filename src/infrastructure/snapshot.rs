use crate::domain::models::{ActivityKind, TimeBlock};
use crate::infrastructure::error::PlannerError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Flat wire record for one placed block, as stored in the whole-state save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub block_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub activity_type: ActivityKind,
    pub activity_id: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
}

/// Everything the planner hands to the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlannerSnapshot {
    pub timeblocks: Vec<BlockRecord>,
}

impl PlannerSnapshot {
    pub fn from_blocks(blocks: &[TimeBlock]) -> Self {
        Self {
            timeblocks: blocks.iter().map(encode_block_record).collect(),
        }
    }

    pub fn into_blocks(self) -> Result<Vec<TimeBlock>, PlannerError> {
        self.timeblocks.into_iter().map(decode_block_record).collect()
    }
}

pub fn encode_block_record(block: &TimeBlock) -> BlockRecord {
    BlockRecord {
        block_id: block.id.clone(),
        date: block.date,
        start_time: format_hhmm(block.start_minute),
        end_time: format_hhmm(block.end_minute),
        activity_type: block.kind,
        activity_id: block.activity_ref.clone(),
        title: block.title.clone(),
        notes: block.notes.clone().unwrap_or_default(),
    }
}

pub fn decode_block_record(record: BlockRecord) -> Result<TimeBlock, PlannerError> {
    let block = TimeBlock {
        id: record.block_id,
        date: record.date,
        start_minute: parse_hhmm(&record.start_time)?,
        end_minute: parse_hhmm(&record.end_time)?,
        kind: record.activity_type,
        activity_ref: record.activity_id,
        title: record.title,
        notes: if record.notes.trim().is_empty() {
            None
        } else {
            Some(record.notes)
        },
    };
    block.validate().map_err(PlannerError::InvalidInput)?;
    Ok(block)
}

fn format_hhmm(minute_of_day: u16) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

fn parse_hhmm(value: &str) -> Result<u16, PlannerError> {
    let invalid = || PlannerError::InvalidInput(format!("time must be HH:MM, got '{value}'"));
    let (hour_str, minute_str) = value.split_once(':').ok_or_else(invalid)?;
    let hour: u16 = hour_str.parse().map_err(|_| invalid())?;
    let minute: u16 = minute_str.parse().map_err(|_| invalid())?;
    if hour > 24 || minute > 59 {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}
