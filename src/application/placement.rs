use crate::domain::interval::{MinuteInterval, MINUTES_PER_DAY};
use crate::domain::models::{DropPayload, TimeBlock};
use crate::infrastructure::block_repository::BlockRepository;
use crate::infrastructure::calendar_source::CalendarEventSource;
use crate::infrastructure::config::PlannerConfig;
use crate::infrastructure::error::PlannerError;
use chrono::{NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id(prefix: &str) -> String {
    let sequence = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{sequence}", Utc::now().timestamp_micros())
}

/// Outcomes of the placement protocol. `Overlap` and `OutOfBounds` are
/// expected, silent results: the drop simply does not commit and no state
/// changes. `InvalidPayload` flags malformed drop data.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("candidate interval overlaps an existing block or calendar event")]
    Overlap,
    #[error("block would end past the day's closing boundary")]
    OutOfBounds,
    #[error("invalid drop payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Store(#[from] PlannerError),
}

/// Validates and commits slot assignments. The only component permitted to
/// mutate the block repository.
pub struct PlacementEngine<B, C>
where
    B: BlockRepository,
    C: CalendarEventSource,
{
    blocks: Arc<B>,
    calendar: Arc<C>,
    day_close_minute: u16,
}

impl<B, C> PlacementEngine<B, C>
where
    B: BlockRepository,
    C: CalendarEventSource,
{
    pub fn new(blocks: Arc<B>, calendar: Arc<C>, config: &PlannerConfig) -> Self {
        Self {
            blocks,
            calendar,
            day_close_minute: config.day_close_minute,
        }
    }

    /// Commits a drop gesture: a fresh card placement, or a relocation when
    /// `source_block_id` is set. Rejection is total and atomic; on any error
    /// no block is created or moved.
    pub fn place(
        &self,
        date: NaiveDate,
        slot_start: u16,
        payload: &DropPayload,
    ) -> Result<TimeBlock, PlacementError> {
        payload
            .validate()
            .map_err(PlacementError::InvalidPayload)?;
        if slot_start >= MINUTES_PER_DAY {
            return Err(PlacementError::InvalidPayload(format!(
                "slot_start must be in 0-1439, got {slot_start}"
            )));
        }

        let end = slot_start as u32 + payload.duration_minutes();
        // A tiny positive duration can round to zero minutes; a degenerate
        // candidate must never reach the overlap predicate.
        if end <= slot_start as u32 {
            return Err(PlacementError::InvalidPayload(
                "duration rounds to zero minutes".to_string(),
            ));
        }
        if end > self.day_close_minute as u32 {
            return Err(PlacementError::OutOfBounds);
        }
        let candidate = MinuteInterval::new(slot_start, end as u16);

        let existing = self.blocks.list(date)?;
        // The moved block must not collide with itself; excluding by id also
        // tolerates a source that was already removed.
        let source_block_id = payload.source_block_id.as_deref();
        let conflicting_block = existing
            .iter()
            .filter(|block| Some(block.id.as_str()) != source_block_id)
            .any(|block| candidate.overlaps(&block.interval()));
        if conflicting_block {
            return Err(PlacementError::Overlap);
        }

        let events = self.calendar.events_on(date)?;
        if events
            .iter()
            .any(|event| candidate.overlaps(&event.interval()))
        {
            return Err(PlacementError::Overlap);
        }

        if let Some(source_id) = source_block_id {
            self.blocks.remove(date, source_id)?;
        }

        let block = TimeBlock {
            id: next_id("blk"),
            date,
            start_minute: candidate.start,
            end_minute: candidate.end,
            kind: payload.kind,
            activity_ref: payload.activity_ref.clone(),
            title: payload.title.clone(),
            notes: payload
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToOwned::to_owned),
        };
        self.blocks.insert(block.clone())?;
        Ok(block)
    }

    /// Unconditional, idempotent delete.
    pub fn remove(&self, date: NaiveDate, block_id: &str) -> Result<(), PlannerError> {
        self.blocks.remove(date, block_id)
    }
}
