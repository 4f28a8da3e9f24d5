use crate::domain::models::TimeBlock;
use crate::infrastructure::error::PlannerError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

/// Authoritative owner of placed time blocks, keyed by date then block id.
///
/// The repository performs no overlap validation: the placement engine is
/// the only writer and has already checked the no-overlap precondition.
pub trait BlockRepository: Send + Sync {
    /// All blocks for a date. Callers tolerate arbitrary order.
    fn list(&self, date: NaiveDate) -> Result<Vec<TimeBlock>, PlannerError>;
    fn insert(&self, block: TimeBlock) -> Result<(), PlannerError>;
    /// No-op when the block is absent.
    fn remove(&self, date: NaiveDate, block_id: &str) -> Result<(), PlannerError>;
    /// The full collection as a flat list, for the periodic whole-state save.
    fn snapshot(&self) -> Result<Vec<TimeBlock>, PlannerError>;
    /// Wholesale restore, used when loading persisted state on startup.
    fn replace_all(&self, blocks: Vec<TimeBlock>) -> Result<(), PlannerError>;
}

#[derive(Debug, Default)]
pub struct InMemoryBlockRepository {
    blocks: Mutex<HashMap<NaiveDate, HashMap<String, TimeBlock>>>,
}

impl InMemoryBlockRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<NaiveDate, HashMap<String, TimeBlock>>>, PlannerError>
    {
        self.blocks
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("block repository lock poisoned: {error}")))
    }
}

impl BlockRepository for InMemoryBlockRepository {
    fn list(&self, date: NaiveDate) -> Result<Vec<TimeBlock>, PlannerError> {
        let blocks = self.lock()?;
        Ok(blocks
            .get(&date)
            .map(|for_date| for_date.values().cloned().collect())
            .unwrap_or_default())
    }

    fn insert(&self, block: TimeBlock) -> Result<(), PlannerError> {
        let mut blocks = self.lock()?;
        blocks
            .entry(block.date)
            .or_default()
            .insert(block.id.clone(), block);
        Ok(())
    }

    fn remove(&self, date: NaiveDate, block_id: &str) -> Result<(), PlannerError> {
        let mut blocks = self.lock()?;
        if let Some(for_date) = blocks.get_mut(&date) {
            for_date.remove(block_id);
            if for_date.is_empty() {
                blocks.remove(&date);
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<TimeBlock>, PlannerError> {
        let blocks = self.lock()?;
        Ok(blocks
            .values()
            .flat_map(|for_date| for_date.values().cloned())
            .collect())
    }

    fn replace_all(&self, incoming: Vec<TimeBlock>) -> Result<(), PlannerError> {
        let mut blocks = self.lock()?;
        blocks.clear();
        for block in incoming {
            blocks
                .entry(block.date)
                .or_default()
                .insert(block.id.clone(), block);
        }
        Ok(())
    }
}
