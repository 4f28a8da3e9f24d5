use crate::infrastructure::block_repository::BlockRepository;
use crate::infrastructure::error::PlannerError;
use crate::infrastructure::snapshot::PlannerSnapshot;
use crate::infrastructure::state_store::StateStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    Saved,
    /// A flush was already in flight; this trigger was dropped, not queued.
    Skipped,
}

/// Best-effort background persistence of the whole block collection.
///
/// Flushing sits outside the scheduler's transactional boundary: mutations
/// commit in memory immediately and a failed save never rolls them back.
/// The caller logs the `Sync` error and retries on the next periodic or
/// manual trigger.
pub struct StateSyncService<S, B>
where
    S: StateStore,
    B: BlockRepository,
{
    store: Arc<S>,
    blocks: Arc<B>,
    in_flight: AtomicBool,
}

impl<S, B> StateSyncService<S, B>
where
    S: StateStore,
    B: BlockRepository,
{
    pub fn new(store: Arc<S>, blocks: Arc<B>) -> Self {
        Self {
            store,
            blocks,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Saves the current snapshot unless a save is already pending.
    pub async fn try_flush(&self) -> Result<FlushOutcome, PlannerError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(FlushOutcome::Skipped);
        }

        let result = self.flush_inner().await;
        self.in_flight.store(false, Ordering::SeqCst);
        result.map(|_| FlushOutcome::Saved)
    }

    async fn flush_inner(&self) -> Result<(), PlannerError> {
        let blocks = self.blocks.snapshot()?;
        let snapshot = PlannerSnapshot::from_blocks(&blocks);
        self.store
            .save(&snapshot)
            .await
            .map_err(|error| PlannerError::Sync(format!("state save failed: {error}")))
    }

    /// Spawns the background flush loop, ticking at the configured
    /// auto-save cadence (`PlannerConfig::auto_save_interval_secs`). Each
    /// tick is a best-effort `try_flush`; failures wait for the next tick.
    /// Runs until the handle is aborted.
    pub fn spawn_auto_save(self: &Arc<Self>, period: Duration) -> JoinHandle<()>
    where
        S: 'static,
        B: 'static,
    {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the first
            // save lands one full period after startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let _ = service.try_flush().await;
            }
        })
    }

    /// Loads the persisted snapshot into the repository, replacing whatever
    /// is there. Used once on startup; absent state is not an error.
    pub async fn restore(&self) -> Result<bool, PlannerError> {
        let Some(snapshot) = self.store.load().await? else {
            return Ok(false);
        };
        let blocks = snapshot.into_blocks()?;
        self.blocks.replace_all(blocks)?;
        Ok(true)
    }
}
