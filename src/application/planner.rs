use crate::application::availability::resolve_available_cards;
use crate::application::bootstrap::bootstrap_workspace;
use crate::application::catalog::CatalogService;
use crate::application::placement::{PlacementEngine, PlacementError};
use crate::domain::models::{ActivityCard, DropPayload, TimeBlock};
use crate::infrastructure::activity_store::InMemoryActivityStore;
use crate::infrastructure::block_repository::{BlockRepository, InMemoryBlockRepository};
use crate::infrastructure::calendar_source::InMemoryCalendarEventSource;
use crate::infrastructure::config::PlannerConfig;
use crate::infrastructure::error::PlannerError;
use crate::infrastructure::snapshot::PlannerSnapshot;
use chrono::{NaiveDate, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// UI-facing surface of the scheduler core: wires the in-memory stores, the
/// catalog view, and the placement engine together, and logs every
/// operation.
pub struct Planner {
    blocks: Arc<InMemoryBlockRepository>,
    calendar: Arc<InMemoryCalendarEventSource>,
    activities: Arc<InMemoryActivityStore>,
    catalog: CatalogService<InMemoryActivityStore, InMemoryCalendarEventSource>,
    engine: PlacementEngine<InMemoryBlockRepository, InMemoryCalendarEventSource>,
    config: PlannerConfig,
    logs_dir: PathBuf,
    log_guard: Mutex<()>,
}

impl Planner {
    pub fn new(workspace_root: &Path) -> Result<Self, PlannerError> {
        let bootstrap = bootstrap_workspace(workspace_root)?;
        Ok(Self::with_config(bootstrap.config, bootstrap.logs_dir))
    }

    pub fn with_config(config: PlannerConfig, logs_dir: PathBuf) -> Self {
        let blocks = Arc::new(InMemoryBlockRepository::default());
        let calendar = Arc::new(InMemoryCalendarEventSource::default());
        let activities = Arc::new(InMemoryActivityStore::default());
        let catalog = CatalogService::new(Arc::clone(&activities), Arc::clone(&calendar));
        let engine = PlacementEngine::new(Arc::clone(&blocks), Arc::clone(&calendar), &config);

        Self {
            blocks,
            calendar,
            activities,
            catalog,
            engine,
            config,
            logs_dir,
            log_guard: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Shared handles for the collaborators that feed this planner: the
    /// calendar fetch glue and the catalog CRUD layer replace snapshots
    /// through these, the persistence layer flushes through the block
    /// repository.
    pub fn block_repository(&self) -> Arc<InMemoryBlockRepository> {
        Arc::clone(&self.blocks)
    }

    pub fn calendar_source(&self) -> Arc<InMemoryCalendarEventSource> {
        Arc::clone(&self.calendar)
    }

    pub fn activity_store(&self) -> Arc<InMemoryActivityStore> {
        Arc::clone(&self.activities)
    }

    /// Cards still awaiting placement on the date, derived fresh each call.
    pub fn available_cards(&self, date: NaiveDate) -> Result<Vec<ActivityCard>, PlannerError> {
        let projects = self.catalog.projects_scheduled_on(date)?;
        let routines = self.catalog.routines_scheduled_on(date)?;
        let tasks = self.catalog.incomplete_tasks_on(date)?;
        let blocks = self.blocks.list(date)?;

        let cards = resolve_available_cards(&projects, &routines, &tasks, &blocks);
        self.log_info(
            "available_cards",
            &format!("date={date} cards={}", cards.len()),
        );
        Ok(cards)
    }

    /// Commits a drop gesture. Overlap and out-of-bounds rejections are
    /// ordinary outcomes; they are logged and returned, never raised.
    pub fn place(
        &self,
        date: NaiveDate,
        slot_start: u16,
        payload: &DropPayload,
    ) -> Result<TimeBlock, PlacementError> {
        match self.engine.place(date, slot_start, payload) {
            Ok(block) => {
                self.log_info(
                    "place",
                    &format!(
                        "date={date} block_id={} start={} end={}",
                        block.id, block.start_minute, block.end_minute
                    ),
                );
                Ok(block)
            }
            Err(error) => {
                match &error {
                    PlacementError::Overlap | PlacementError::OutOfBounds => {
                        self.log_info("place", &format!("date={date} rejected: {error}"));
                    }
                    PlacementError::InvalidPayload(_) | PlacementError::Store(_) => {
                        self.log_error("place", &format!("date={date} failed: {error}"));
                    }
                }
                Err(error)
            }
        }
    }

    pub fn remove_block(&self, date: NaiveDate, block_id: &str) -> Result<(), PlannerError> {
        self.engine.remove(date, block_id)?;
        self.log_info("remove_block", &format!("date={date} block_id={block_id}"));
        Ok(())
    }

    pub fn list_blocks(&self, date: NaiveDate) -> Result<Vec<TimeBlock>, PlannerError> {
        let mut blocks = self.blocks.list(date)?;
        blocks.sort_by_key(|block| block.start_minute);
        Ok(blocks)
    }

    /// The whole block collection as the flat wire snapshot handed to the
    /// persistence layer.
    pub fn snapshot(&self) -> Result<PlannerSnapshot, PlannerError> {
        let blocks = self.blocks.snapshot()?;
        Ok(PlannerSnapshot::from_blocks(&blocks))
    }

    pub fn log_info(&self, operation: &str, message: &str) {
        self.append_log("info", operation, message);
    }

    pub fn log_error(&self, operation: &str, message: &str) {
        self.append_log("error", operation, message);
    }

    fn append_log(&self, level: &str, operation: &str, message: &str) {
        let Ok(_guard) = self.log_guard.lock() else {
            return;
        };
        let path = self.logs_dir.join("planner.log");
        let payload = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "operation": operation,
            "message": message,
        });

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{}", payload);
        }
    }
}
