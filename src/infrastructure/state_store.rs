use crate::infrastructure::error::PlannerError;
use crate::infrastructure::snapshot::PlannerSnapshot;
use async_trait::async_trait;
use std::sync::Mutex;

/// Remote whole-state persistence collaborator. Network-bound in
/// production; the planner only depends on this seam.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn save(&self, snapshot: &PlannerSnapshot) -> Result<(), PlannerError>;
    async fn load(&self) -> Result<Option<PlannerSnapshot>, PlannerError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    snapshot: Mutex<Option<PlannerSnapshot>>,
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn save(&self, snapshot: &PlannerSnapshot) -> Result<(), PlannerError> {
        let mut current = self
            .snapshot
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("state store lock poisoned: {error}")))?;
        *current = Some(snapshot.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<PlannerSnapshot>, PlannerError> {
        let current = self
            .snapshot
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("state store lock poisoned: {error}")))?;
        Ok(current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load_returns_the_snapshot() {
        let store = InMemoryStateStore::default();
        assert!(store.load().await.expect("load").is_none());

        let snapshot = PlannerSnapshot::default();
        store.save(&snapshot).await.expect("save");
        assert_eq!(store.load().await.expect("load"), Some(snapshot));
    }
}
