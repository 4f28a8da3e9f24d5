use crate::domain::models::CalendarEvent;
use crate::infrastructure::error::PlannerError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

/// Read-only view over the external calendar collaborator. Events are
/// already resolved and localized to the requested date; the planner never
/// creates, edits, or deletes them.
pub trait CalendarEventSource: Send + Sync {
    fn events_on(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>, PlannerError>;
}

/// Holds the most recently fetched events per date. The network fetch lives
/// outside this crate and replaces a day's events wholesale.
#[derive(Debug, Default)]
pub struct InMemoryCalendarEventSource {
    events: Mutex<HashMap<NaiveDate, Vec<CalendarEvent>>>,
}

impl InMemoryCalendarEventSource {
    pub fn set_events(
        &self,
        date: NaiveDate,
        events: Vec<CalendarEvent>,
    ) -> Result<(), PlannerError> {
        let mut all = self
            .events
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("calendar source lock poisoned: {error}")))?;
        all.insert(date, events);
        Ok(())
    }
}

impl CalendarEventSource for InMemoryCalendarEventSource {
    fn events_on(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>, PlannerError> {
        let all = self
            .events
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("calendar source lock poisoned: {error}")))?;
        Ok(all.get(&date).cloned().unwrap_or_default())
    }
}
