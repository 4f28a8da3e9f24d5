use crate::domain::models::{CalendarEvent, Project, Routine, Task};
use crate::infrastructure::activity_store::ActivityStore;
use crate::infrastructure::calendar_source::CalendarEventSource;
use crate::infrastructure::error::PlannerError;
use chrono::NaiveDate;
use std::sync::Arc;

/// Date-scoped read view over the externally-owned catalog: which projects,
/// routines, and tasks are schedulable on a date, plus that date's calendar
/// events.
pub struct CatalogService<A, C>
where
    A: ActivityStore,
    C: CalendarEventSource,
{
    activities: Arc<A>,
    calendar: Arc<C>,
}

impl<A, C> CatalogService<A, C>
where
    A: ActivityStore,
    C: CalendarEventSource,
{
    pub fn new(activities: Arc<A>, calendar: Arc<C>) -> Self {
        Self {
            activities,
            calendar,
        }
    }

    /// Projects whose lifetime window contains the date (inclusive,
    /// date-only) and whose allocation grants hours to the date's weekday,
    /// excluding completed projects. Paired with their planned hours.
    pub fn projects_scheduled_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<(Project, f64)>, PlannerError> {
        let projects = self.activities.projects()?;
        Ok(projects
            .into_iter()
            .filter(|project| !project.completed)
            .filter(|project| project.start_date <= date && date <= project.end_date)
            .filter_map(|project| {
                let hours = project.planned_hours_on(date)?;
                (hours > 0.0).then_some((project, hours))
            })
            .collect())
    }

    pub fn routines_scheduled_on(&self, date: NaiveDate) -> Result<Vec<Routine>, PlannerError> {
        let routines = self.activities.routines()?;
        Ok(routines
            .into_iter()
            .filter(|routine| routine.applies_on(date))
            .collect())
    }

    pub fn incomplete_tasks_on(&self, date: NaiveDate) -> Result<Vec<Task>, PlannerError> {
        let tasks = self.activities.tasks_on(date)?;
        Ok(tasks.into_iter().filter(|task| !task.completed).collect())
    }

    pub fn calendar_events_on(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>, PlannerError> {
        self.calendar.events_on(date)
    }
}
