use crate::domain::models::{Project, Routine, Task};
use crate::infrastructure::error::PlannerError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

/// Read-only snapshots of the externally-owned schedulable entities. The
/// CRUD lifecycle of projects, routines, and tasks lives outside this crate;
/// the scheduler only reads their scheduling-relevant fields.
pub trait ActivityStore: Send + Sync {
    fn projects(&self) -> Result<Vec<Project>, PlannerError>;
    fn routines(&self) -> Result<Vec<Routine>, PlannerError>;
    fn tasks_on(&self, date: NaiveDate) -> Result<Vec<Task>, PlannerError>;
}

#[derive(Debug, Default)]
pub struct InMemoryActivityStore {
    projects: Mutex<Vec<Project>>,
    routines: Mutex<Vec<Routine>>,
    tasks: Mutex<HashMap<NaiveDate, Vec<Task>>>,
}

impl InMemoryActivityStore {
    pub fn set_projects(&self, projects: Vec<Project>) -> Result<(), PlannerError> {
        for project in &projects {
            project.validate().map_err(PlannerError::InvalidInput)?;
        }
        let mut current = self
            .projects
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("activity store lock poisoned: {error}")))?;
        *current = projects;
        Ok(())
    }

    pub fn set_routines(&self, routines: Vec<Routine>) -> Result<(), PlannerError> {
        for routine in &routines {
            routine.validate().map_err(PlannerError::InvalidInput)?;
        }
        let mut current = self
            .routines
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("activity store lock poisoned: {error}")))?;
        *current = routines;
        Ok(())
    }

    pub fn set_tasks(&self, date: NaiveDate, tasks: Vec<Task>) -> Result<(), PlannerError> {
        for task in &tasks {
            task.validate().map_err(PlannerError::InvalidInput)?;
        }
        let mut current = self
            .tasks
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("activity store lock poisoned: {error}")))?;
        current.insert(date, tasks);
        Ok(())
    }
}

impl ActivityStore for InMemoryActivityStore {
    fn projects(&self) -> Result<Vec<Project>, PlannerError> {
        let projects = self
            .projects
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("activity store lock poisoned: {error}")))?;
        Ok(projects.clone())
    }

    fn routines(&self) -> Result<Vec<Routine>, PlannerError> {
        let routines = self
            .routines
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("activity store lock poisoned: {error}")))?;
        Ok(routines.clone())
    }

    fn tasks_on(&self, date: NaiveDate) -> Result<Vec<Task>, PlannerError> {
        let tasks = self
            .tasks
            .lock()
            .map_err(|error| PlannerError::InvalidInput(format!("activity store lock poisoned: {error}")))?;
        Ok(tasks.get(&date).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn snapshots_are_replaced_wholesale() {
        let store = InMemoryActivityStore::default();
        store
            .set_routines(vec![Routine {
                id: "rtn-1".to_string(),
                title: "🏋️ Gym".to_string(),
                weekdays: vec![1, 3, 5],
            }])
            .expect("set routines");
        store.set_routines(Vec::new()).expect("clear routines");
        assert!(store.routines().expect("routines").is_empty());
    }

    #[test]
    fn invalid_snapshot_rows_are_rejected_and_leave_state_untouched() {
        let store = InMemoryActivityStore::default();
        store
            .set_projects(vec![Project {
                id: "prj-1".to_string(),
                title: "Thesis".to_string(),
                start_date: fixed_date("2026-03-01"),
                end_date: fixed_date("2026-03-31"),
                weekday_allocation: HashMap::from([(1, 2.0)]),
                completed: false,
            }])
            .expect("set projects");

        // Weekday 7 is out of range.
        let result = store.set_projects(vec![Project {
            id: "prj-2".to_string(),
            title: "Broken".to_string(),
            start_date: fixed_date("2026-03-01"),
            end_date: fixed_date("2026-03-31"),
            weekday_allocation: HashMap::from([(7, 1.0)]),
            completed: false,
        }]);
        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));
        assert_eq!(store.projects().expect("projects")[0].id, "prj-1");

        let result = store.set_routines(vec![Routine {
            id: "rtn-1".to_string(),
            title: "  ".to_string(),
            weekdays: vec![1],
        }]);
        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));

        let result = store.set_tasks(
            fixed_date("2026-03-02"),
            vec![Task {
                id: String::new(),
                date: fixed_date("2026-03-02"),
                title: "Answer mail".to_string(),
                completed: false,
            }],
        );
        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn tasks_are_keyed_by_date() {
        let store = InMemoryActivityStore::default();
        store
            .set_tasks(
                fixed_date("2026-03-02"),
                vec![Task {
                    id: "tsk-1".to_string(),
                    date: fixed_date("2026-03-02"),
                    title: "Answer mail".to_string(),
                    completed: false,
                }],
            )
            .expect("set tasks");

        assert_eq!(store.tasks_on(fixed_date("2026-03-02")).expect("tasks").len(), 1);
        assert!(store.tasks_on(fixed_date("2026-03-03")).expect("tasks").is_empty());
    }
}
