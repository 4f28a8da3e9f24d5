use crate::domain::models::{ActivityCard, ActivityKind, Project, Routine, Task, TimeBlock};

const ROUTINE_CARD_HOURS: f64 = 1.0;
const TASK_CARD_HOURS: f64 = 0.5;

/// Cards not yet represented by a placed block, for one date.
///
/// Pure function of the catalog outputs and the current blocks; recomputed
/// from scratch on every call, no state carried between calls. Output is
/// grouped by kind (projects, routines, tasks) for presentation; order
/// beyond that is not contractual.
pub fn resolve_available_cards(
    projects: &[(Project, f64)],
    routines: &[Routine],
    tasks: &[Task],
    blocks: &[TimeBlock],
) -> Vec<ActivityCard> {
    let mut cards = Vec::new();

    for (project, planned_hours) in projects {
        cards.extend(project_cards(project, *planned_hours, blocks));
    }

    for routine in routines {
        let already_placed = blocks.iter().any(|block| {
            block.kind == ActivityKind::Routine && block.activity_ref == routine.id
        });
        if !already_placed {
            cards.push(ActivityCard {
                kind: ActivityKind::Routine,
                activity_ref: routine.id.clone(),
                title: routine.title.clone(),
                duration_hours: ROUTINE_CARD_HOURS,
                fragment_index: None,
            });
        }
    }

    for task in tasks {
        let already_placed = blocks
            .iter()
            .any(|block| block.kind == ActivityKind::Task && block.activity_ref == task.id);
        if !already_placed {
            cards.push(ActivityCard {
                kind: ActivityKind::Task,
                activity_ref: task.id.clone(),
                title: task.title.clone(),
                duration_hours: TASK_CARD_HOURS,
                fragment_index: None,
            });
        }
    }

    cards
}

/// Decomposes a project's daily allocation into full-hour fragments plus an
/// optional sub-hour remainder, then drops as many as there are placed
/// blocks. Placement consumes fragments by count, not by matching a
/// fragment's duration to a specific block, so placing the remainder first
/// does not confuse the count.
fn project_cards(project: &Project, planned_hours: f64, blocks: &[TimeBlock]) -> Vec<ActivityCard> {
    let full_hours = planned_hours.floor() as u32;
    let remainder = ((planned_hours - full_hours as f64) * 10.0).round() / 10.0;
    let total_fragments = full_hours + u32::from(remainder > 0.0);

    let placed = blocks
        .iter()
        .filter(|block| {
            block.kind == ActivityKind::Project && block.activity_ref == project.id
        })
        .count() as u32;

    let mut cards = Vec::new();
    for fragment_index in placed..full_hours {
        cards.push(ActivityCard {
            kind: ActivityKind::Project,
            activity_ref: project.id.clone(),
            title: project.title.clone(),
            duration_hours: 1.0,
            fragment_index: Some(fragment_index),
        });
    }
    if remainder > 0.0 && placed < total_fragments {
        cards.push(ActivityCard {
            kind: ActivityKind::Project,
            activity_ref: project.id.clone(),
            title: project.title.clone(),
            duration_hours: remainder,
            fragment_index: Some(full_hours),
        });
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn fixed_date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
    }

    fn sample_project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: "Thesis".to_string(),
            start_date: fixed_date("2026-03-01"),
            end_date: fixed_date("2026-03-31"),
            weekday_allocation: HashMap::from([(1, 2.5)]),
            completed: false,
        }
    }

    fn sample_routine(id: &str) -> Routine {
        Routine {
            id: id.to_string(),
            title: "🏋️ Gym".to_string(),
            weekdays: vec![1],
        }
    }

    fn sample_task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            date: fixed_date("2026-03-02"),
            title: "Answer mail".to_string(),
            completed: false,
        }
    }

    fn placed_block(id: &str, kind: ActivityKind, activity_ref: &str, start_minute: u16) -> TimeBlock {
        TimeBlock {
            id: id.to_string(),
            date: fixed_date("2026-03-02"),
            start_minute,
            end_minute: start_minute + 60,
            kind,
            activity_ref: activity_ref.to_string(),
            title: "placed".to_string(),
            notes: None,
        }
    }

    #[test]
    fn project_with_two_and_a_half_hours_yields_three_cards() {
        let cards =
            resolve_available_cards(&[(sample_project("prj-1"), 2.5)], &[], &[], &[]);
        assert_eq!(cards.len(), 3);

        let full: Vec<_> = cards.iter().filter(|card| card.duration_hours == 1.0).collect();
        assert_eq!(full.len(), 2);
        let remainder: Vec<_> = cards.iter().filter(|card| card.duration_hours == 0.5).collect();
        assert_eq!(remainder.len(), 1);
        assert_eq!(remainder[0].fragment_index, Some(2));
    }

    #[test]
    fn placed_blocks_consume_fragments_by_count() {
        let project = sample_project("prj-1");

        let one_placed = vec![placed_block("blk-1", ActivityKind::Project, "prj-1", 540)];
        let cards = resolve_available_cards(&[(project.clone(), 2.5)], &[], &[], &one_placed);
        assert_eq!(cards.len(), 2);
        assert_eq!(
            cards.iter().filter(|card| card.duration_hours == 1.0).count(),
            1
        );
        assert_eq!(
            cards.iter().filter(|card| card.duration_hours == 0.5).count(),
            1
        );

        let all_placed = vec![
            placed_block("blk-1", ActivityKind::Project, "prj-1", 540),
            placed_block("blk-2", ActivityKind::Project, "prj-1", 660),
            placed_block("blk-3", ActivityKind::Project, "prj-1", 780),
        ];
        let cards = resolve_available_cards(&[(project, 2.5)], &[], &[], &all_placed);
        assert!(cards.is_empty());
    }

    #[test]
    fn remainder_only_survives_partial_placement() {
        // 1.5h project: one full card placed leaves only the remainder.
        let project = sample_project("prj-1");
        let placed = vec![placed_block("blk-1", ActivityKind::Project, "prj-1", 540)];
        let cards = resolve_available_cards(&[(project, 1.5)], &[], &[], &placed);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].duration_hours, 0.5);
        assert_eq!(cards[0].fragment_index, Some(1));
    }

    #[test]
    fn whole_hour_allocation_has_no_remainder_card() {
        let cards = resolve_available_cards(&[(sample_project("prj-1"), 2.0)], &[], &[], &[]);
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|card| card.duration_hours == 1.0));
    }

    #[test]
    fn routine_card_emitted_once_until_placed() {
        let routine = sample_routine("rtn-1");
        let cards = resolve_available_cards(&[], &[routine.clone()], &[], &[]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].duration_hours, 1.0);
        assert_eq!(cards[0].fragment_index, None);

        let placed = vec![placed_block("blk-1", ActivityKind::Routine, "rtn-1", 420)];
        assert!(resolve_available_cards(&[], &[routine], &[], &placed).is_empty());
    }

    #[test]
    fn task_cards_are_half_an_hour() {
        let task = sample_task("tsk-1");
        let cards = resolve_available_cards(&[], &[], &[task.clone()], &[]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].duration_hours, 0.5);

        let placed = vec![placed_block("blk-1", ActivityKind::Task, "tsk-1", 900)];
        assert!(resolve_available_cards(&[], &[], &[task], &placed).is_empty());
    }

    #[test]
    fn matching_ref_of_another_kind_does_not_consume() {
        // A task block whose ref collides with a routine id must not hide
        // the routine card.
        let routine = sample_routine("shared-id");
        let placed = vec![placed_block("blk-1", ActivityKind::Task, "shared-id", 900)];
        let cards = resolve_available_cards(&[], &[routine], &[], &placed);
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn mixed_catalog_yields_one_card_per_source() {
        let cards = resolve_available_cards(
            &[(sample_project("prj-1"), 1.0)],
            &[sample_routine("rtn-1")],
            &[sample_task("tsk-1")],
            &[],
        );
        assert_eq!(cards.len(), 3);
        for kind in [ActivityKind::Project, ActivityKind::Routine, ActivityKind::Task] {
            assert_eq!(cards.iter().filter(|card| card.kind == kind).count(), 1);
        }
    }

    proptest! {
        // Outstanding cards plus placed blocks never exceed the total
        // fragment count, whatever was already placed.
        #[test]
        fn cards_plus_placed_never_exceed_total(half_hours in 1u32..=16, placed_count in 0u32..=20) {
            let planned_hours = half_hours as f64 * 0.5;
            let full_hours = planned_hours.floor() as u32;
            let remainder = ((planned_hours - full_hours as f64) * 10.0).round() / 10.0;
            let total = full_hours + u32::from(remainder > 0.0);

            let project = sample_project("prj-1");
            let placed: Vec<_> = (0..placed_count)
                .map(|index| {
                    placed_block(
                        &format!("blk-{index}"),
                        ActivityKind::Project,
                        "prj-1",
                        (index % 20) as u16 * 60,
                    )
                })
                .collect();

            let cards = resolve_available_cards(&[(project, planned_hours)], &[], &[], &placed);
            prop_assert_eq!(cards.len() as u32, total.saturating_sub(placed_count));
            prop_assert!(cards.len() as u32 + placed_count.min(total) <= total);
        }
    }
}
