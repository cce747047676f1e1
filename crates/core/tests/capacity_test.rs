mod common;

use common::{at, block, crew, date, day_block};
use crewsync_core::{CapacityOptions, aggregate_capacity, summarize_by_crew};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn window(first: u32, last: u32) -> CapacityOptions {
    CapacityOptions {
        window_start: Some(date(2024, 3, first)),
        window_end: Some(date(2024, 3, last)),
        ..CapacityOptions::default()
    }
}

#[rstest]
#[case(1, 1)]
#[case(3, 7)]
#[case(0, 5)]
fn test_grid_has_one_row_per_crew_and_day(#[case] crew_count: i64, #[case] days: u32) {
    let crews: Vec<_> = (1..=crew_count).map(|id| crew(id, "Crew", None, &[])).collect();
    let rows = aggregate_capacity(&[], &crews, &window(1, days));

    assert_eq!(rows.len(), crew_count as usize * days as usize);
    assert!(rows.iter().all(|r| r.scheduled_hours == 0.0 && !r.over_capacity));
}

#[test]
fn test_no_window_no_rows() {
    let crews = vec![crew(1, "Alpha", None, &[])];
    assert!(aggregate_capacity(&[], &crews, &CapacityOptions::default()).is_empty());
}

#[test]
fn test_rows_are_ordered_by_day_then_roster() {
    let crews = vec![crew(9, "Zulu", None, &[]), crew(1, "Alpha", None, &[])];
    let rows = aggregate_capacity(&[], &crews, &window(4, 5));

    let keys: Vec<_> = rows.iter().map(|r| (r.date, r.crew_id)).collect();
    assert_eq!(
        keys,
        vec![
            (date(2024, 3, 4), 9),
            (date(2024, 3, 4), 1),
            (date(2024, 3, 5), 9),
            (date(2024, 3, 5), 1),
        ]
    );
}

#[test]
fn test_overlapping_planned_hours_are_summed_not_trimmed() {
    let crews = vec![crew(1, "Alpha", Some(8.0), &[])];
    let blocks = vec![
        day_block("sched-1", 1, (8, 0), (12, 0)),
        day_block("sched-2", 1, (11, 0), (15, 0)),
    ];
    let rows = aggregate_capacity(&blocks, &crews, &CapacityOptions::default());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].scheduled_hours, 8.0);
    assert!(!rows[0].over_capacity);
}

#[test]
fn test_derived_window_and_capacity_defaults() {
    let crews = vec![crew(1, "Alpha", None, &[]), crew(2, "Bravo", Some(6.0), &[])];
    let blocks = vec![
        block("fcst-1", Some(2), at(date(2024, 1, 1), 8, 0), at(date(2024, 1, 3), 17, 0), 24.0),
        block("sched-1", Some(1), at(date(2024, 1, 2), 8, 0), at(date(2024, 1, 2), 18, 0), 10.0),
        block("sched-2", None, at(date(2024, 1, 2), 8, 0), at(date(2024, 1, 2), 18, 0), 10.0),
    ];
    let rows = aggregate_capacity(&blocks, &crews, &CapacityOptions::default());

    assert_eq!(rows.len(), 6);
    let scheduled: Vec<_> = rows.iter().map(|r| (r.crew_id, r.scheduled_hours, r.over_capacity)).collect();
    assert_eq!(
        scheduled,
        vec![
            (1, 0.0, false),
            (2, 16.0, true),
            (1, 10.0, true),
            (2, 24.0, true),
            (1, 0.0, false),
            (2, 17.0, true),
        ]
    );
    assert_eq!(rows[0].capacity_hours, 8.0);
    assert_eq!(rows[1].capacity_hours, 6.0);
}

#[test]
fn test_explicit_window_clips_days() {
    let crews = vec![crew(1, "Alpha", None, &[])];
    let blocks = vec![day_block("sched-1", 1, (8, 0), (12, 0))];

    let rows = aggregate_capacity(&blocks, &crews, &window(5, 6));
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.scheduled_hours == 0.0));
}

#[test]
fn test_summaries_match_grid() {
    let crews = vec![crew(1, "Alpha", None, &[]), crew(2, "Bravo", None, &[])];
    let blocks = vec![
        day_block("sched-1", 1, (6, 0), (16, 0)),
        day_block("sched-2", 2, (8, 0), (10, 0)),
    ];
    let rows = aggregate_capacity(&blocks, &crews, &window(3, 4));
    let summaries = summarize_by_crew(&rows);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].crew_id, 1);
    assert_eq!(summaries[0].days, 2);
    assert_eq!(summaries[0].capacity_hours, 16.0);
    assert_eq!(summaries[0].scheduled_hours, 10.0);
    assert_eq!(summaries[0].over_capacity_days, 1);
    assert_eq!(summaries[1].scheduled_hours, 2.0);
    assert_eq!(summaries[1].over_capacity_days, 0);
}
