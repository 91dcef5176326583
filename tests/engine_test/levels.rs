//! Level resolution properties

use super::common::{default_engine, engine_from_toml};

#[test]
fn test_750_points_is_level_four() {
    let engine = default_engine();
    let level = engine.resolve_level(750);
    assert_eq!(level.level, 4);
    assert_eq!(level.points_to_next, 250);
    assert_eq!(level.next_threshold, 1000);
}

#[test]
fn test_exact_threshold_reaches_level() {
    let engine = default_engine();
    assert_eq!(engine.resolve_level(99).level, 1);
    assert_eq!(engine.resolve_level(100).level, 2);
    assert_eq!(engine.resolve_level(100).points_to_next, 150);
    assert_eq!(engine.resolve_level(12_000).level, 10);
}

#[test]
fn test_level_is_monotonic_in_points() {
    let engine = default_engine();
    let mut previous = engine.resolve_level(0);
    for points in (0..40_000).step_by(37) {
        let current = engine.resolve_level(points);
        assert!(current.level >= previous.level, "{points}");
        assert!(current.points_to_next > 0, "{points}");
        previous = current;
    }
}

#[test]
fn test_negative_total_is_level_one() {
    let engine = default_engine();
    let level = engine.resolve_level(-250);
    assert_eq!(level.level, 1);
    assert_eq!(level.total_points, 0);
    assert_eq!(level.points_to_next, 100);
}

#[test]
fn test_past_last_threshold_keeps_a_target() {
    let engine = default_engine();

    let level = engine.resolve_level(15_000);
    assert_eq!(level.level, 10);
    assert_eq!(level.next_threshold, 22_000);
    assert_eq!(level.points_to_next, 7_000);

    let level = engine.resolve_level(22_000);
    assert_eq!(level.next_threshold, 32_000);
}

#[test]
fn test_custom_overflow_step_and_titles() {
    let engine = engine_from_toml(
        r#"
        [actions]
        dailyLogin = 2

        [levels]
        thresholds = [0, 50]
        titles = ["Pup", "Dog"]
        overflow_step = 25
        "#,
    );

    let level = engine.resolve_level(60);
    assert_eq!(level.level, 2);
    assert_eq!(level.title, "Dog");
    assert_eq!(level.next_threshold, 75);
}

#[test]
fn test_level_change_reports_only_increases() {
    let engine = default_engine();
    assert!(engine.level_change(500, 400).is_none());
    assert!(engine.level_change(500, 999).is_none());

    let up = engine.level_change(999, 2_000).unwrap();
    assert_eq!(up.old_level, 4);
    assert_eq!(up.new_level, 6);
    assert_eq!(up.new_title, "Trusted Tail");
}
