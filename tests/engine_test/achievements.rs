//! Achievement and chain evaluation properties

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate};

use woofadaar_points::gamification::{GamificationEvent, UserStatsSnapshot};

use super::common::{default_engine, engine_from_toml, stats, today};

const FORUM_CATALOG: &str = r#"
[actions]
forumPost = 8

[levels]
thresholds = [0, 100]

[[achievement]]
id = "firstPost"
name = "First Post"
description = "Write your first forum post"
category = "social"
rarity = "common"
condition = { type = "count", target = 1, metric = "totalPosts" }

[[achievement]]
id = "secretSniffer"
name = "Secret Sniffer"
description = "Find the hidden forum"
category = "special"
rarity = "legendary"
hidden = true
condition = { type = "special", target = 1, metric = "hidden_forum_visits" }

[[chain]]
id = "storyteller"
name = "Storyteller"
category = "social"
total_levels = 3

[[chain.levels]]
level = 1
name = "Storyteller I"
rarity = "common"
points_reward = 5
condition = { type = "count", target = 1, metric = "totalPosts" }

[[chain.levels]]
level = 2
name = "Storyteller II"
rarity = "rare"
points_reward = 15
condition = { type = "count", target = 10, metric = "totalPosts" }

[[chain.levels]]
level = 3
name = "Storyteller III"
rarity = "epic"
points_reward = 40
condition = { type = "count", target = 100, metric = "totalPosts" }
"#;

#[test]
fn test_first_post_scenario() {
    let engine = engine_from_toml(FORUM_CATALOG);
    let none = HashSet::new();

    assert!(engine
        .evaluate_achievements(&stats(&[("totalPosts", 0)]), &none)
        .is_empty());
    assert_eq!(
        engine.evaluate_achievements(&stats(&[("totalPosts", 1)]), &none),
        vec!["firstPost".to_string()]
    );
}

#[test]
fn test_unlock_is_idempotent() {
    let engine = engine_from_toml(FORUM_CATALOG);
    let snapshot = stats(&[("totalPosts", 5), ("hidden_forum_visits", 2)]);

    let mut unlocked = HashSet::new();
    let first = engine.evaluate_achievements(&snapshot, &unlocked);
    assert_eq!(first.len(), 2);
    unlocked.extend(first);

    assert!(engine.evaluate_achievements(&snapshot, &unlocked).is_empty());
}

#[test]
fn test_evaluation_does_not_touch_snapshot() {
    let engine = default_engine();
    let snapshot = stats(&[("total_answers", 12), ("health_logs", 30)]);
    let before = snapshot.clone();

    engine.evaluate_chain_progress("u1", &snapshot, &HashMap::new(), &HashSet::new());
    assert_eq!(snapshot, before);
}

#[test]
fn test_hidden_achievements_are_partitioned() {
    let engine = engine_from_toml(FORUM_CATALOG);
    let snapshot = stats(&[("totalPosts", 1), ("hidden_forum_visits", 1)]);

    let progress =
        engine.evaluate_chain_progress("u1", &snapshot, &HashMap::new(), &HashSet::new());
    assert_eq!(progress.new_achievements, vec!["firstPost".to_string()]);
    assert_eq!(progress.discovered_hidden, vec!["secretSniffer".to_string()]);

    let events = engine.progress_events(&progress);
    assert!(events.contains(&GamificationEvent::AchievementUnlocked {
        id: "secretSniffer".to_string(),
        name: "Secret Sniffer".to_string(),
        hidden: true,
    }));
}

#[test]
fn test_chain_advances_one_level_per_evaluation() {
    let engine = engine_from_toml(FORUM_CATALOG);
    let snapshot = stats(&[("totalPosts", 500)]);
    let none = HashSet::new();
    let mut levels = HashMap::new();

    for expected in 1..=3 {
        let progress = engine.evaluate_chain_progress("u1", &snapshot, &levels, &none);
        assert_eq!(progress.level_ups.len(), 1);
        let up = &progress.level_ups[0];
        assert_eq!(up.new_level, expected);
        assert_eq!(up.completed, expected == 3);
        levels.insert(up.chain_id.clone(), up.new_level);
    }

    let progress = engine.evaluate_chain_progress("u1", &snapshot, &levels, &none);
    assert!(progress.level_ups.is_empty());
}

#[test]
fn test_chain_waits_for_next_condition() {
    let engine = engine_from_toml(FORUM_CATALOG);
    let levels = HashMap::from([("storyteller".to_string(), 1)]);

    let progress = engine.evaluate_chain_progress(
        "u1",
        &stats(&[("totalPosts", 9)]),
        &levels,
        &HashSet::new(),
    );
    assert!(progress.level_ups.is_empty());
}

#[test]
fn test_chain_completion_event() {
    let engine = engine_from_toml(FORUM_CATALOG);
    let levels = HashMap::from([("storyteller".to_string(), 2)]);
    let progress = engine.evaluate_chain_progress(
        "u1",
        &stats(&[("totalPosts", 100)]),
        &levels,
        &HashSet::from(["firstPost".to_string()]),
    );

    let events = engine.progress_events(&progress);
    assert!(events.contains(&GamificationEvent::ChainCompleted {
        chain_id: "storyteller".to_string()
    }));
    assert_eq!(engine.progress_points(&progress), 40);
}

#[test]
fn test_membership_date_metric() {
    let engine = default_engine();
    let joined = today().checked_sub_days(Days::new(400)).unwrap();
    let snapshot = UserStatsSnapshot::builder(today())
        .date("member_since", joined)
        .build();

    let unlocked = engine.evaluate_achievements(&snapshot, &HashSet::new());
    assert!(unlocked.contains(&"oneYearMember".to_string()));

    let progress =
        engine.evaluate_chain_progress("u1", &snapshot, &HashMap::new(), &HashSet::new());
    let loyal = progress
        .level_ups
        .iter()
        .find(|l| l.chain_id == "loyalMember")
        .unwrap();
    assert_eq!(loyal.new_level, 1);
}

#[test]
fn test_future_date_counts_as_zero_days() {
    let engine = default_engine();
    let snapshot = UserStatsSnapshot::builder(today())
        .date("member_since", NaiveDate::from_ymd_opt(2027, 1, 1).unwrap())
        .build();
    assert_eq!(snapshot.value("member_since"), 0.0);
    assert!(!engine
        .evaluate_achievements(&snapshot, &HashSet::new())
        .contains(&"oneYearMember".to_string()));
}

#[test]
fn test_streak_metric_from_activity_days() {
    let engine = default_engine();
    let days: Vec<NaiveDate> = (0..7)
        .map(|i| today().checked_sub_days(Days::new(i)).unwrap())
        .collect();

    let snapshot = UserStatsSnapshot::builder(today())
        .streak("streak_days", &days)
        .build();
    let unlocked = engine.evaluate_achievements(&snapshot, &HashSet::new());
    assert!(unlocked.contains(&"loginStreak7".to_string()));

    // Same days, seen after the streak has lapsed
    let later = today().checked_add_days(Days::new(3)).unwrap();
    let snapshot = UserStatsSnapshot::builder(later)
        .streak("streak_days", &days)
        .build();
    assert_eq!(snapshot.value("streak_days"), 0.0);
}
