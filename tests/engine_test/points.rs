//! Points calculator and award properties

use woofadaar_points::gamification::{ContextFlags, RegionalContext};

use super::common::{default_engine, engine_from_toml};

const SMALL_CATALOG: &str = r#"
[actions]
questionPost = 10
bestAnswer = 50

[levels]
thresholds = [0, 100, 250, 500, 1000]
"#;

fn all_flag_combinations() -> Vec<ContextFlags> {
    (0u8..128)
        .map(|bits| ContextFlags {
            is_new_user: bits & 1 != 0,
            is_premium: bits & 2 != 0,
            is_expert: bits & 4 != 0,
            is_community_leader: bits & 8 != 0,
            is_festival_period: bits & 16 != 0,
            is_weekend: bits & 32 != 0,
            is_birthday_month: bits & 64 != 0,
        })
        .collect()
}

#[test]
fn test_best_answer_expert_during_festival() {
    let engine = default_engine();
    let flags = ContextFlags {
        is_expert: true,
        is_festival_period: true,
        ..Default::default()
    };

    let award = engine.calculate_points("bestAnswer", &flags).unwrap();
    assert_eq!(award.points, 130);
    assert_eq!(award.multiplier, 2.6);
}

#[test]
fn test_no_flags_is_base_points() {
    let engine = default_engine();
    for (action, base) in engine.catalog().actions().iter() {
        let award = engine
            .calculate_points(action, &ContextFlags::default())
            .unwrap();
        assert_eq!(award.points, base, "{action}");
        assert_eq!(award.multiplier, 1.0);
    }
}

#[test]
fn test_multiplier_is_product_of_active_factors() {
    let engine = default_engine();
    let m = *engine.catalog().multipliers();

    for flags in all_flag_combinations() {
        let mut expected = 1.0;
        for (active, factor) in [
            (flags.is_new_user, m.new_user),
            (flags.is_premium, m.premium),
            (flags.is_expert, m.expert),
            (flags.is_community_leader, m.community_leader),
            (flags.is_festival_period, m.festival_period),
            (flags.is_weekend, m.weekend),
            (flags.is_birthday_month, m.birthday_month),
        ] {
            if active {
                expected *= factor;
            }
        }

        let award = engine.calculate_points("questionPost", &flags).unwrap();
        assert!(
            (award.multiplier - expected).abs() < 0.006,
            "{flags:?}: {} vs {expected}",
            award.multiplier
        );
        assert!(
            (award.points as f64 - 10.0 * expected).abs() <= 0.5 + 1e-9,
            "{flags:?}: {} points",
            award.points
        );
    }
}

#[test]
fn test_more_flags_never_lower_the_award() {
    let engine = default_engine();
    let base = engine
        .calculate_points("answerPost", &ContextFlags::default())
        .unwrap()
        .points;

    for flags in all_flag_combinations() {
        let award = engine.calculate_points("answerPost", &flags).unwrap();
        assert!(award.points >= base);
    }
}

#[test]
fn test_unknown_action_is_an_error() {
    let engine = default_engine();

    let err = engine
        .calculate_points("bestAnswr", &ContextFlags::default())
        .unwrap_err();
    assert_eq!(err.action, "bestAnswr");
    assert_eq!(err.suggestion.as_deref(), Some("bestAnswer"));

    let err = engine
        .award_points(
            "",
            &ContextFlags::default(),
            &RegionalContext::default(),
            0,
        )
        .unwrap_err();
    assert!(err.to_string().starts_with("Unknown action"));
}

#[test]
fn test_award_crosses_level_boundary() {
    let engine = engine_from_toml(SMALL_CATALOG);

    let result = engine
        .award_points(
            "bestAnswer",
            &ContextFlags::default(),
            &RegionalContext::default(),
            80,
        )
        .unwrap();
    assert_eq!(result.points, 50);
    assert_eq!(result.new_total, 130);
    assert_eq!(result.new_level, 2);
    assert!(result.leveled_up);
    assert_eq!(result.points_to_next_level, 120);

    let result = engine
        .award_points(
            "questionPost",
            &ContextFlags::default(),
            &RegionalContext::default(),
            130,
        )
        .unwrap();
    assert!(!result.leveled_up);
    assert_eq!(result.new_level, 2);
}

#[test]
fn test_award_with_negative_balance() {
    let engine = engine_from_toml(SMALL_CATALOG);
    let result = engine
        .award_points(
            "questionPost",
            &ContextFlags::default(),
            &RegionalContext::default(),
            -40,
        )
        .unwrap();
    assert_eq!(result.new_total, 10);
    assert_eq!(result.new_level, 1);
    assert!(!result.leveled_up);
}

#[test]
fn test_regional_bonuses_stack() {
    let engine = default_engine();
    let region = RegionalContext {
        city: Some(" mumbai ".to_string()),
        festival: Some("Diwali".to_string()),
        breed: Some("Indian Pariah".to_string()),
    };

    let bonus = engine.regional_bonus(&region);
    assert!((bonus - 1.1 * 2.0 * 1.2).abs() < 1e-9);

    let result = engine
        .award_points("questionPost", &ContextFlags::default(), &region, 0)
        .unwrap();
    assert_eq!(result.points, 26);
    assert_eq!(result.multiplier, 2.64);
}

#[test]
fn test_unrecognized_region_is_neutral() {
    let engine = default_engine();
    let region = RegionalContext {
        city: Some("Shimla".to_string()),
        festival: Some("Unknown Fest".to_string()),
        breed: Some("Labrador Retriever".to_string()),
    };
    assert_eq!(engine.regional_bonus(&region), 1.0);
}
