// Unit tests for replay module
//
// Tests the core functionality of the replay engine including:
// - Loading JSONL log files
// - Replaying individual turns
// - Validating expected moves
// - Generating statistics

use cavern_snake::config::Config;
use cavern_snake::replay::ReplayEngine;
use cavern_snake::types::Direction;
use std::path::PathBuf;

/// Helper function to get the path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn engine() -> ReplayEngine {
    ReplayEngine::new(Config::default_hardcoded(), false)
}

#[test]
fn test_load_log_file_survival_basic() {
    let entries = engine()
        .load_log_file(fixture_path("survival_basic.jsonl"))
        .expect("Failed to load survival_basic.jsonl");

    assert_eq!(entries.len(), 2, "Expected 2 log entries");
    assert_eq!(entries[0].turn, 0, "First entry should be turn 0");
    assert_eq!(entries[0].chosen_move, "up", "First move should be up");
    assert_eq!(entries[1].turn, 1, "Second entry should be turn 1");
    assert_eq!(entries[1].chosen_move, "left", "Second move should be left");
    assert_eq!(
        entries[0].options,
        vec![Direction::Up, Direction::Left, Direction::Right]
    );
}

#[test]
fn test_load_log_file_collision_avoidance() {
    let entries = engine()
        .load_log_file(fixture_path("collision_avoidance.jsonl"))
        .expect("Failed to load collision_avoidance.jsonl");

    assert_eq!(entries.len(), 2, "Expected 2 log entries");
    assert_eq!(
        entries[0].board.snakes.len(),
        2,
        "Should have 2 snakes in collision scenario"
    );
}

#[test]
fn test_load_missing_file_fails() {
    assert!(engine().load_log_file(fixture_path("missing.jsonl")).is_err());
}

#[test]
fn test_replay_all_survival_basic_matches() {
    let engine = engine();
    let entries = engine.load_log_file(fixture_path("survival_basic.jsonl")).unwrap();
    let results = engine.replay_all(&entries).unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.matches));
    // Results keep log order
    assert_eq!(results[0].turn, 0);
    assert_eq!(results[1].turn, 1);
}

#[test]
fn test_replay_food_acquisition_is_deterministic() {
    let engine = engine();
    let entries = engine.load_log_file(fixture_path("food_acquisition.jsonl")).unwrap();
    let results = engine.replay_all(&entries).unwrap();

    for result in &results {
        assert!(result.matches, "turn {}", result.turn);
        assert_eq!(result.replayed_move, Direction::Right);
        assert_eq!(result.replayed_options, vec![Direction::Right]);
    }
}

#[test]
fn test_replay_flags_move_next_to_enemy_head() {
    let engine = engine();
    let entries = engine.load_log_file(fixture_path("collision_avoidance.jsonl")).unwrap();
    let results = engine.replay_all(&entries).unwrap();
    let stats = engine.generate_stats(&results);

    assert_eq!(stats.total_turns, 2);
    assert_eq!(stats.matches, 1);
    assert_eq!(stats.mismatches, 1);
    assert!(!results[1].matches, "right is next to the enemy head");
}

#[test]
fn test_replay_specific_turns() {
    let engine = engine();
    let entries = engine.load_log_file(fixture_path("food_acquisition.jsonl")).unwrap();

    let results = engine.replay_turns(&entries, &[1]).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].turn, 1);

    assert!(engine.replay_turns(&entries, &[42]).is_err());
}

#[test]
fn test_validate_expected_moves() {
    let engine = engine();
    let entries = engine.load_log_file(fixture_path("survival_basic.jsonl")).unwrap();

    assert!(engine
        .validate_expected_moves(&entries, &[(0, vec![Direction::Up])])
        .is_ok());
    assert!(engine
        .validate_expected_moves(&entries, &[(1, vec![Direction::Up, Direction::Left])])
        .is_ok());

    let err = engine
        .validate_expected_moves(&entries, &[(0, vec![Direction::Down])])
        .unwrap_err();
    assert!(err.contains("Turn 0"));
}
