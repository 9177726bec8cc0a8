// Integration test for trapped snake fallback behavior
//
// When a snake has NO legal moves (completely boxed in), the pipeline must
// still answer with a direction. Every option is fatal, so it is picked at
// random from all four.

mod common;

use cavern_snake::bot::Bot;
use cavern_snake::config::Config;
use cavern_snake::pipeline::MovePipeline;
use cavern_snake::types::Direction;
use common::{board, game, snake};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Head in the corner, own neck above, enemy head beside
fn boxed_in() -> (cavern_snake::types::Board, cavern_snake::types::Battlesnake) {
    let me = snake("our-snake", 50, &[(0, 0), (0, 1), (1, 1), (2, 1)]);
    let enemy = snake("opponent", 50, &[(1, 0), (2, 0), (3, 0)]);
    (board(11, 11, vec![me.clone(), enemy], &[]), me)
}

#[test]
fn test_trapped_snake_still_gets_a_direction() {
    let config = Config::default_hardcoded();
    let pipeline = MovePipeline::new(&config.pipeline);
    let (board, me) = boxed_in();

    let decision = pipeline.decide(&board, &me, &mut StdRng::seed_from_u64(0)).unwrap();

    assert!(decision.forced);
    assert!(decision.options.is_empty());
    assert_eq!(decision.stages.len(), 1, "only legality runs when nothing is legal");
}

#[test]
fn test_forced_move_is_drawn_from_all_four_directions() {
    let config = Config::default_hardcoded();
    let pipeline = MovePipeline::new(&config.pipeline);
    let (board, me) = boxed_in();

    let seen: HashSet<Direction> = (0..200)
        .map(|seed| {
            pipeline
                .decide(&board, &me, &mut StdRng::seed_from_u64(seed))
                .unwrap()
                .direction
        })
        .collect();

    assert_eq!(seen.len(), 4, "forced moves should cover every direction: {:?}", seen);
}

#[test]
fn test_bot_answers_when_trapped() {
    let bot = Bot::new(Config::default_hardcoded());
    let (board, me) = boxed_in();

    let response = bot.get_move(&game(), &12, &board, &me).unwrap();
    let chosen = response["move"].as_str().unwrap();

    assert!(["up", "down", "left", "right"].contains(&chosen));
}
