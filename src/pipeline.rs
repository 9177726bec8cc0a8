// Move filter pipeline
//
// Narrows the four moves around our head down to one:
//   legality -> enemy-head avoidance -> cavern maximization
//   -> food-seeking (hungry) -> space-folding (cramped) -> random tie-break
//
// Every stage after legality is fail-open: if it would leave nothing, the
// candidates it received pass through untouched. The whole pipeline is a pure
// function of the snapshot and the supplied RNG.

use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::cavern::{best_caverns, cavern_cap};
use crate::config::PipelineConfig;
use crate::geometry::{adjacent_cells, direction_of, in_bounds, non_lethal_neighbors, InvalidMoveError};
use crate::occupancy::Occupancy;
use crate::types::{Battlesnake, Board, Coord, Direction};

/// A cell next to our head, annotated as the stages run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub cell: Coord,
    pub cavern_size: usize,
    pub fold_priority: u32,
}

impl Candidate {
    pub fn at(cell: Coord) -> Self {
        Candidate {
            cell,
            cavern_size: 0,
            fold_priority: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Legality,
    HeadAvoidance,
    CavernMaximization,
    FoodSeeking,
    SpaceFolding,
    TieBreak,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Legality => "legality",
            Stage::HeadAvoidance => "head-avoidance",
            Stage::CavernMaximization => "cavern",
            Stage::FoodSeeking => "food",
            Stage::SpaceFolding => "folding",
            Stage::TieBreak => "tie-break",
        };
        f.write_str(name)
    }
}

/// What one stage did to the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub before: usize,
    pub after: usize,
    /// False when the stage was skipped by its trigger condition
    pub applied: bool,
}

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDecision {
    pub direction: Direction,
    /// Directions that survived to the tie-break
    pub options: Vec<Direction>,
    pub cavern_max: usize,
    /// No legal move existed and the direction was picked blindly
    pub forced: bool,
    pub stages: Vec<StageReport>,
}

/// Keeps `narrowed` unless it is empty, in which case `input` passes through
pub fn narrow_or_keep(input: Vec<Candidate>, narrowed: Vec<Candidate>) -> Vec<Candidate> {
    if narrowed.is_empty() {
        input
    } else {
        narrowed
    }
}

/// In-bounds cells next to the head that no body segment will occupy
pub fn legal_moves(head: &Coord, board: &Board, occupancy: &Occupancy) -> Vec<Candidate> {
    non_lethal_neighbors(head, board, occupancy)
        .into_iter()
        .map(Candidate::at)
        .collect()
}

/// Drops candidates another snake's head could also move into
pub fn avoid_enemy_heads(candidates: Vec<Candidate>, board: &Board, you_id: &str) -> Vec<Candidate> {
    let contested: HashSet<Coord> = board
        .snakes
        .iter()
        .filter(|snake| snake.id != you_id)
        .filter_map(|snake| snake.body.first())
        .flat_map(adjacent_cells)
        .collect();

    let safe = candidates
        .iter()
        .filter(|c| !contested.contains(&c.cell))
        .copied()
        .collect();

    narrow_or_keep(candidates, safe)
}

/// Keeps candidates standing on food
pub fn seek_food(candidates: Vec<Candidate>, food: &[Coord]) -> Vec<Candidate> {
    let food: HashSet<&Coord> = food.iter().collect();
    let on_food = candidates
        .iter()
        .filter(|c| food.contains(&c.cell))
        .copied()
        .collect();

    narrow_or_keep(candidates, on_food)
}

/// How snugly a candidate folds against its surroundings
///
/// Each neighbour of the candidate other than our head contributes
/// `body_len - penalty`. Free cells carry no penalty, body segments are
/// penalized by their staleness and walls by the full body length, so
/// open space scores highest, segments about to vacate come next and walls
/// contribute nothing.
pub fn fold_priority(
    candidate: &Coord,
    head: &Coord,
    board: &Board,
    occupancy: &Occupancy,
    body_len: usize,
) -> u32 {
    let body_len = body_len as u32;

    adjacent_cells(candidate)
        .iter()
        .filter(|cell| *cell != head)
        .map(|cell| {
            let penalty = if !in_bounds(cell, board.height, board.width) {
                body_len
            } else if occupancy.is_occupied(cell) {
                occupancy.staleness(cell)
            } else {
                0
            };
            body_len.saturating_sub(penalty)
        })
        .sum()
}

/// Scores every candidate with `fold_priority` and keeps the best
pub fn fold_into_space(
    candidates: Vec<Candidate>,
    head: &Coord,
    board: &Board,
    occupancy: &Occupancy,
    body_len: usize,
) -> Vec<Candidate> {
    let scored: Vec<Candidate> = candidates
        .iter()
        .map(|c| Candidate {
            fold_priority: fold_priority(&c.cell, head, board, occupancy, body_len),
            ..*c
        })
        .collect();

    let best = scored.iter().map(|c| c.fold_priority).max().unwrap_or(0);
    let folded = scored.into_iter().filter(|c| c.fold_priority == best).collect();

    narrow_or_keep(candidates, folded)
}

/// Runs the filter stages for one snake on one board
pub struct MovePipeline<'a> {
    config: &'a PipelineConfig,
}

impl<'a> MovePipeline<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        MovePipeline { config }
    }

    /// Chooses a move for `you`
    ///
    /// # Arguments
    /// * `board` - This turn's board; `you` should be among its snakes
    /// * `you` - Our snake, with at least one body segment
    /// * `rng` - Source for the final tie-break and the forced-move fallback
    ///
    /// # Errors
    /// `InvalidMoveError` only if a non-adjacent candidate reached the resolver,
    /// which is a bug rather than a game condition.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        board: &Board,
        you: &Battlesnake,
        rng: &mut R,
    ) -> Result<MoveDecision, InvalidMoveError> {
        let head = you.body.first().copied().unwrap_or(you.head);
        let body_len = you.body_len();
        let occupancy = Occupancy::build(&board.snakes);
        let mut stages = Vec::with_capacity(6);

        let candidates = legal_moves(&head, board, &occupancy);
        stages.push(report(Stage::Legality, 4, candidates.len(), true));

        if candidates.is_empty() {
            let direction = *Direction::all().choose(rng).unwrap_or(&Direction::Up);
            warn!("No legal move from {}, forcing {}", head, direction.as_str());
            return Ok(MoveDecision {
                direction,
                options: vec![],
                cavern_max: 0,
                forced: true,
                stages,
            });
        }

        let before = candidates.len();
        let candidates = if self.config.avoid_enemy_heads {
            let kept = avoid_enemy_heads(candidates, board, &you.id);
            stages.push(report(Stage::HeadAvoidance, before, kept.len(), true));
            kept
        } else {
            stages.push(report(Stage::HeadAvoidance, before, before, false));
            candidates
        };

        let before = candidates.len();
        let cap = cavern_cap(body_len, self.config.cavern_cap_multiplier);
        let (candidates, cavern_max) = best_caverns(&candidates, board, &occupancy, cap);
        stages.push(report(Stage::CavernMaximization, before, candidates.len(), true));

        let before = candidates.len();
        let hungry = you.health < self.config.food_health_threshold;
        let candidates = if hungry {
            seek_food(candidates, &board.food)
        } else {
            candidates
        };
        stages.push(report(Stage::FoodSeeking, before, candidates.len(), hungry));

        let before = candidates.len();
        let cramped = self.config.is_cramped(cavern_max, body_len);
        let candidates = if cramped {
            fold_into_space(candidates, &head, board, &occupancy, body_len)
        } else {
            candidates
        };
        stages.push(report(Stage::SpaceFolding, before, candidates.len(), cramped));

        let options = candidates
            .iter()
            .map(|c| direction_of(&head, &c.cell))
            .collect::<Result<Vec<_>, _>>()?;

        // Candidates are non-empty from legality onwards
        let chosen = match candidates.choose(rng) {
            Some(c) => c,
            None => unreachable!("fail-open stages never empty the candidate set"),
        };
        stages.push(report(Stage::TieBreak, candidates.len(), 1, candidates.len() > 1));

        let direction = direction_of(&head, &chosen.cell)?;

        for s in &stages {
            let skipped = if s.applied { "" } else { " (skipped)" };
            debug!("  {:<16} {} -> {}{}", s.stage.to_string(), s.before, s.after, skipped);
        }

        Ok(MoveDecision {
            direction,
            options,
            cavern_max,
            forced: false,
            stages,
        })
    }
}

fn report(stage: Stage, before: usize, after: usize, applied: bool) -> StageReport {
    StageReport {
        stage,
        before,
        after,
        applied,
    }
}
