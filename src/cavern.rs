// Bounded flood fill ("cavern size")
//
// Sizes the open region reachable through a candidate move. The search stops
// as soon as it has counted `cap` cells, so per-turn cost scales with body
// length rather than board area.

use std::collections::{HashSet, VecDeque};

use crate::geometry::non_lethal_neighbors;
use crate::occupancy::Occupancy;
use crate::pipeline::Candidate;
use crate::types::{Board, Coord};

/// Search cap for a snake of the given length
pub fn cavern_cap(body_len: usize, multiplier: usize) -> usize {
    body_len.saturating_mul(multiplier).max(1)
}

/// Cells counted by the bounded search from `entry`, in visit order
///
/// The entry cell is always counted. Cells are marked as seen when queued, so
/// none is counted twice.
pub fn reachable_cells(entry: &Coord, board: &Board, occupancy: &Occupancy, cap: usize) -> Vec<Coord> {
    let mut counted = Vec::new();
    let mut seen: HashSet<Coord> = HashSet::new();
    let mut frontier: VecDeque<Coord> = VecDeque::new();

    seen.insert(*entry);
    frontier.push_back(*entry);

    while let Some(cell) = frontier.pop_front() {
        counted.push(cell);
        if counted.len() >= cap {
            break;
        }

        for next in non_lethal_neighbors(&cell, board, occupancy) {
            if seen.insert(next) {
                frontier.push_back(next);
            }
        }
    }

    counted
}

/// Number of open cells reachable through `entry`, at most `cap`
pub fn cavern_size(entry: &Coord, board: &Board, occupancy: &Occupancy, cap: usize) -> usize {
    reachable_cells(entry, board, occupancy, cap).len()
}

/// Annotates candidates with their cavern size and keeps those tied for the largest
///
/// # Returns
/// The surviving candidates and the largest cavern size; `(vec![], 0)` for no input.
pub fn best_caverns(
    candidates: &[Candidate],
    board: &Board,
    occupancy: &Occupancy,
    cap: usize,
) -> (Vec<Candidate>, usize) {
    let sized: Vec<Candidate> = candidates
        .iter()
        .map(|candidate| Candidate {
            cavern_size: cavern_size(&candidate.cell, board, occupancy, cap),
            ..*candidate
        })
        .collect();

    let largest = sized.iter().map(|c| c.cavern_size).max().unwrap_or(0);
    let best = sized.into_iter().filter(|c| c.cavern_size == largest).collect();

    (best, largest)
}
