// Per-turn occupancy model
//
// Built from scratch on every turn from the snake bodies in the request.
// Tails are treated as vacating, so they never count as occupied. A snake
// that ate this turn keeps its tail in place; that case is not modeled.

use std::collections::{HashMap, HashSet};

use crate::types::{Battlesnake, Coord};

/// Cells that will still be blocked next turn, and how long each stays blocked
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    occupied: HashSet<Coord>,
    staleness: HashMap<Coord, u32>,
}

impl Occupancy {
    /// Derives the occupied set and staleness map from raw snake bodies
    ///
    /// Every segment except the last is occupied, with staleness
    /// `body_len - index - 1`: the head is stalest, the segment before the tail
    /// has staleness 1. Stacked segments keep the largest value.
    pub fn build(snakes: &[Battlesnake]) -> Self {
        let mut occupancy = Occupancy::default();

        for snake in snakes {
            let len = snake.body.len();
            let without_tail = len.saturating_sub(1);

            for (index, segment) in snake.body[..without_tail].iter().enumerate() {
                let turns_left = (len - index - 1) as u32;
                occupancy.occupied.insert(*segment);
                let entry = occupancy.staleness.entry(*segment).or_insert(0);
                *entry = (*entry).max(turns_left);
            }
        }

        occupancy
    }

    pub fn is_occupied(&self, cell: &Coord) -> bool {
        self.occupied.contains(cell)
    }

    /// Turns until the segment on `cell` becomes a tail; 0 for free cells
    pub fn staleness(&self, cell: &Coord) -> u32 {
        self.staleness.get(cell).copied().unwrap_or(0)
    }

    pub fn occupied(&self) -> &HashSet<Coord> {
        &self.occupied
    }
}
