// Grid geometry helpers shared by every pipeline stage
//
// Pure functions over coordinates: adjacency, bounds checks, and resolving a
// one-step move into the direction label the API expects.

use thiserror::Error;

use crate::occupancy::Occupancy;
use crate::types::{Board, Coord, Direction};

/// A target cell that is not exactly one orthogonal step away from the head.
/// Reaching this means the pipeline produced a bad candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move from {from} to {to}: not an orthogonal step")]
pub struct InvalidMoveError {
    pub from: Coord,
    pub to: Coord,
}

/// Returns the four orthogonal neighbours of a cell, in `Direction::all()` order
pub fn adjacent_cells(cell: &Coord) -> [Coord; 4] {
    Direction::all().map(|dir| dir.apply(cell))
}

/// True iff the cell lies on a board of the given dimensions
pub fn in_bounds(cell: &Coord, height: i32, width: i32) -> bool {
    cell.x >= 0 && cell.x < width && cell.y >= 0 && cell.y < height
}

/// Adjacent cells that are on the board and not occupied by a body segment
pub fn non_lethal_neighbors(cell: &Coord, board: &Board, occupancy: &Occupancy) -> Vec<Coord> {
    adjacent_cells(cell)
        .iter()
        .filter(|next| in_bounds(next, board.height, board.width))
        .filter(|next| !occupancy.is_occupied(next))
        .copied()
        .collect()
}

/// Resolves a single orthogonal step into its direction label
///
/// # Errors
/// Returns `InvalidMoveError` for diagonal, zero-length, or multi-cell moves.
pub fn direction_of(from: &Coord, to: &Coord) -> Result<Direction, InvalidMoveError> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    match (dx, dy) {
        (0, 1) => Ok(Direction::Up),
        (0, -1) => Ok(Direction::Down),
        (-1, 0) => Ok(Direction::Left),
        (1, 0) => Ok(Direction::Right),
        _ => Err(InvalidMoveError { from: *from, to: *to }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_board(height: i32, width: i32) -> Board {
        Board {
            height,
            width,
            food: vec![],
            snakes: vec![],
            hazards: vec![],
        }
    }

    #[test]
    fn test_adjacent_cells_are_distinct_unit_steps() {
        let cell = Coord::new(3, 7);
        let neighbors = adjacent_cells(&cell);

        assert_eq!(
            neighbors,
            [Coord::new(3, 8), Coord::new(3, 6), Coord::new(2, 7), Coord::new(4, 7)]
        );
        for n in neighbors.iter() {
            assert_eq!((n.x - cell.x).abs() + (n.y - cell.y).abs(), 1);
        }
    }

    #[test]
    fn test_in_bounds_edges() {
        assert!(in_bounds(&Coord::new(0, 0), 11, 11));
        assert!(in_bounds(&Coord::new(10, 10), 11, 11));
        assert!(!in_bounds(&Coord::new(-1, 0), 11, 11));
        assert!(!in_bounds(&Coord::new(0, -1), 11, 11));
        assert!(!in_bounds(&Coord::new(11, 0), 11, 11));
        assert!(!in_bounds(&Coord::new(0, 11), 11, 11));
    }

    #[test]
    fn test_in_bounds_non_square_board() {
        // width 7, height 3
        assert!(in_bounds(&Coord::new(6, 2), 3, 7));
        assert!(!in_bounds(&Coord::new(2, 6), 3, 7));
    }

    #[test]
    fn test_non_lethal_neighbors_in_corner() {
        let board = empty_board(11, 11);
        let occupancy = Occupancy::build(&board.snakes);
        let neighbors = non_lethal_neighbors(&Coord::new(0, 0), &board, &occupancy);
        assert_eq!(neighbors, vec![Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn test_direction_of_orthogonal_steps() {
        let head = Coord::new(5, 5);
        assert_eq!(direction_of(&head, &Coord::new(5, 6)), Ok(Direction::Up));
        assert_eq!(direction_of(&head, &Coord::new(5, 4)), Ok(Direction::Down));
        assert_eq!(direction_of(&head, &Coord::new(4, 5)), Ok(Direction::Left));
        assert_eq!(direction_of(&head, &Coord::new(6, 5)), Ok(Direction::Right));
    }

    #[test]
    fn test_direction_of_is_inverse_of_apply() {
        let head = Coord::new(2, 9);
        for dir in Direction::all().iter() {
            assert_eq!(direction_of(&head, &dir.apply(&head)), Ok(*dir));
        }
    }

    #[test]
    fn test_direction_of_rejects_diagonal_and_identical() {
        let head = Coord::new(5, 5);

        let diagonal = direction_of(&head, &Coord::new(6, 6));
        assert_eq!(
            diagonal,
            Err(InvalidMoveError {
                from: head,
                to: Coord::new(6, 6)
            })
        );

        assert!(direction_of(&head, &head).is_err());
        assert!(direction_of(&head, &Coord::new(7, 5)).is_err());
    }

    #[test]
    fn test_invalid_move_error_message_names_both_cells() {
        let err = InvalidMoveError {
            from: Coord::new(1, 1),
            to: Coord::new(2, 2),
        };
        assert_eq!(
            err.to_string(),
            "cannot move from (1, 1) to (2, 2): not an orthogonal step"
        );
    }
}
