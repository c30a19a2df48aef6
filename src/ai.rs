use crate::board::Board;
use crate::types::{Difficulty, Player};

const BOARD_CELLS: usize = 64;

/// Move selection policy for the computer player.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, player: Player) -> Option<usize>;
}

/// Easy: the first legal square in row-major scan order, capture count
/// ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalSelector;

impl MoveSelector for FirstLegalSelector {
    fn select_move(&self, board: &Board, player: Player) -> Option<usize> {
        let legal = board.legal_moves(player);
        if legal == 0 {
            None
        } else {
            Some(legal.trailing_zeros() as usize)
        }
    }
}

/// Hard: the square with the strictly greatest immediate capture count.
/// Ties go to the square found first in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyCaptureSelector;

impl MoveSelector for GreedyCaptureSelector {
    fn select_move(&self, board: &Board, player: Player) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;

        for pos in 0..BOARD_CELLS {
            let captured = board.flips_for(pos, player).count_ones();
            if captured == 0 {
                continue;
            }
            // Strictly greater, so the earlier square keeps ties.
            if best.is_none_or(|(_, best_captured)| captured > best_captured) {
                best = Some((pos, captured));
            }
        }

        best.map(|(pos, _)| pos)
    }
}

pub fn selector_for(difficulty: Difficulty) -> &'static dyn MoveSelector {
    match difficulty {
        Difficulty::Easy => &FirstLegalSelector,
        Difficulty::Hard => &GreedyCaptureSelector,
    }
}
